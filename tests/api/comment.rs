use crate::helpers;
use fake::Fake;
use fake::faker::lorem::en::Sentence;
use serde_json::{Value, json};

// ============================================================================
// Create Comment
// ============================================================================

#[tokio::test]
async fn create_comment_returns_200_for_valid_input() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post();
    let text: String = Sentence(3..8).fake();

    let payload = json!({
        "userId": "1",
        "postId": post_id.to_string(),
        "comment": text,
    });

    let response = app.create_comment(&payload).await;
    assert_eq!(
        response.status().as_u16(),
        200,
        "Expected 200 for valid comment creation"
    );

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], 200);
    assert_eq!(body["state"], "success");
    assert_eq!(body["body"]["postId"], post_id);
    assert_eq!(body["body"]["text"], text.as_str());
    assert_eq!(body["body"]["status"], 1);
}

#[tokio::test]
async fn create_comment_accepts_numeric_json_ids() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post();

    let payload = json!({ "userId": 1, "postId": post_id, "comment": "numbers work" });

    let response = app.create_comment(&payload).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn create_comment_escapes_markup() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post();

    let payload = json!({
        "userId": "1",
        "postId": post_id.to_string(),
        "comment": "<img src=x onerror=alert(1)>",
    });

    let response = app.create_comment(&payload).await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["body"]["text"], "&lt;img src=x onerror=alert(1)&gt;");
}

#[tokio::test]
async fn create_comment_returns_500_with_every_validation_error() {
    let app = helpers::spawn_app().await;

    let payload = json!({ "userId": "abc", "postId": "", "comment": "" });

    let response = app.create_comment(&payload).await;
    assert_eq!(response.status().as_u16(), 500);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["state"], "failed");
    assert_eq!(body["message"], "Validation Error!");
    let detail = body["err"]["message"].as_str().unwrap();
    assert!(detail.contains("Invalid User ID!"), "{detail}");
    assert!(detail.contains("Invalid Post ID!"), "{detail}");
    assert!(detail.contains("Invalid Comment!"), "{detail}");
    assert_eq!(app.store.post_lookups(), 0);
}

#[tokio::test]
async fn create_comment_returns_500_for_various_invalid_inputs() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post().to_string();
    let too_long = "a".repeat(201);

    let test_cases = vec![
        (json!({ "postId": post_id, "comment": "hi" }), "missing user id"),
        (json!({ "userId": "1", "comment": "hi" }), "missing post id"),
        (json!({ "userId": "1", "postId": post_id }), "missing comment"),
        (json!({ "userId": "1", "postId": post_id, "comment": "12345" }), "numeric comment"),
        (json!({ "userId": "1", "postId": post_id, "comment": too_long }), "comment too long"),
        (
            json!({ "userId": "1", "postId": post_id, "parentCommentId": "x", "comment": "hi" }),
            "non-numeric parent",
        ),
    ];

    for (payload, description) in test_cases {
        let response = app.create_comment(&payload).await;
        assert_eq!(
            response.status().as_u16(),
            500,
            "The API did not reject the payload when it had {}.",
            description
        );
    }
    assert_eq!(app.store.comment_count(), 0);
}

#[tokio::test]
async fn create_comment_returns_404_for_missing_post() {
    let app = helpers::spawn_app().await;

    let payload = json!({ "userId": "1", "postId": "999", "comment": "hello there" });

    let response = app.create_comment(&payload).await;
    assert_eq!(response.status().as_u16(), 404);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["state"], "notfound");
    assert_eq!(app.store.comment_count(), 0);
}

#[tokio::test]
async fn create_reply_returns_404_for_missing_parent() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post();

    let payload = json!({
        "userId": "1",
        "postId": post_id.to_string(),
        "parentCommentId": "77",
        "comment": "a reply",
    });

    let response = app.create_comment(&payload).await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(app.store.comment_count(), 0);
}

#[tokio::test]
async fn create_reply_with_null_string_parent_is_a_top_level_comment() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post();

    let payload = json!({
        "userId": "1",
        "postId": post_id.to_string(),
        "parentCommentId": "null",
        "comment": "top level",
    });

    let response = app.create_comment(&payload).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["body"]["parentCommentId"], Value::Null);
}

#[tokio::test]
async fn create_comment_returns_500_for_malformed_json() {
    let app = helpers::spawn_app().await;

    let response = app
        .send_post_raw("api/v1/comment/create", "{\"userId\": ".to_string())
        .await;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["state"], "failed");
}

#[tokio::test]
async fn create_comment_rejects_oversized_bodies() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post();

    let payload = json!({
        "userId": "1",
        "postId": post_id.to_string(),
        "comment": "a".repeat(10 * 1024),
    });

    let response = app.create_comment(&payload).await;
    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(app.store.comment_count(), 0);
}

#[tokio::test]
async fn post_existence_is_cached_across_requests() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post();

    app.create_sample_comment(post_id, "first").await;
    app.create_sample_comment(post_id, "second").await;

    assert_eq!(app.store.post_lookups(), 1);
}

// ============================================================================
// Update Comment
// ============================================================================

#[tokio::test]
async fn update_comment_returns_200_with_updated_record() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post();
    let comment_id = app.create_sample_comment(post_id, "before").await;

    let payload = json!({
        "userId": "1",
        "postId": post_id.to_string(),
        "comment": "after",
        "status": 0,
    });

    let response = app.update_comment(&comment_id.to_string(), &payload).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["body"]["text"], "after");
    assert_eq!(body["body"]["status"], 1, "status must not be client-mutable");
}

#[tokio::test]
async fn update_comment_returns_404_for_missing_comment() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post();

    let payload = json!({ "userId": "1", "postId": post_id.to_string(), "comment": "after" });

    let response = app.update_comment("12345", &payload).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn update_comment_returns_404_for_missing_post() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post();
    let comment_id = app.create_sample_comment(post_id, "before").await;

    let payload = json!({ "userId": "1", "postId": "4040", "comment": "after" });

    let response = app.update_comment(&comment_id.to_string(), &payload).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn update_comment_returns_404_for_missing_parent_and_keeps_text() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post();
    let comment_id = app.create_sample_comment(post_id, "before").await;

    let payload = json!({
        "userId": "1",
        "postId": post_id.to_string(),
        "parentCommentId": "99",
        "comment": "after",
    });

    let response = app.update_comment(&comment_id.to_string(), &payload).await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app.get_comments(&post_id.to_string()).await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["body"][0]["text"], "before");
}

// ============================================================================
// Get Comments
// ============================================================================

#[tokio::test]
async fn get_comments_returns_200_with_comment_list() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post();

    for i in 0..3 {
        app.create_sample_comment(post_id, &format!("Comment {}", i))
            .await;
    }

    let response = app.get_comments(&post_id.to_string()).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    let comments = body["body"].as_array().unwrap();
    assert_eq!(comments.len(), 3);
    assert_eq!(comments[0]["text"], "Comment 2", "newest comment comes first");
}

#[tokio::test]
async fn get_comments_returns_404_for_post_without_comments() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post();

    let response = app.get_comments(&post_id.to_string()).await;
    assert_eq!(response.status().as_u16(), 404);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["state"], "notfound");
}

#[tokio::test]
async fn get_comments_is_served_from_cache_on_repeat() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post();
    app.create_sample_comment(post_id, "cached").await;

    app.get_comments(&post_id.to_string()).await;
    let response = app.get_comments(&post_id.to_string()).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(app.store.list_lookups(), 1);
}

#[tokio::test]
async fn get_comments_returns_500_when_store_is_down() {
    let app = helpers::spawn_app().await;
    app.store.set_unavailable(true);

    let response = app.get_comments("1").await;
    assert_eq!(response.status().as_u16(), 500);

    let body: Value = response.json().await.unwrap();
    let detail = body["err"]["message"].as_str().unwrap();
    assert!(!detail.contains("connection refused"), "{detail}");
}

// ============================================================================
// Delete Comment
// ============================================================================

#[tokio::test]
async fn delete_comment_returns_200_with_null_body() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post();
    let comment_id = app.create_sample_comment(post_id, "to delete").await;

    let response = app.delete_comment(&comment_id.to_string()).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["state"], "success");
    assert_eq!(body["body"], Value::Null);
}

#[tokio::test]
async fn replying_to_a_deleted_comment_is_rejected() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post();
    let parent_id = app.create_sample_comment(post_id, "parent").await;

    let reply = json!({
        "userId": "2",
        "postId": post_id.to_string(),
        "parentCommentId": parent_id.to_string(),
        "comment": "reply",
    });
    assert_eq!(app.create_comment(&reply).await.status().as_u16(), 200);

    app.delete_comment(&parent_id.to_string()).await;

    let response = app.create_comment(&reply).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn delete_comment_returns_500_for_unknown_comment() {
    let app = helpers::spawn_app().await;

    let response = app.delete_comment("31337").await;
    assert_eq!(response.status().as_u16(), 500);
}

#[tokio::test]
async fn delete_comment_returns_500_for_malformed_id() {
    let app = helpers::spawn_app().await;

    let response = app.delete_comment("not-a-number").await;
    assert_eq!(response.status().as_u16(), 500);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Validation Error!");
}

#[tokio::test]
async fn deleted_comment_lingers_in_cached_list_until_expiry() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post();
    let comment_id = app.create_sample_comment(post_id, "short lived").await;

    app.get_comments(&post_id.to_string()).await;
    app.delete_comment(&comment_id.to_string()).await;

    let response = app.get_comments(&post_id.to_string()).await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["body"].as_array().unwrap().len(), 1);
    assert_eq!(app.cache.len(), 2, "post and list entries remain cached");
}
