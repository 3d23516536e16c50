use crate::helpers::TestApp;
use reqwest::Response;
use serde_json::Value;

impl TestApp {
    pub async fn create_comment(&self, payload: &Value) -> Response {
        self.send_post("api/v1/comment/create", payload).await
    }

    pub async fn update_comment(&self, id: &str, payload: &Value) -> Response {
        self.send_patch_with_payload(&format!("api/v1/comment/update/{id}"), payload)
            .await
    }

    pub async fn get_comments(&self, post_id: &str) -> Response {
        self.send_get(&format!("api/v1/comment/get/post/{post_id}"))
            .await
    }

    pub async fn delete_comment(&self, id: &str) -> Response {
        self.send_delete(&format!("api/v1/comment/delete/{id}"))
            .await
    }

    pub fn create_sample_post(&self) -> i64 {
        self.store.add_post(1, "Post for comments").id
    }

    /// Creates a comment and returns its id, asserting the request succeeded.
    pub async fn create_sample_comment(&self, post_id: i64, text: &str) -> i64 {
        let payload = serde_json::json!({
            "userId": "1",
            "postId": post_id.to_string(),
            "comment": text,
        });

        let response = self.create_comment(&payload).await;
        assert_eq!(response.status().as_u16(), 200, "Failed to create sample comment");
        let body: Value = response.json().await.unwrap();
        body["body"]["id"].as_i64().unwrap()
    }
}
