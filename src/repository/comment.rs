use anyhow::Context;
use sqlx::PgPool;
use tracing::Span;

use crate::domain::{CommentRecord, CommentStatus, EntityId, NewComment};

#[tracing::instrument(skip(pool), fields(comment_id=%id))]
pub async fn get_comment(
    id: EntityId,
    pool: &PgPool,
) -> Result<Option<CommentRecord>, anyhow::Error> {
    let record = sqlx::query_as::<_, CommentRecord>(
        r#"
        SELECT id, user_id, post_id, parent_comment_id, text, status, created_at, updated_at
        FROM comments
        WHERE id = $1 AND status = $2
        "#,
    )
    .bind(id.value())
    .bind(i16::from(CommentStatus::Active))
    .fetch_optional(pool)
    .await
    .context("Failed to fetch comment")?;

    Ok(record)
}

#[tracing::instrument(skip(pool), fields(post_id=%post_id))]
pub async fn get_comments_for_post(
    post_id: EntityId,
    pool: &PgPool,
) -> Result<Vec<CommentRecord>, anyhow::Error> {
    let rows = sqlx::query_as::<_, CommentRecord>(
        r#"
        SELECT id, user_id, post_id, parent_comment_id, text, status, created_at, updated_at
        FROM comments
        WHERE post_id = $1 AND status = $2
        ORDER BY id DESC
        "#,
    )
    .bind(post_id.value())
    .bind(i16::from(CommentStatus::Active))
    .fetch_all(pool)
    .await
    .context("Failed to load comments for post")?;

    Ok(rows)
}

#[tracing::instrument(
    skip_all,
    fields(post_id=%comment.post_id, comment_id=tracing::field::Empty)
)]
pub async fn insert_comment(
    comment: &NewComment,
    pool: &PgPool,
) -> Result<Option<CommentRecord>, anyhow::Error> {
    let record = sqlx::query_as::<_, CommentRecord>(
        r#"
        INSERT INTO comments (user_id, post_id, parent_comment_id, text, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, post_id, parent_comment_id, text, status, created_at, updated_at
        "#,
    )
    .bind(comment.user_id.value())
    .bind(comment.post_id.value())
    .bind(comment.parent_comment_id.map(|id| id.value()))
    .bind(comment.text.as_ref())
    .bind(i16::from(comment.status))
    .fetch_optional(pool)
    .await
    .context("Failed to insert comment")?;

    if let Some(record) = &record {
        Span::current().record("comment_id", tracing::field::display(record.id));
    }

    Ok(record)
}

// Status is not client-mutable, so it is left out of the SET list.
#[tracing::instrument(skip_all, fields(comment_id=%id))]
pub async fn update_comment(
    id: EntityId,
    comment: &NewComment,
    pool: &PgPool,
) -> Result<Option<CommentRecord>, anyhow::Error> {
    let record = sqlx::query_as::<_, CommentRecord>(
        r#"
        UPDATE comments
        SET user_id = $1, post_id = $2, parent_comment_id = $3, text = $4, updated_at = now()
        WHERE id = $5 AND status = $6
        RETURNING id, user_id, post_id, parent_comment_id, text, status, created_at, updated_at
        "#,
    )
    .bind(comment.user_id.value())
    .bind(comment.post_id.value())
    .bind(comment.parent_comment_id.map(|id| id.value()))
    .bind(comment.text.as_ref())
    .bind(id.value())
    .bind(i16::from(CommentStatus::Active))
    .fetch_optional(pool)
    .await
    .context("Failed to execute comment update query")?;

    Ok(record)
}

#[tracing::instrument(skip(pool), fields(comment_id=%id))]
pub async fn soft_delete_comment(
    id: EntityId,
    pool: &PgPool,
) -> Result<Option<CommentRecord>, anyhow::Error> {
    let record = sqlx::query_as::<_, CommentRecord>(
        r#"
        UPDATE comments
        SET status = $1, updated_at = now()
        WHERE id = $2 AND status = $3
        RETURNING id, user_id, post_id, parent_comment_id, text, status, created_at, updated_at
        "#,
    )
    .bind(i16::from(CommentStatus::Deleted))
    .bind(id.value())
    .bind(i16::from(CommentStatus::Active))
    .fetch_optional(pool)
    .await
    .context("Failed to mark comment as deleted")?;

    Ok(record)
}
