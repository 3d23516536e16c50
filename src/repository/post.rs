use anyhow::Context;
use sqlx::PgPool;

use crate::domain::{EntityId, PostRecord};

#[tracing::instrument(skip(pool), fields(post_id=%id))]
pub async fn get_post(id: EntityId, pool: &PgPool) -> Result<Option<PostRecord>, anyhow::Error> {
    let record = sqlx::query_as::<_, PostRecord>(
        r#"
        SELECT id, user_id, title, created_at
        FROM posts
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(id.value())
    .fetch_optional(pool)
    .await
    .context("Failed to fetch post")?;

    Ok(record)
}
