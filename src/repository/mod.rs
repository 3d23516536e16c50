mod comment;
mod memory;
mod post;

pub use comment::*;
pub use memory::InMemoryStore;
pub use post::*;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{CommentRecord, EntityId, NewComment, PostRecord};

/// Data-access operations the comment pipeline relies on.
///
/// Single-record writes return `Ok(None)` when the store had nothing to act
/// on; callers treat that the same as a failure.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn find_post_by_id(&self, id: EntityId) -> Result<Option<PostRecord>, anyhow::Error>;

    async fn find_comment_by_id(&self, id: EntityId)
    -> Result<Option<CommentRecord>, anyhow::Error>;

    async fn create_comment(
        &self,
        comment: &NewComment,
    ) -> Result<Option<CommentRecord>, anyhow::Error>;

    async fn update_comment(
        &self,
        id: EntityId,
        comment: &NewComment,
    ) -> Result<Option<CommentRecord>, anyhow::Error>;

    async fn list_comments_by_post(
        &self,
        post_id: EntityId,
    ) -> Result<Vec<CommentRecord>, anyhow::Error>;

    async fn delete_comment(&self, id: EntityId) -> Result<Option<CommentRecord>, anyhow::Error>;
}

#[derive(Clone)]
pub struct PgCommentStore {
    pool: PgPool,
}

impl PgCommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for PgCommentStore {
    async fn find_post_by_id(&self, id: EntityId) -> Result<Option<PostRecord>, anyhow::Error> {
        get_post(id, &self.pool).await
    }

    async fn find_comment_by_id(
        &self,
        id: EntityId,
    ) -> Result<Option<CommentRecord>, anyhow::Error> {
        get_comment(id, &self.pool).await
    }

    async fn create_comment(
        &self,
        comment: &NewComment,
    ) -> Result<Option<CommentRecord>, anyhow::Error> {
        insert_comment(comment, &self.pool).await
    }

    async fn update_comment(
        &self,
        id: EntityId,
        comment: &NewComment,
    ) -> Result<Option<CommentRecord>, anyhow::Error> {
        update_comment(id, comment, &self.pool).await
    }

    async fn list_comments_by_post(
        &self,
        post_id: EntityId,
    ) -> Result<Vec<CommentRecord>, anyhow::Error> {
        get_comments_for_post(post_id, &self.pool).await
    }

    async fn delete_comment(&self, id: EntityId) -> Result<Option<CommentRecord>, anyhow::Error> {
        soft_delete_comment(id, &self.pool).await
    }
}
