use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;

use super::CommentStore;
use crate::domain::{CommentRecord, CommentStatus, EntityId, NewComment, PostRecord};

#[derive(Default)]
struct Tables {
    posts: BTreeMap<i64, PostRecord>,
    comments: BTreeMap<i64, CommentRecord>,
    next_post_id: i64,
    next_comment_id: i64,
}

/// `CommentStore` kept entirely in memory.
///
/// Counts lookups per entity kind so callers can observe whether a read was
/// served by the cache, and can be switched into a failing mode to exercise
/// dependency errors.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    post_lookups: AtomicUsize,
    comment_lookups: AtomicUsize,
    list_lookups: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_post(&self, user_id: i64, title: &str) -> PostRecord {
        let mut tables = self.tables();
        tables.next_post_id += 1;
        let post = PostRecord {
            id: tables.next_post_id,
            user_id,
            title: title.to_string(),
            created_at: Utc::now(),
        };
        tables.posts.insert(post.id, post.clone());
        post
    }

    pub fn post_lookups(&self) -> usize {
        self.post_lookups.load(Ordering::SeqCst)
    }

    pub fn comment_lookups(&self) -> usize {
        self.comment_lookups.load(Ordering::SeqCst)
    }

    pub fn list_lookups(&self) -> usize {
        self.list_lookups.load(Ordering::SeqCst)
    }

    pub fn comment_count(&self) -> usize {
        self.tables().comments.len()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ensure_available(&self) -> Result<(), anyhow::Error> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(anyhow!("connection refused: in-memory store is unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl CommentStore for InMemoryStore {
    async fn find_post_by_id(&self, id: EntityId) -> Result<Option<PostRecord>, anyhow::Error> {
        self.post_lookups.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()?;
        Ok(self.tables().posts.get(&id.value()).cloned())
    }

    async fn find_comment_by_id(
        &self,
        id: EntityId,
    ) -> Result<Option<CommentRecord>, anyhow::Error> {
        self.comment_lookups.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()?;
        Ok(self
            .tables()
            .comments
            .get(&id.value())
            .filter(|c| c.status == CommentStatus::Active)
            .cloned())
    }

    async fn create_comment(
        &self,
        comment: &NewComment,
    ) -> Result<Option<CommentRecord>, anyhow::Error> {
        self.ensure_available()?;
        let mut tables = self.tables();
        tables.next_comment_id += 1;
        let record = CommentRecord {
            id: tables.next_comment_id,
            user_id: comment.user_id.value(),
            post_id: comment.post_id.value(),
            parent_comment_id: comment.parent_comment_id.map(|id| id.value()),
            text: comment.text.as_ref().to_string(),
            status: comment.status,
            created_at: Utc::now(),
            updated_at: None,
        };
        tables.comments.insert(record.id, record.clone());
        Ok(Some(record))
    }

    async fn update_comment(
        &self,
        id: EntityId,
        comment: &NewComment,
    ) -> Result<Option<CommentRecord>, anyhow::Error> {
        self.ensure_available()?;
        let mut tables = self.tables();
        let Some(record) = tables
            .comments
            .get_mut(&id.value())
            .filter(|c| c.status == CommentStatus::Active)
        else {
            return Ok(None);
        };

        record.user_id = comment.user_id.value();
        record.post_id = comment.post_id.value();
        record.parent_comment_id = comment.parent_comment_id.map(|id| id.value());
        record.text = comment.text.as_ref().to_string();
        record.updated_at = Some(Utc::now());
        Ok(Some(record.clone()))
    }

    async fn list_comments_by_post(
        &self,
        post_id: EntityId,
    ) -> Result<Vec<CommentRecord>, anyhow::Error> {
        self.list_lookups.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()?;
        Ok(self
            .tables()
            .comments
            .values()
            .rev()
            .filter(|c| c.post_id == post_id.value() && c.status == CommentStatus::Active)
            .cloned()
            .collect())
    }

    async fn delete_comment(&self, id: EntityId) -> Result<Option<CommentRecord>, anyhow::Error> {
        self.ensure_available()?;
        let mut tables = self.tables();
        let Some(record) = tables
            .comments
            .get_mut(&id.value())
            .filter(|c| c.status == CommentStatus::Active)
        else {
            return Ok(None);
        };

        record.status = CommentStatus::Deleted;
        record.updated_at = Some(Utc::now());
        Ok(Some(record.clone()))
    }
}
