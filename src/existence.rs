use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde_json::Value;

use crate::cache::{CacheKey, ExistenceCache};
use crate::domain::EntityId;
use crate::repository::CommentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Post,
    Comment,
}

impl EntityKind {
    fn cache_key(self, id: EntityId) -> CacheKey {
        match self {
            EntityKind::Post => CacheKey::Post(id),
            EntityKind::Comment => CacheKey::Comment(id),
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Post => f.write_str("post"),
            EntityKind::Comment => f.write_str("comment"),
        }
    }
}

/// Answers "does this post/comment exist?", consulting the cache before the
/// store and remembering positive answers for the configured TTL.
///
/// Negative answers are never cached, so a missing id is re-queried on every
/// call.
#[derive(Clone)]
pub struct ExistenceVerifier {
    store: Arc<dyn CommentStore>,
    cache: Arc<dyn ExistenceCache>,
    ttl: Duration,
}

impl ExistenceVerifier {
    pub fn new(store: Arc<dyn CommentStore>, cache: Arc<dyn ExistenceCache>, ttl: Duration) -> Self {
        Self { store, cache, ttl }
    }

    /// Fails closed: a malformed id is logged and reported as missing.
    #[tracing::instrument(name = "Checking entity existence", skip(self))]
    pub async fn exists(&self, kind: EntityKind, raw_id: &str) -> bool {
        match EntityId::parse(raw_id) {
            Ok(id) => self.exists_by_id(kind, id).await,
            Err(e) => {
                tracing::error!(error = %e, %kind, "Rejected malformed id in existence check");
                false
            }
        }
    }

    #[tracing::instrument(name = "Checking entity existence by id", skip(self), fields(%kind, %id))]
    pub async fn exists_by_id(&self, kind: EntityKind, id: EntityId) -> bool {
        let key = kind.cache_key(id);
        if self.cache.has(&key) {
            tracing::debug!(%key, "Existence served from cache");
            return true;
        }

        match self.fetch(kind, id).await {
            Ok(Some(record)) => {
                self.cache.set(key, record, self.ttl);
                true
            }
            Ok(None) => {
                tracing::info!(%kind, %id, "Referenced entity does not exist");
                false
            }
            Err(e) => {
                tracing::error!(error.cause_chain = ?e, %kind, %id, "Existence check failed");
                false
            }
        }
    }

    async fn fetch(&self, kind: EntityKind, id: EntityId) -> Result<Option<Value>, anyhow::Error> {
        let record = match kind {
            EntityKind::Post => self
                .store
                .find_post_by_id(id)
                .await?
                .map(serde_json::to_value)
                .transpose(),
            EntityKind::Comment => self
                .store
                .find_comment_by_id(id)
                .await?
                .map(serde_json::to_value)
                .transpose(),
        };
        record.context("Failed to serialize record for the existence cache")
    }
}
