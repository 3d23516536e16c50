use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use anyhow::{Context, anyhow};
use serde::Serialize;
use serde_json::Value;

use crate::cache::{CacheKey, ExistenceCache};
use crate::domain::{CommentPayload, CommentStatus, EntityId, NewComment, ValidationError};
use crate::envelope::ResponseEnvelope;
use crate::existence::{EntityKind, ExistenceVerifier};
use crate::repository::CommentStore;
use crate::utils;

const INTERNAL_ERROR_DETAIL: &str = "Something went wrong! Contact admin for information!";

#[derive(thiserror::Error)]
pub enum CommentError {
    #[error("{}", utils::join_messages(.0))]
    ValidationError(Vec<ValidationError>),

    #[error("Invalid request body: {0}")]
    InvalidPayload(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for CommentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        utils::error_chain_fmt(self, f)
    }
}

impl CommentError {
    /// Store-internal error text is logged here and never copied into the
    /// envelope.
    pub fn envelope(&self) -> ResponseEnvelope {
        match self {
            CommentError::ValidationError(_) | CommentError::InvalidPayload(_) => {
                tracing::warn!(error = %self, "Rejected comment request");
                ResponseEnvelope::failed("Validation Error!", self.to_string())
            }
            CommentError::NotFound(message) => {
                tracing::info!(%message, "Comment request referenced a missing entity");
                ResponseEnvelope::not_found("Not Found!", message.clone())
            }
            CommentError::UnexpectedError(_) => {
                tracing::error!(error.cause_chain = ?self, "Comment request failed");
                ResponseEnvelope::failed("Internal Server Error!", INTERNAL_ERROR_DETAIL)
            }
        }
    }
}

impl ResponseError for CommentError {
    fn status_code(&self) -> StatusCode {
        match self {
            CommentError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.envelope().into_http_response()
    }
}

enum CommentListLookup {
    CacheHit(Value),
    Fetched(Value),
    Empty,
}

/// Runs the comment operations: sanitize and validate the payload, confirm
/// every referenced entity exists, then hand the write or read to the store.
///
/// Each public operation returns the envelope to send; nothing propagates
/// past this boundary.
pub struct CommentService {
    store: Arc<dyn CommentStore>,
    cache: Arc<dyn ExistenceCache>,
    verifier: ExistenceVerifier,
    ttl: Duration,
}

impl CommentService {
    pub fn new(store: Arc<dyn CommentStore>, cache: Arc<dyn ExistenceCache>, ttl: Duration) -> Self {
        let verifier = ExistenceVerifier::new(store.clone(), cache.clone(), ttl);
        Self {
            store,
            cache,
            verifier,
            ttl,
        }
    }

    pub fn verifier(&self) -> &ExistenceVerifier {
        &self.verifier
    }

    #[tracing::instrument(name = "Registering comment", skip_all)]
    pub async fn register_comment(&self, payload: CommentPayload) -> ResponseEnvelope {
        match self.try_register_comment(payload).await {
            Ok(body) => {
                tracing::info!("Comment has been added successfully!");
                ResponseEnvelope::success("Comment has been added successfully!", Some(body))
            }
            Err(e) => e.envelope(),
        }
    }

    #[tracing::instrument(name = "Updating comment", skip(self, payload))]
    pub async fn update_comment(&self, comment_id: &str, payload: CommentPayload) -> ResponseEnvelope {
        match self.try_update_comment(comment_id, payload).await {
            Ok(body) => {
                tracing::info!("Comment has been updated successfully!");
                ResponseEnvelope::success("Comment has been updated successfully!", Some(body))
            }
            Err(e) => e.envelope(),
        }
    }

    #[tracing::instrument(name = "Retrieving comments for post", skip(self))]
    pub async fn get_comments(&self, post_id: &str) -> ResponseEnvelope {
        match self.lookup_comment_list(post_id).await {
            Ok(CommentListLookup::CacheHit(list)) => {
                tracing::debug!("Comment list served from cache");
                ResponseEnvelope::success("Comments have been retrieved!", Some(list))
            }
            Ok(CommentListLookup::Fetched(list)) => {
                ResponseEnvelope::success("Comments have been retrieved!", Some(list))
            }
            Ok(CommentListLookup::Empty) => {
                CommentError::NotFound("Cannot find any Comment records!".to_string()).envelope()
            }
            Err(e) => e.envelope(),
        }
    }

    #[tracing::instrument(name = "Deleting comment", skip(self))]
    pub async fn delete_comment(&self, comment_id: &str) -> ResponseEnvelope {
        match self.try_delete_comment(comment_id).await {
            Ok(()) => {
                tracing::info!("Comment has been deleted successfully!");
                ResponseEnvelope::success("Comment has been deleted successfully!", None)
            }
            Err(e) => e.envelope(),
        }
    }

    async fn try_register_comment(&self, payload: CommentPayload) -> Result<Value, CommentError> {
        let mut comment = NewComment::parse(payload).map_err(CommentError::ValidationError)?;
        comment.status = CommentStatus::Active;

        self.ensure_references_exist(&comment).await?;

        let record = self
            .store
            .create_comment(&comment)
            .await
            .context("Failed to create comment")?
            .ok_or_else(|| anyhow!("Store returned no record for the new comment"))?;

        to_body(&record)
    }

    async fn try_update_comment(
        &self,
        comment_id: &str,
        mut payload: CommentPayload,
    ) -> Result<Value, CommentError> {
        if payload.status.take().is_some() {
            tracing::debug!("Ignoring client-supplied comment status");
        }
        let comment = NewComment::parse(payload).map_err(CommentError::ValidationError)?;

        self.ensure_references_exist(&comment).await?;

        if !self.verifier.exists(EntityKind::Comment, comment_id).await {
            return Err(CommentError::NotFound(
                "Comment to update does not exist!".to_string(),
            ));
        }
        let id = EntityId::parse(comment_id)
            .map_err(|_| CommentError::ValidationError(vec![ValidationError::InvalidCommentId]))?;

        let record = self
            .store
            .update_comment(id, &comment)
            .await
            .context("Failed to update comment")?
            .ok_or_else(|| anyhow!("Store returned no record for updated comment {id}"))?;

        to_body(&record)
    }

    async fn lookup_comment_list(&self, post_id: &str) -> Result<CommentListLookup, CommentError> {
        let post_id = EntityId::parse(post_id)
            .map_err(|_| CommentError::ValidationError(vec![ValidationError::InvalidPostId]))?;
        let key = CacheKey::CommentList(post_id);

        if let Some(list) = self.cache.get(&key) {
            return Ok(CommentListLookup::CacheHit(list));
        }

        let comments = self
            .store
            .list_comments_by_post(post_id)
            .await
            .context("Failed to retrieve comments for post")?;

        if comments.is_empty() {
            return Ok(CommentListLookup::Empty);
        }

        let list = to_body(&comments)?;
        self.cache.set(key, list.clone(), self.ttl);
        Ok(CommentListLookup::Fetched(list))
    }

    async fn try_delete_comment(&self, comment_id: &str) -> Result<(), CommentError> {
        let id = EntityId::parse(comment_id)
            .map_err(|_| CommentError::ValidationError(vec![ValidationError::InvalidCommentId]))?;

        self.store
            .delete_comment(id)
            .await
            .context("Failed to delete comment")?
            .ok_or_else(|| anyhow!("Store did not delete comment {id}"))?;

        // The owning post's list entry is left to expire on its own.
        self.cache.delete(&CacheKey::Comment(id));
        Ok(())
    }

    async fn ensure_references_exist(&self, comment: &NewComment) -> Result<(), CommentError> {
        if !self
            .verifier
            .exists_by_id(EntityKind::Post, comment.post_id)
            .await
        {
            return Err(CommentError::NotFound(format!(
                "Post {} does not exist!",
                comment.post_id
            )));
        }

        if let Some(parent_id) = comment.parent_comment_id {
            if !self
                .verifier
                .exists_by_id(EntityKind::Comment, parent_id)
                .await
            {
                return Err(CommentError::NotFound(format!(
                    "Parent comment {parent_id} does not exist!"
                )));
            }
        }

        Ok(())
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, CommentError> {
    Ok(serde_json::to_value(value).context("Failed to serialize response body")?)
}
