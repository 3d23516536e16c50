use super::{CommentPayload, CommentStatus, CommentText, EntityId, NewComment};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid User ID! User ID must be a number!")]
    InvalidUserId,

    #[error("Invalid Post ID! Post ID must be a number!")]
    InvalidPostId,

    #[error("Invalid Parent Comment ID! Parent Comment ID must be a number or null!")]
    InvalidParentCommentId,

    #[error("Invalid Comment ID! Comment ID must be a number!")]
    InvalidCommentId,

    #[error("Invalid Comment! Comment must be a string no more than 200 characters!")]
    InvalidComment,
}

/// Runs every payload check and returns all failures; an empty list means
/// the payload is valid.
///
/// A `"null"` (or empty) parent comment id is normalized to `None`.
#[tracing::instrument(name = "Validating comment payload", skip_all)]
pub fn validate(payload: &mut CommentPayload) -> Vec<ValidationError> {
    match check(payload) {
        Ok(_) => Vec::new(),
        Err(errors) => errors,
    }
}

pub(super) fn check(payload: &mut CommentPayload) -> Result<NewComment, Vec<ValidationError>> {
    normalize_parent_comment_id(payload);

    let user_id = required_id(payload.user_id.as_deref(), ValidationError::InvalidUserId);
    let post_id = required_id(payload.post_id.as_deref(), ValidationError::InvalidPostId);
    let parent_comment_id = payload
        .parent_comment_id
        .as_deref()
        .map(|raw| EntityId::parse(raw).map_err(|_| ValidationError::InvalidParentCommentId))
        .transpose();
    let text = payload
        .comment
        .as_deref()
        .ok_or(ValidationError::InvalidComment)
        .and_then(|raw| CommentText::parse(raw).map_err(|_| ValidationError::InvalidComment));

    match (user_id, post_id, parent_comment_id, text) {
        (Ok(user_id), Ok(post_id), Ok(parent_comment_id), Ok(text)) => Ok(NewComment {
            user_id,
            post_id,
            parent_comment_id,
            text,
            status: CommentStatus::Active,
        }),
        (user_id, post_id, parent_comment_id, text) => Err([
            user_id.err(),
            post_id.err(),
            parent_comment_id.err(),
            text.err(),
        ]
        .into_iter()
        .flatten()
        .collect()),
    }
}

fn normalize_parent_comment_id(payload: &mut CommentPayload) {
    if matches!(payload.parent_comment_id.as_deref(), Some("null") | Some("")) {
        payload.parent_comment_id = None;
    }
}

fn required_id(raw: Option<&str>, error: ValidationError) -> Result<EntityId, ValidationError> {
    raw.and_then(|raw| EntityId::parse(raw).ok()).ok_or(error)
}
