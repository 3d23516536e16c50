use serde::{Deserialize, Serialize};

use super::{CommentPayload, CommentText, EntityId, ValidationError, sanitize, validation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum CommentStatus {
    Deleted,
    Active,
}

impl From<CommentStatus> for i16 {
    fn from(status: CommentStatus) -> Self {
        match status {
            CommentStatus::Deleted => 0,
            CommentStatus::Active => 1,
        }
    }
}

impl TryFrom<i16> for CommentStatus {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Deleted),
            1 => Ok(Self::Active),
            other => Err(format!("Invalid comment status: {other}")),
        }
    }
}

/// A sanitized, validated comment ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub user_id: EntityId,
    pub post_id: EntityId,
    pub parent_comment_id: Option<EntityId>,
    pub text: CommentText,
    pub status: CommentStatus,
}

impl NewComment {
    pub fn parse(payload: CommentPayload) -> Result<Self, Vec<ValidationError>> {
        let mut payload = sanitize(payload);
        validation::check(&mut payload)
    }
}
