use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CommentStatus;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub parent_comment_id: Option<i64>,
    pub text: String,
    #[sqlx(try_from = "i16")]
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

// Posts are owned by the content service; only what the existence check
// needs is read here.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}
