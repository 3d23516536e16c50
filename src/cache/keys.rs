use std::fmt;
use std::fmt::{Display, Formatter};

use crate::domain::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Post(EntityId),
    Comment(EntityId),
    CommentList(EntityId),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Post(id) => write!(f, "post-{id}"),
            CacheKey::Comment(id) => write!(f, "comment-{id}"),
            CacheKey::CommentList(post_id) => write!(f, "CL-{post_id}"),
        }
    }
}
