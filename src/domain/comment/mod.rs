mod comment_text;
mod entity_id;
mod new_comment;
mod payload;
mod sanitize;
mod types;
mod validation;

pub use comment_text::{CommentText, MAX_COMMENT_LENGTH};
pub use entity_id::EntityId;
pub use new_comment::{CommentStatus, NewComment};
pub use payload::CommentPayload;
pub use sanitize::{escape_html, sanitize, unescape_html};
pub use types::{CommentRecord, PostRecord};
pub use validation::{ValidationError, validate};
