use unicode_segmentation::UnicodeSegmentation;

pub const MAX_COMMENT_LENGTH: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentText(String);

impl CommentText {
    pub fn parse(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Invalid comment: cannot be empty.".to_string());
        }

        if !trimmed.chars().any(char::is_alphabetic) {
            return Err("Invalid comment: must contain at least one letter.".to_string());
        }

        let grapheme_count = trimmed.graphemes(true).count();

        if grapheme_count > MAX_COMMENT_LENGTH {
            return Err(format!(
                "Invalid comment: cannot exceed {MAX_COMMENT_LENGTH} characters."
            ));
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for CommentText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommentText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
