// IDE: cargo-fuzz target
// Run with: cargo fuzz run fuzz_sanitize
// Purpose: sanitize must be idempotent and never leave raw markup behind
#![no_main]

use libfuzzer_sys::fuzz_target;
use threadline::domain::{CommentPayload, sanitize};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let payload = CommentPayload {
            comment: Some(text.to_string()),
            ..Default::default()
        };

        let once = sanitize(payload);
        let twice = sanitize(once.clone());
        assert_eq!(once, twice);

        if let Some(comment) = &once.comment {
            if comment.chars().any(char::is_alphabetic) {
                assert!(!comment.contains('<') && !comment.contains('>'));
            }
        }
    }
});
