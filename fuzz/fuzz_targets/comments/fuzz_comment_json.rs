// IDE: cargo-fuzz target
// Run with: cargo fuzz run fuzz_comment_json
// Purpose: fuzz raw request bodies -> CommentPayload -> NewComment::parse
#![no_main]

use libfuzzer_sys::fuzz_target;
use threadline::domain::{CommentPayload, NewComment, sanitize, validate};

fuzz_target!(|data: &[u8]| {
    if let Ok(payload) = serde_json::from_slice::<CommentPayload>(data) {
        let mut sanitized = sanitize(payload.clone());
        let errors = validate(&mut sanitized);

        // parse is sanitize + validate, so both must agree
        assert_eq!(errors.is_empty(), NewComment::parse(payload).is_ok());
    }
});
