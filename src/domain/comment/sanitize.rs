use super::CommentPayload;

const ENTITIES: [(&str, char); 5] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
];

/// HTML-escapes every field that contains at least one alphabetic character.
///
/// Values are unescaped before being escaped again, so feeding an already
/// sanitized payload back in returns it unchanged.
#[tracing::instrument(name = "Sanitizing comment payload", skip_all)]
pub fn sanitize(mut payload: CommentPayload) -> CommentPayload {
    for field in payload.fields_mut() {
        if let Some(value) = field.as_mut() {
            if value.chars().any(char::is_alphabetic) {
                *value = escape_html(&unescape_html(value));
            }
        }
    }
    payload
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn unescape_html(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(pos) = rest.find('&') {
        unescaped.push_str(&rest[..pos]);
        rest = &rest[pos..];

        match ENTITIES
            .iter()
            .find(|(entity, _)| rest.starts_with(entity))
        {
            Some((entity, ch)) => {
                unescaped.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                unescaped.push('&');
                rest = &rest[1..];
            }
        }
    }

    unescaped.push_str(rest);
    unescaped
}
