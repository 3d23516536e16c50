use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Comment body as sent by clients, before sanitization and validation.
///
/// Every field is optional on the wire and may be a JSON string or number;
/// numbers are kept in their decimal string form so that validation sees
/// exactly what the client sent.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_id: Option<String>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub post_id: Option<String>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub parent_comment_id: Option<String>,

    #[serde(default, alias = "text", deserialize_with = "string_or_number")]
    pub comment: Option<String>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub status: Option<String>,
}

impl CommentPayload {
    pub(crate) fn fields_mut(&mut self) -> [&mut Option<String>; 5] {
        [
            &mut self.user_id,
            &mut self.post_id,
            &mut self.parent_comment_id,
            &mut self.comment,
            &mut self.status,
        ]
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
