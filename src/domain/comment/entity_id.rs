use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a post, comment or user.
///
/// Ids travel as strings in request bodies and paths; only a run of ASCII
/// digits that fits in a positive `i64` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64")]
pub struct EntityId(i64);

impl EntityId {
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Err("Invalid id: cannot be empty.".to_string());
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("Invalid id: `{s}` must only contain digits."));
        }

        let value = s
            .parse::<i64>()
            .map_err(|_| format!("Invalid id: `{s}` is out of range."))?;

        if value == 0 {
            return Err("Invalid id: must be greater than zero.".to_string());
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for EntityId {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err("Invalid id: must be greater than zero.".to_string());
        }
        Ok(Self(value))
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
