use crate::context::lenient_default;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `GET /api/characters/list`.
///
/// A session without a characters block reads as an empty, unlocked roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterRoster {
    #[serde(default, deserialize_with = "lenient_default")]
    pub list: Vec<Value>,
    /// `locks.characters` of the session
    #[serde(default, deserialize_with = "lenient_default")]
    pub locked: bool,
    #[serde(default, deserialize_with = "lenient_default")]
    pub version: u64,
}

impl CharacterRoster {
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Display name of every character; entries without one are `"(unnamed)"`.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.list.iter().map(|character| {
            character
                .get("name")
                .and_then(Value::as_str)
                .filter(|name| !name.trim().is_empty())
                .unwrap_or("(unnamed)")
        })
    }
}
