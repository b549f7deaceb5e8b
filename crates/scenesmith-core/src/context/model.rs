//! Session context document.
//!
//! The backend owns this document; the client only ever holds a read-mostly
//! copy that is replaced wholesale after each mutating action. Every field is
//! optional and deserialization is lenient: a half-populated or oddly typed
//! document reads as "absent" instead of failing.

use crate::chain::MacroChain;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use strum::{AsRefStr, Display};

use super::block_type::BlockType;

/// Lifecycle status shared by macro chains and scene details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
pub enum ContentStatus {
    Draft,
    Generated,
    Edited,
    Locked,
    NeedsRegen,
    /// Any status string this client does not know about
    #[serde(other)]
    Unknown,
}

/// The `characters` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharactersBlock {
    #[serde(default, deserialize_with = "lenient_default")]
    pub characters: Vec<Value>,
    /// Block-local lock flag, honoured alongside `locks.characters`
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub locked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub locked_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub version: Option<u64>,
}

/// The `custom` block. Only `macroChain` is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomBlock {
    #[serde(
        rename = "macroChain",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_option"
    )]
    pub macro_chain: Option<MacroChain>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Detailed content of one scene of the macro chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDetail {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub scene_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub status: Option<ContentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub sequence: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub version: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SceneDetail {
    pub fn is_locked(&self) -> bool {
        self.status == Some(ContentStatus::Locked)
    }
}

/// Named sections of campaign data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextBlocks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub characters: Option<CharactersBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub custom: Option<CustomBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub story_facts: Option<Vec<Value>>,
    #[serde(
        rename = "sceneDetails",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_option"
    )]
    pub scene_details: Option<HashMap<String, SceneDetail>>,
    /// Blocks this client does not interpret (blueprint, world_seeds, ...)
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// The per-project session context document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_default")]
    pub blocks: ContextBlocks,
    /// Lock flags keyed by block type; non-boolean values are dropped
    #[serde(default, deserialize_with = "lenient_locks")]
    pub locks: HashMap<String, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(default, deserialize_with = "lenient_default")]
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub scene_details: Option<HashMap<String, SceneDetail>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub macro_chains: Option<HashMap<String, MacroChain>>,
}

impl SessionContext {
    /// An empty context for the given session.
    pub fn empty(session_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            ..Self::default()
        }
    }

    /// Lock flag for a block type; absent means unlocked.
    pub fn is_locked(&self, block: BlockType) -> bool {
        self.locks.get(block.as_ref()).copied().unwrap_or(false)
    }

    /// The background block, if present and non-null.
    pub fn background(&self) -> Option<&Value> {
        self.blocks.background.as_ref().filter(|v| !v.is_null())
    }

    pub fn characters(&self) -> Option<&CharactersBlock> {
        self.blocks.characters.as_ref()
    }

    /// The macro chain shown in the workspace (`blocks.custom.macroChain`).
    pub fn macro_chain(&self) -> Option<&MacroChain> {
        self.blocks.custom.as_ref()?.macro_chain.as_ref()
    }

    /// Scene details, read from `blocks.sceneDetails` first and the
    /// top-level `sceneDetails` otherwise.
    pub fn scene_details(&self) -> Option<&HashMap<String, SceneDetail>> {
        self.blocks
            .scene_details
            .as_ref()
            .filter(|details| !details.is_empty())
            .or(self.scene_details.as_ref())
    }
}

/// Reads any value; shapes that do not fit `T` fall back to `T::default()`.
pub(crate) fn lenient_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Reads any value; shapes that do not fit `T` become `None`.
pub(crate) fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

fn lenient_locks<'de, D>(deserializer: D) -> Result<HashMap<String, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(map) = value else {
        return Ok(HashMap::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(key, flag)| flag.as_bool().map(|flag| (key, flag)))
        .collect())
}
