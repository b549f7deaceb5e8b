//! Context block types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::{Result, ScenesmithError};

/// Block types accepted by the `/api/context/*` endpoints.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BlockType {
    Blueprint,
    PlayerHooks,
    WorldSeeds,
    StylePrefs,
    Custom,
    StoryFacts,
    Background,
    StoryConcept,
    Characters,
}

impl BlockType {
    /// Story facts accumulate from scene details and cannot be locked.
    pub fn is_lockable(self) -> bool {
        !matches!(self, BlockType::StoryFacts)
    }

    /// Parses a block type, rejecting unknown names with a validation error.
    pub fn parse(value: &str) -> Result<BlockType> {
        BlockType::from_str(value).map_err(|_| {
            ScenesmithError::invalid("blockType", format!("unknown block type '{value}'"))
        })
    }
}
