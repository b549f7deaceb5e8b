//! Per-block presence/lock view of a session context.

use super::block_type::BlockType;
use super::model::{ContentStatus, SessionContext};

/// Presence and finalization of one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockState {
    #[default]
    Absent,
    /// Present but still editable
    Draft,
    Locked,
}

impl BlockState {
    fn from_flags(present: bool, locked: bool) -> Self {
        match (present, locked) {
            (false, _) => BlockState::Absent,
            (true, false) => BlockState::Draft,
            (true, true) => BlockState::Locked,
        }
    }

    pub fn is_present(self) -> bool {
        self != BlockState::Absent
    }

    pub fn is_locked(self) -> bool {
        self == BlockState::Locked
    }
}

/// Block states of a context, computed once per fetched document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContextSnapshot {
    pub background: BlockState,
    pub characters: BlockState,
    pub macro_chain: BlockState,
    pub scenes: BlockState,
}

impl ContextSnapshot {
    pub fn from_context(context: &SessionContext) -> Self {
        let background = BlockState::from_flags(
            context.background().is_some(),
            context.is_locked(BlockType::Background),
        );

        let characters = match context.characters() {
            Some(block) => BlockState::from_flags(
                true,
                context.is_locked(BlockType::Characters) || block.locked.unwrap_or(false),
            ),
            None => BlockState::Absent,
        };

        let macro_chain = match context.macro_chain() {
            Some(chain) => BlockState::from_flags(true, chain.status == Some(ContentStatus::Locked)),
            None => BlockState::Absent,
        };

        let scenes = match context.scene_details() {
            Some(details) if !details.is_empty() => {
                BlockState::from_flags(true, details.values().any(|detail| detail.is_locked()))
            }
            _ => BlockState::Absent,
        };

        Self {
            background,
            characters,
            macro_chain,
            scenes,
        }
    }
}

impl From<&SessionContext> for ContextSnapshot {
    fn from(context: &SessionContext) -> Self {
        Self::from_context(context)
    }
}
