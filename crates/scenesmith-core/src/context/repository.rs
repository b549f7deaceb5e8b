//! Session context repository trait.

use super::block_type::BlockType;
use super::health::ContextHealth;
use super::model::SessionContext;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Remote store of per-session context documents.
///
/// Every mutating call returns the full, fresh document; callers replace
/// their cached copy with it rather than merging.
#[async_trait]
pub trait ContextRepository: Send + Sync {
    /// Fetches the context for a session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(context))`: Context exists
    /// - `Ok(None)`: Nothing has been stored for this session yet
    /// - `Err(_)`: Error occurred during retrieval
    async fn get(&self, session_id: &str) -> Result<Option<SessionContext>>;

    /// Appends (merges server-side) data into a block.
    async fn append(
        &self,
        session_id: &str,
        block_type: BlockType,
        data: Value,
    ) -> Result<SessionContext>;

    /// Sets the lock flag of a block.
    async fn set_lock(
        &self,
        session_id: &str,
        block_type: BlockType,
        locked: bool,
    ) -> Result<SessionContext>;

    /// Removes every block of the session context.
    async fn clear(&self, session_id: &str) -> Result<()>;

    /// Reports whether a document is stored and what it holds.
    async fn health(&self, session_id: &str) -> Result<ContextHealth>;
}
