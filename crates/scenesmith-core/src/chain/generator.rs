use super::model::{GenerateChainRequest, MacroChain};
use crate::error::Result;
use async_trait::async_trait;

/// Remote macro chain generation (`POST /api/generate_chain`).
#[async_trait]
pub trait ChainGenerator: Send + Sync {
    /// Generates a chain. The returned chain has not been validated yet.
    async fn generate(&self, request: &GenerateChainRequest) -> Result<MacroChain>;
}
