use crate::context_usecase::ContextUseCase;
use crate::workspace::WorkspaceSession;
use scenesmith_core::Result;
use scenesmith_core::chain::{ChainGenerator, GenerateChainRequest, MacroChain};
use scenesmith_core::context::BlockType;
use serde_json::{Value, json};
use std::sync::Arc;

/// Generates a macro chain for the active project and stores it in the
/// `custom` block.
pub struct ChainUseCase {
    workspace: Arc<WorkspaceSession>,
    generator: Arc<dyn ChainGenerator>,
    context: Arc<ContextUseCase>,
}

impl ChainUseCase {
    pub fn new(
        workspace: Arc<WorkspaceSession>,
        generator: Arc<dyn ChainGenerator>,
        context: Arc<ContextUseCase>,
    ) -> Self {
        Self {
            workspace,
            generator,
            context,
        }
    }

    /// Generates a chain from `concept`.
    ///
    /// Fails before any request when no project is active or the request is
    /// invalid. A response that does not validate is rejected without touching
    /// any state. Storing the chain is best effort; the context is refetched
    /// afterwards.
    pub async fn generate_chain(&self, concept: &str, meta: Option<Value>) -> Result<MacroChain> {
        let target = self.workspace.target().await?;

        let mut request = GenerateChainRequest::new(&target.session_id, concept.trim());
        if let Some(meta) = meta {
            request = request.with_meta(meta);
        }
        request.validate()?;

        tracing::info!("[ChainUseCase] Generating chain for {}", target.session_id);
        let chain = self.generator.generate(&request).await?;
        if let Err(e) = chain.validate() {
            tracing::warn!("[ChainUseCase] Rejected generated chain: {}", e);
            return Err(e);
        }

        let block = json!({ "macroChain": chain });
        if let Err(e) = self
            .context
            .append_for(&target, BlockType::Custom, block)
            .await
        {
            tracing::warn!(
                "[ChainUseCase] Failed to store chain {} for {}: {}",
                chain.chain_id,
                target.session_id,
                e
            );
        }

        if let Err(e) = self.context.refresh_for(&target).await {
            tracing::warn!(
                "[ChainUseCase] Failed to refresh context for {}: {}",
                target.session_id,
                e
            );
        }

        Ok(chain)
    }
}
