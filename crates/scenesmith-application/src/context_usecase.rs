//! Context use case.
//!
//! Every operation round-trips through the remote store and replaces the
//! workspace's cached context with the document it gets back. Nothing is
//! merged locally.

use crate::workspace::{SessionTarget, WorkspaceSession};
use scenesmith_core::context::{BlockType, ContextHealth, ContextRepository, SessionContext};
use scenesmith_core::{Result, ScenesmithError};
use serde_json::Value;
use std::sync::Arc;

pub struct ContextUseCase {
    workspace: Arc<WorkspaceSession>,
    contexts: Arc<dyn ContextRepository>,
}

impl ContextUseCase {
    pub fn new(workspace: Arc<WorkspaceSession>, contexts: Arc<dyn ContextRepository>) -> Self {
        Self {
            workspace,
            contexts,
        }
    }

    /// Fetches the active session's context and caches it.
    ///
    /// A session without stored context reads as an empty document.
    pub async fn refresh(&self) -> Result<SessionContext> {
        let target = self.workspace.target().await?;
        self.refresh_for(&target).await
    }

    /// Sets the lock flag of a block of the active session.
    pub async fn lock_block(&self, block_type: BlockType, locked: bool) -> Result<SessionContext> {
        if !block_type.is_lockable() {
            return Err(ScenesmithError::invalid(
                "blockType",
                format!("{block_type} cannot be locked"),
            ));
        }
        let target = self.workspace.target().await?;
        let context = self
            .contexts
            .set_lock(&target.session_id, block_type, locked)
            .await?;
        tracing::info!(
            "[ContextUseCase] {} {} for {}",
            if locked { "Locked" } else { "Unlocked" },
            block_type,
            target.session_id
        );
        self.apply(&target, context).await
    }

    /// Appends data to a block of the active session.
    pub async fn append_block(&self, block_type: BlockType, data: Value) -> Result<SessionContext> {
        let target = self.workspace.target().await?;
        self.append_for(&target, block_type, data).await
    }

    /// Clears every block of the active session, then refetches.
    pub async fn clear(&self) -> Result<SessionContext> {
        let target = self.workspace.target().await?;
        self.contexts.clear(&target.session_id).await?;
        tracing::info!("[ContextUseCase] Cleared context for {}", target.session_id);
        self.refresh_for(&target).await
    }

    /// Asks the store what it holds for the active session. Nothing is cached.
    pub async fn health(&self) -> Result<ContextHealth> {
        let target = self.workspace.target().await?;
        self.contexts.health(&target.session_id).await
    }

    pub(crate) async fn refresh_for(&self, target: &SessionTarget) -> Result<SessionContext> {
        let context = self
            .contexts
            .get(&target.session_id)
            .await?
            .unwrap_or_else(|| SessionContext::empty(&target.session_id));
        self.apply(target, context).await
    }

    pub(crate) async fn append_for(
        &self,
        target: &SessionTarget,
        block_type: BlockType,
        data: Value,
    ) -> Result<SessionContext> {
        let context = self
            .contexts
            .append(&target.session_id, block_type, data)
            .await?;
        self.apply(target, context).await
    }

    /// Caches `context` unless the workspace moved on meanwhile; the fetched
    /// document is returned either way.
    pub(crate) async fn apply(
        &self,
        target: &SessionTarget,
        context: SessionContext,
    ) -> Result<SessionContext> {
        if !self.workspace.replace_context(target, context.clone()).await {
            tracing::debug!(
                "[ContextUseCase] Ignoring late context for {}",
                target.session_id
            );
        }
        Ok(context)
    }
}
