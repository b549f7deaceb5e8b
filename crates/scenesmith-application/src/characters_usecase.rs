use crate::context_usecase::ContextUseCase;
use crate::workspace::WorkspaceSession;
use scenesmith_core::Result;
use scenesmith_core::characters::{CharacterRoster, CharactersRepository};
use scenesmith_core::context::SessionContext;
use std::sync::Arc;

/// Character roster of the active project.
pub struct CharactersUseCase {
    workspace: Arc<WorkspaceSession>,
    characters: Arc<dyn CharactersRepository>,
    context: Arc<ContextUseCase>,
}

impl CharactersUseCase {
    pub fn new(
        workspace: Arc<WorkspaceSession>,
        characters: Arc<dyn CharactersRepository>,
        context: Arc<ContextUseCase>,
    ) -> Self {
        Self {
            workspace,
            characters,
            context,
        }
    }

    pub async fn list(&self) -> Result<CharacterRoster> {
        let target = self.workspace.target().await?;
        self.characters.list(&target.session_id).await
    }

    /// Locks or unlocks the roster; the returned context replaces the cached
    /// one unless the project changed meanwhile.
    pub async fn set_locked(&self, locked: bool) -> Result<SessionContext> {
        let target = self.workspace.target().await?;
        let context = self.characters.set_locked(&target.session_id, locked).await?;
        tracing::info!(
            "[CharactersUseCase] {} characters for {}",
            if locked { "Locked" } else { "Unlocked" },
            target.session_id
        );
        self.context.apply(&target, context).await
    }
}
