use crate::chain_usecase::ChainUseCase;
use crate::characters_usecase::CharactersUseCase;
use crate::context_usecase::ContextUseCase;
use crate::project_lifecycle::ProjectLifecycleController;
use crate::workspace::{TabNavigationController, WorkspaceSession};
use scenesmith_core::chain::ChainGenerator;
use scenesmith_core::characters::CharactersRepository;
use scenesmith_core::context::ContextRepository;
use scenesmith_core::navigation::Navigator;
use scenesmith_core::project::ProjectRepository;
use scenesmith_core::{Result, RetryPolicy};
use scenesmith_infrastructure::{
    ApiClient, ClientConfig, HttpChainGenerator, HttpCharactersRepository, HttpContextRepository,
    HttpProjectRepository,
};
use std::sync::Arc;

/// The application root: one [`WorkspaceSession`] shared by every
/// controller and use case.
pub struct ScenesmithApp {
    pub workspace: Arc<WorkspaceSession>,
    pub navigation: TabNavigationController,
    pub projects: ProjectLifecycleController,
    pub context: Arc<ContextUseCase>,
    pub chains: ChainUseCase,
    pub characters: CharactersUseCase,
}

impl ScenesmithApp {
    /// Wires the controllers over the given backends.
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        contexts: Arc<dyn ContextRepository>,
        characters: Arc<dyn CharactersRepository>,
        generator: Arc<dyn ChainGenerator>,
        navigator: Arc<dyn Navigator>,
        retry: RetryPolicy,
    ) -> Self {
        let workspace = Arc::new(WorkspaceSession::new());
        let context = Arc::new(ContextUseCase::new(workspace.clone(), contexts));

        Self {
            navigation: TabNavigationController::new(
                workspace.clone(),
                projects.clone(),
                context.clone(),
                navigator.clone(),
            ),
            projects: ProjectLifecycleController::new(
                workspace.clone(),
                projects,
                context.clone(),
                navigator,
                retry,
            ),
            chains: ChainUseCase::new(workspace.clone(), generator, context.clone()),
            characters: CharactersUseCase::new(workspace.clone(), characters, context.clone()),
            context,
            workspace,
        }
    }

    /// Wires the controllers over the HTTP backends described by `config`.
    pub fn from_config(config: &ClientConfig, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let api = ApiClient::from_config(config)?;
        tracing::debug!("[ScenesmithApp] Using API at {}", api.base_url());

        Ok(Self::new(
            Arc::new(HttpProjectRepository::new(api.clone())),
            Arc::new(HttpContextRepository::new(api.clone())),
            Arc::new(HttpCharactersRepository::new(api.clone())),
            Arc::new(HttpChainGenerator::new(api)),
            navigator,
            config.retry_policy(),
        ))
    }
}
