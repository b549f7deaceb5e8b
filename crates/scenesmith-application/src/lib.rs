//! Application layer for Scenesmith.
//!
//! Controllers and use cases that drive the campaign workspace: project
//! lifecycle, tab navigation, context mutations, the character roster and
//! chain generation. All of them share a single [`WorkspaceSession`].

pub mod app;
pub mod chain_usecase;
pub mod characters_usecase;
pub mod context_usecase;
pub mod project_lifecycle;
pub mod retry;
pub mod workspace;

pub use app::ScenesmithApp;
pub use chain_usecase::ChainUseCase;
pub use characters_usecase::CharactersUseCase;
pub use context_usecase::ContextUseCase;
pub use project_lifecycle::ProjectLifecycleController;
pub use workspace::{
    MountOutcome, SessionTarget, TabNavigationController, TabView, WorkspaceSession,
    WorkspaceState,
};
