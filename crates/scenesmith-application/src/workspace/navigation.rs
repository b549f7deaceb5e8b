use super::session::{SessionTarget, WorkspaceSession};
use crate::context_usecase::ContextUseCase;
use scenesmith_core::navigation::Navigator;
use scenesmith_core::project::{Project, ProjectRepository};
use scenesmith_core::status::{PhaseBadge, TabStatus};
use scenesmith_core::{ScenesmithError, TabId};
use serde::Serialize;
use std::sync::Arc;

/// What the initial URL reconciliation did.
#[derive(Debug, Clone, PartialEq)]
pub enum MountOutcome {
    /// The URL names no session; the selection view stays up.
    NoSession,
    /// The URL matched the already loaded project; only the tab was adopted.
    AlreadyLoaded { session_id: String, tab: TabId },
    /// The project named by the URL was fetched and made active.
    Restored { project: Project, tab: TabId },
    /// The project could not be loaded; the workspace stays empty.
    Failed {
        session_id: String,
        error: ScenesmithError,
    },
    /// The workspace changed while the project was loading.
    Superseded { session_id: String },
}

/// One entry of the tab bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
    pub tab: TabId,
    pub title: &'static str,
    pub enabled: bool,
    pub active: bool,
    /// `gray` for disabled tabs, otherwise derived from the context
    pub status: Option<TabStatus>,
}

/// Keeps `{session_id, active_tab}` in step with the URL.
pub struct TabNavigationController {
    workspace: Arc<WorkspaceSession>,
    projects: Arc<dyn ProjectRepository>,
    context: Arc<ContextUseCase>,
    navigator: Arc<dyn Navigator>,
}

impl TabNavigationController {
    pub fn new(
        workspace: Arc<WorkspaceSession>,
        projects: Arc<dyn ProjectRepository>,
        context: Arc<ContextUseCase>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            workspace,
            projects,
            context,
            navigator,
        }
    }

    /// Reconciles the workspace with the current location.
    ///
    /// Failures are logged and reported in the outcome; they never leave a
    /// half-loaded project behind.
    pub async fn mount(&self) -> MountOutcome {
        let route = self.navigator.current();
        let Some(session_id) = route.session_id.clone() else {
            return MountOutcome::NoSession;
        };
        let tab = route.tab_or_default();

        if self.workspace.session_id().await.as_deref() == Some(session_id.as_str()) {
            self.workspace.set_active_tab(tab).await;
            return MountOutcome::AlreadyLoaded { session_id, tab };
        }

        let epoch = self.workspace.epoch().await;
        let project = match self.projects.find_by_id(&session_id).await {
            Ok(Some(project)) => project,
            Ok(None) => {
                tracing::warn!("[TabNavigation] Project {} from URL not found", session_id);
                return MountOutcome::Failed {
                    error: ScenesmithError::not_found("Project", &session_id),
                    session_id,
                };
            }
            Err(error) => {
                tracing::error!(
                    "[TabNavigation] Failed to load project {} from URL: {}",
                    session_id,
                    error
                );
                return MountOutcome::Failed { session_id, error };
            }
        };

        let Some(epoch) = self
            .workspace
            .activate_if_epoch(epoch, project.clone(), tab)
            .await
        else {
            tracing::debug!("[TabNavigation] Dropping late project load for {}", session_id);
            return MountOutcome::Superseded { session_id };
        };
        tracing::info!("[TabNavigation] Restored project {} on tab {}", project.id, tab);

        self.load_context(SessionTarget { session_id, epoch }).await;
        MountOutcome::Restored { project, tab }
    }

    /// Follows an externally supplied project. `None` is ignored.
    ///
    /// A different project gets its context fetched; the same project again
    /// changes nothing.
    pub async fn on_project_changed(&self, project: Option<Project>) {
        let Some(project) = project else {
            return;
        };
        let session_id = project.id.clone();
        if let Some(epoch) = self.workspace.adopt(project).await {
            self.load_context(SessionTarget { session_id, epoch }).await;
        }
    }

    async fn load_context(&self, target: SessionTarget) {
        if let Err(e) = self.context.refresh_for(&target).await {
            tracing::warn!(
                "[TabNavigation] Failed to load context for {}: {}",
                target.session_id,
                e
            );
        }
    }

    /// Switches tabs and records the switch in the URL.
    ///
    /// Returns `false` without navigating when no project is active or the
    /// tab is disabled.
    pub async fn set_active_tab(&self, tab: TabId) -> bool {
        if !tab.is_enabled() {
            tracing::debug!("[TabNavigation] Tab {} is disabled", tab);
            return false;
        }
        let Some(session_id) = self.workspace.session_id().await else {
            return false;
        };
        if !self.workspace.set_active_tab(tab).await {
            return false;
        }
        self.navigator.push_workspace(&session_id, tab);
        true
    }

    /// Leaves the workspace for the project selection view.
    pub async fn switch_project(&self) {
        self.workspace.clear().await;
        self.navigator.push_selection();
        tracing::info!("[TabNavigation] Switched to project selection");
    }

    /// Tab bar entries in display order.
    pub async fn tab_views(&self) -> Vec<TabView> {
        let state = self.workspace.state().await;
        let snapshot = state.context.as_ref().map(|_| state.snapshot());
        TabId::ALL
            .into_iter()
            .map(|tab| {
                let enabled = tab.is_enabled();
                let status = if enabled {
                    snapshot.and_then(|snapshot| snapshot.tab_status(tab))
                } else {
                    Some(TabStatus::Gray)
                };
                TabView {
                    tab,
                    title: tab.title(),
                    enabled,
                    active: state.is_project_active() && state.active_tab == tab,
                    status,
                }
            })
            .collect()
    }

    pub async fn phase(&self) -> PhaseBadge {
        self.workspace.state().await.phase()
    }
}
