use scenesmith_core::context::{ContextSnapshot, SessionContext};
use scenesmith_core::project::Project;
use scenesmith_core::status::{PhaseBadge, TabStatus, overall_phase, tab_status};
use scenesmith_core::{Result, ScenesmithError, TabId};
use tokio::sync::RwLock;

/// Everything the workspace shows, owned in one place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkspaceState {
    /// The active project, `None` on the selection view
    pub project: Option<Project>,
    pub session_id: Option<String>,
    pub active_tab: TabId,
    /// Last fetched context, replaced wholesale
    pub context: Option<SessionContext>,
    /// Bumped whenever the active project changes
    pub epoch: u64,
}

impl WorkspaceState {
    pub fn is_project_active(&self) -> bool {
        self.session_id.is_some()
    }

    pub fn tab_status(&self, tab: TabId) -> Option<TabStatus> {
        tab_status(self.context.as_ref(), tab)
    }

    pub fn phase(&self) -> PhaseBadge {
        overall_phase(self.context.as_ref())
    }

    pub fn snapshot(&self) -> ContextSnapshot {
        self.context
            .as_ref()
            .map(ContextSnapshot::from_context)
            .unwrap_or_default()
    }
}

/// Session id and epoch captured before an asynchronous action.
///
/// A result is applied only while the workspace still has the same epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTarget {
    pub session_id: String,
    pub epoch: u64,
}

/// Single authoritative owner of the current project, tab and context.
///
/// Controllers share it through an `Arc` and never keep copies of their own.
#[derive(Debug, Default)]
pub struct WorkspaceSession {
    state: RwLock<WorkspaceState>,
}

impl WorkspaceSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn state(&self) -> WorkspaceState {
        self.state.read().await.clone()
    }

    pub async fn session_id(&self) -> Option<String> {
        self.state.read().await.session_id.clone()
    }

    pub async fn project(&self) -> Option<Project> {
        self.state.read().await.project.clone()
    }

    pub async fn context(&self) -> Option<SessionContext> {
        self.state.read().await.context.clone()
    }

    pub async fn active_tab(&self) -> TabId {
        self.state.read().await.active_tab
    }

    pub async fn epoch(&self) -> u64 {
        self.state.read().await.epoch
    }

    /// Captures the current session for an asynchronous action.
    ///
    /// Fails with [`ScenesmithError::MissingSession`] when no project is
    /// active.
    pub async fn target(&self) -> Result<SessionTarget> {
        let state = self.state.read().await;
        let session_id = state
            .session_id
            .clone()
            .ok_or(ScenesmithError::MissingSession)?;
        Ok(SessionTarget {
            session_id,
            epoch: state.epoch,
        })
    }

    /// Whether `target` still names the active session.
    pub async fn is_current(&self, target: &SessionTarget) -> bool {
        let state = self.state.read().await;
        state.epoch == target.epoch && state.session_id.as_deref() == Some(&target.session_id)
    }

    /// Makes `project` the active project and shows `tab`.
    ///
    /// Returns the epoch after the change.
    pub async fn activate(&self, project: Project, tab: TabId) -> u64 {
        let mut state = self.state.write().await;
        Self::switch_to(&mut state, project);
        state.active_tab = tab;
        state.epoch
    }

    /// Activates `project` on `tab` only while the epoch is still `epoch`.
    ///
    /// The comparison and the switch happen under one write lock. Returns the
    /// epoch after the change, or `None` when the workspace moved on.
    pub async fn activate_if_epoch(&self, epoch: u64, project: Project, tab: TabId) -> Option<u64> {
        let mut state = self.state.write().await;
        if state.epoch != epoch {
            return None;
        }
        Self::switch_to(&mut state, project);
        state.active_tab = tab;
        Some(state.epoch)
    }

    /// Adopts an externally supplied project without touching the tab.
    ///
    /// Returns the new epoch when the active project changed, `None` when
    /// `project` was already active.
    pub async fn adopt(&self, project: Project) -> Option<u64> {
        let mut state = self.state.write().await;
        Self::switch_to(&mut state, project).then_some(state.epoch)
    }

    fn switch_to(state: &mut WorkspaceState, project: Project) -> bool {
        let changed = state.session_id.as_deref() != Some(project.id.as_str());
        if changed {
            state.epoch += 1;
            state.context = None;
            tracing::debug!(
                "[WorkspaceSession] Active project -> {} (epoch {})",
                project.id,
                state.epoch
            );
        }
        state.session_id = Some(project.id.clone());
        state.project = Some(project);
        changed
    }

    /// Updates the tab. Does nothing while no project is active.
    pub async fn set_active_tab(&self, tab: TabId) -> bool {
        let mut state = self.state.write().await;
        if state.session_id.is_none() {
            return false;
        }
        state.active_tab = tab;
        true
    }

    /// Returns to "no project selected".
    pub async fn clear(&self) -> u64 {
        let mut state = self.state.write().await;
        state.project = None;
        state.session_id = None;
        state.context = None;
        state.active_tab = TabId::default();
        state.epoch += 1;
        tracing::debug!("[WorkspaceSession] Cleared (epoch {})", state.epoch);
        state.epoch
    }

    /// Replaces the cached context if `target` is still current.
    ///
    /// Returns `false` and leaves the state alone for stale results.
    pub async fn replace_context(&self, target: &SessionTarget, context: SessionContext) -> bool {
        let mut state = self.state.write().await;
        if state.epoch != target.epoch || state.session_id.as_deref() != Some(&target.session_id) {
            tracing::debug!(
                "[WorkspaceSession] Discarding stale context for {} (epoch {} != {})",
                target.session_id,
                target.epoch,
                state.epoch
            );
            return false;
        }
        state.context = Some(context);
        true
    }
}
