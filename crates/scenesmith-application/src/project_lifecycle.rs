//! Project lifecycle controller.
//!
//! Owns the cached project list and gates entry into the workspace: creating
//! or selecting a project makes it active, deleting the active project
//! returns to the selection view.

use crate::context_usecase::ContextUseCase;
use crate::retry::with_retry;
use crate::workspace::{SessionTarget, WorkspaceSession};
use scenesmith_core::navigation::Navigator;
use scenesmith_core::project::{Project, ProjectRepository};
use scenesmith_core::{Result, RetryPolicy, ScenesmithError, TabId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct ProjectListState {
    projects: Vec<Project>,
    /// Last error, shown until dismissed or the next success
    error: Option<String>,
}

/// Ids with a delete request outstanding.
type DeletingSet = Mutex<HashSet<String>>;

/// Marks a project as being deleted until dropped.
///
/// Dropping the delete future early releases the id as well.
struct DeleteGuard<'a> {
    deleting: &'a DeletingSet,
    project_id: String,
}

impl<'a> DeleteGuard<'a> {
    fn acquire(deleting: &'a DeletingSet, project_id: &str) -> Option<Self> {
        let inserted = deleting
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(project_id.to_string());
        inserted.then(|| Self {
            deleting,
            project_id: project_id.to_string(),
        })
    }
}

impl Drop for DeleteGuard<'_> {
    fn drop(&mut self) {
        self.deleting
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.project_id);
    }
}

pub struct ProjectLifecycleController {
    workspace: Arc<WorkspaceSession>,
    projects: Arc<dyn ProjectRepository>,
    context: Arc<ContextUseCase>,
    navigator: Arc<dyn Navigator>,
    retry: RetryPolicy,
    state: RwLock<ProjectListState>,
    deleting: DeletingSet,
}

impl ProjectLifecycleController {
    pub fn new(
        workspace: Arc<WorkspaceSession>,
        projects: Arc<dyn ProjectRepository>,
        context: Arc<ContextUseCase>,
        navigator: Arc<dyn Navigator>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            workspace,
            projects,
            context,
            navigator,
            retry,
            state: RwLock::new(ProjectListState::default()),
            deleting: Mutex::new(HashSet::new()),
        }
    }

    /// Cached project list, most recently updated first.
    pub async fn projects(&self) -> Vec<Project> {
        self.state.read().await.projects.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn dismiss_error(&self) {
        self.state.write().await.error = None;
    }

    pub fn is_deleting(&self, project_id: &str) -> bool {
        self.deleting
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(project_id)
    }

    /// Fetches the project list, retrying transient failures.
    ///
    /// An empty list is a valid answer and is not retried.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let repository = &self.projects;
        let result = with_retry(&self.retry, "list projects", || repository.list_all()).await;

        let mut state = self.state.write().await;
        match result {
            Ok(mut projects) => {
                projects.sort_by(Project::recent_first);
                tracing::debug!("[ProjectLifecycle] Loaded {} projects", projects.len());
                state.projects = projects.clone();
                state.error = None;
                Ok(projects)
            }
            Err(e) => {
                tracing::error!("[ProjectLifecycle] Failed to load projects: {}", e);
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Creates a project, makes it active on the overview tab and loads its
    /// context.
    pub async fn create_project(&self, title: &str) -> Result<Project> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ScenesmithError::invalid("title", "must not be empty"));
        }

        let project = match self.projects.create(title).await {
            Ok(project) => project,
            Err(e) => {
                tracing::error!("[ProjectLifecycle] Failed to create project: {}", e);
                self.state.write().await.error = Some(e.to_string());
                return Err(e);
            }
        };
        tracing::info!("[ProjectLifecycle] Created project {}", project.id);

        {
            let mut state = self.state.write().await;
            state.projects.retain(|p| p.id != project.id);
            state.projects.insert(0, project.clone());
            state.error = None;
        }
        self.enter(project.clone()).await;
        Ok(project)
    }

    /// Makes an existing project active on the overview tab and loads its
    /// context.
    pub async fn select_project(&self, project: Project) {
        tracing::info!("[ProjectLifecycle] Selected project {}", project.id);
        self.enter(project).await;
    }

    /// Deletes a project.
    ///
    /// On success the project leaves the cached list; on failure the list is
    /// kept and the error is recorded. A second delete for the same id while
    /// one is running fails with [`ScenesmithError::InFlight`].
    pub async fn delete_project(&self, project_id: &str) -> Result<()> {
        let Some(guard) = DeleteGuard::acquire(&self.deleting, project_id) else {
            tracing::debug!("[ProjectLifecycle] Delete of {} already running", project_id);
            return Err(ScenesmithError::InFlight {
                operation: "delete project",
                id: project_id.to_string(),
            });
        };

        let result = self.projects.delete(project_id).await;
        drop(guard);

        {
            let mut state = self.state.write().await;
            match &result {
                Ok(()) => {
                    state.projects.retain(|p| p.id != project_id);
                    state.error = None;
                }
                Err(e) => {
                    tracing::error!("[ProjectLifecycle] Failed to delete {}: {}", project_id, e);
                    state.error = Some(format!("Failed to delete project: {e}"));
                }
            }
        }
        result?;

        tracing::info!("[ProjectLifecycle] Deleted project {}", project_id);
        if self.workspace.session_id().await.as_deref() == Some(project_id) {
            self.workspace.clear().await;
            self.navigator.push_selection();
        }
        Ok(())
    }

    async fn enter(&self, project: Project) {
        let session_id = project.id.clone();
        let epoch = self.workspace.activate(project, TabId::Overview).await;
        self.navigator.push_workspace(&session_id, TabId::Overview);

        let target = SessionTarget { session_id, epoch };
        if let Err(e) = self.context.refresh_for(&target).await {
            tracing::warn!(
                "[ProjectLifecycle] Failed to load context for {}: {}",
                target.session_id,
                e
            );
        }
    }
}
