//! Project repository trait.

use super::model::Project;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract store of projects.
///
/// Decouples the lifecycle logic from the remote API that actually owns the
/// project list.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Lists all projects. An empty list is a valid answer.
    async fn list_all(&self) -> Result<Vec<Project>>;

    /// Finds a project by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Project))`: Project found
    /// - `Ok(None)`: Project does not exist
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, project_id: &str) -> Result<Option<Project>>;

    /// Creates a project with the given (already validated) title.
    async fn create(&self, title: &str) -> Result<Project>;

    /// Deletes a project.
    async fn delete(&self, project_id: &str) -> Result<()>;
}
