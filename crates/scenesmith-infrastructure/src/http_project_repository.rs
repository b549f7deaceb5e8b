//! `ProjectRepository` over the `/api/projects` endpoints.

use crate::api::ApiClient;
use async_trait::async_trait;
use scenesmith_core::project::{Project, ProjectRepository};
use scenesmith_core::{Result, ScenesmithError};
use serde_json::json;

/// Project store backed by the campaign API.
#[derive(Clone, Debug)]
pub struct HttpProjectRepository {
    api: ApiClient,
}

impl HttpProjectRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProjectRepository for HttpProjectRepository {
    async fn list_all(&self) -> Result<Vec<Project>> {
        let url = self.api.endpoint(&["api", "projects"])?;
        let projects: Option<Vec<Project>> = self.api.get_json(url).await?.into_field("data")?;
        Ok(projects.unwrap_or_default())
    }

    async fn find_by_id(&self, project_id: &str) -> Result<Option<Project>> {
        let url = self.api.endpoint(&["api", "projects", project_id])?;
        match self.api.get_json(url).await {
            Ok(envelope) => envelope.into_field("data"),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create(&self, title: &str) -> Result<Project> {
        let url = self.api.endpoint(&["api", "projects"])?;
        let created: Option<Project> = self
            .api
            .post_json(url, &json!({ "title": title }))
            .await?
            .into_field("data")?;
        let project = created
            .ok_or_else(|| ScenesmithError::api("create project response carried no project"))?;
        tracing::info!("[HttpProjectRepository] Created project {}", project.id);
        Ok(project)
    }

    async fn delete(&self, project_id: &str) -> Result<()> {
        let url = self.api.endpoint(&["api", "projects", project_id])?;
        match self.api.delete_json(url).await {
            Ok(envelope) => {
                envelope.ensure_ok()?;
                tracing::info!("[HttpProjectRepository] Deleted project {}", project_id);
                Ok(())
            }
            Err(e) if e.is_not_found() => Err(ScenesmithError::not_found("Project", project_id)),
            Err(e) => Err(e),
        }
    }
}
