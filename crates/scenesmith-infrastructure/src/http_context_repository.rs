//! `ContextRepository` over the `/api/context/*` endpoints.

use crate::api::ApiClient;
use async_trait::async_trait;
use scenesmith_core::context::{BlockType, ContextHealth, ContextRepository, SessionContext};
use scenesmith_core::{Result, ScenesmithError};
use serde_json::{Value, json};

#[derive(Clone, Debug)]
pub struct HttpContextRepository {
    api: ApiClient,
}

impl HttpContextRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn missing_context(operation: &str) -> ScenesmithError {
        ScenesmithError::api(format!("{operation} response carried no context"))
    }
}

#[async_trait]
impl ContextRepository for HttpContextRepository {
    async fn get(&self, session_id: &str) -> Result<Option<SessionContext>> {
        let mut url = self.api.endpoint(&["api", "context", "get"])?;
        url.query_pairs_mut().append_pair("sessionId", session_id);
        self.api.get_json(url).await?.into_field("data")
    }

    async fn append(
        &self,
        session_id: &str,
        block_type: BlockType,
        data: Value,
    ) -> Result<SessionContext> {
        let url = self.api.endpoint(&["api", "context", "append"])?;
        let body = json!({
            "sessionId": session_id,
            "blockType": block_type,
            "data": data,
        });
        let context: Option<SessionContext> =
            self.api.post_json(url, &body).await?.into_field("data")?;
        tracing::debug!("[HttpContextRepository] Appended {} for {}", block_type, session_id);
        context.ok_or_else(|| Self::missing_context("append"))
    }

    async fn set_lock(
        &self,
        session_id: &str,
        block_type: BlockType,
        locked: bool,
    ) -> Result<SessionContext> {
        if !block_type.is_lockable() {
            return Err(ScenesmithError::invalid(
                "blockType",
                format!("{block_type} cannot be locked"),
            ));
        }
        let url = self.api.endpoint(&["api", "context", "lock"])?;
        let body = json!({
            "sessionId": session_id,
            "blockType": block_type,
            "locked": locked,
        });
        let context: Option<SessionContext> =
            self.api.post_json(url, &body).await?.into_field("context")?;
        tracing::debug!(
            "[HttpContextRepository] {} {} for {}",
            if locked { "Locked" } else { "Unlocked" },
            block_type,
            session_id
        );
        context.ok_or_else(|| Self::missing_context("lock"))
    }

    async fn clear(&self, session_id: &str) -> Result<()> {
        let url = self.api.endpoint(&["api", "context", "clear"])?;
        self.api
            .post_json(url, &json!({ "sessionId": session_id }))
            .await?
            .ensure_ok()?;
        tracing::info!("[HttpContextRepository] Cleared context for {}", session_id);
        Ok(())
    }

    async fn health(&self, session_id: &str) -> Result<ContextHealth> {
        let mut url = self.api.endpoint(&["api", "context", "health"])?;
        url.query_pairs_mut().append_pair("sessionId", session_id);
        let health: Option<ContextHealth> = self.api.get_json(url).await?.into_field("data")?;
        health.ok_or_else(|| ScenesmithError::api("health response carried no data"))
    }
}
