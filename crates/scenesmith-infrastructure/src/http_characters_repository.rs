//! `CharactersRepository` over the `/api/characters/*` endpoints.

use crate::api::ApiClient;
use async_trait::async_trait;
use scenesmith_core::characters::{CharacterRoster, CharactersRepository};
use scenesmith_core::context::SessionContext;
use scenesmith_core::{Result, ScenesmithError};
use serde_json::json;

#[derive(Clone, Debug)]
pub struct HttpCharactersRepository {
    api: ApiClient,
}

impl HttpCharactersRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CharactersRepository for HttpCharactersRepository {
    async fn list(&self, session_id: &str) -> Result<CharacterRoster> {
        let mut url = self.api.endpoint(&["api", "characters", "list"])?;
        url.query_pairs_mut().append_pair("sessionId", session_id);
        let roster: CharacterRoster = self.api.get_json(url).await?.into_body()?;
        tracing::debug!(
            "[HttpCharactersRepository] {} characters for {}",
            roster.len(),
            session_id
        );
        Ok(roster)
    }

    async fn set_locked(&self, session_id: &str, locked: bool) -> Result<SessionContext> {
        let url = self.api.endpoint(&["api", "characters", "lock"])?;
        let body = json!({ "sessionId": session_id, "locked": locked });
        let context: Option<SessionContext> =
            self.api.post_json(url, &body).await?.into_field("data")?;
        context.ok_or_else(|| ScenesmithError::api("characters lock response carried no context"))
    }
}
