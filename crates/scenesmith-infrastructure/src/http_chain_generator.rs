use crate::api::ApiClient;
use async_trait::async_trait;
use scenesmith_core::chain::{ChainGenerator, GenerateChainRequest, MacroChain};
use scenesmith_core::{Result, ScenesmithError};
use serde_json::Value;

/// Calls `POST /api/generate_chain`.
#[derive(Clone, Debug)]
pub struct HttpChainGenerator {
    api: ApiClient,
}

impl HttpChainGenerator {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ChainGenerator for HttpChainGenerator {
    async fn generate(&self, request: &GenerateChainRequest) -> Result<MacroChain> {
        let url = self.api.endpoint(&["api", "generate_chain"])?;
        let data: Value = self.api.post_json(url, request).await?.into_field("data")?;
        if data.is_null() {
            return Err(ScenesmithError::invalid("data", "response carried no chain"));
        }
        serde_json::from_value(data)
            .map_err(|e| ScenesmithError::invalid("data", format!("malformed chain: {e}")))
    }
}
