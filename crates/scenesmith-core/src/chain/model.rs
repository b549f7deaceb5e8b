use crate::context::{ContentStatus, lenient_default, lenient_option};
use crate::error::{FieldError, Result, ScenesmithError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One scene of a macro chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroScene {
    #[serde(default, deserialize_with = "lenient_default")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_default")]
    pub order: i64,
    #[serde(default, deserialize_with = "lenient_default")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_default")]
    pub objective: String,
}

/// A generated chain of scenes.
///
/// Fields default when missing or mistyped so that partially stored chains
/// can still be read; [`MacroChain::validate`] enforces the shape of fresh
/// responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroChain {
    #[serde(default, deserialize_with = "lenient_default")]
    pub chain_id: String,
    #[serde(default, deserialize_with = "lenient_default")]
    pub scenes: Vec<MacroScene>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub status: Option<ContentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub locked_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub last_updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl MacroChain {
    pub fn is_locked(&self) -> bool {
        self.status == Some(ContentStatus::Locked)
    }

    /// Checks a freshly generated chain before it is applied anywhere.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.chain_id.trim().is_empty() {
            errors.push(FieldError::new("chainId", "must not be empty"));
        }
        if self.scenes.is_empty() {
            errors.push(FieldError::new("scenes", "must contain at least one scene"));
        }
        for (index, scene) in self.scenes.iter().enumerate() {
            if scene.id.trim().is_empty() {
                errors.push(FieldError::new(format!("scenes[{index}].id"), "must not be empty"));
            }
            if scene.title.trim().is_empty() {
                errors.push(FieldError::new(format!("scenes[{index}].title"), "must not be empty"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ScenesmithError::Validation(errors))
        }
    }
}

/// Body of `POST /api/generate_chain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateChainRequest {
    pub concept: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    pub session_id: String,
}

impl GenerateChainRequest {
    pub fn new(session_id: impl Into<String>, concept: impl Into<String>) -> Self {
        Self {
            concept: concept.into(),
            meta: None,
            session_id: session_id.into(),
        }
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Collects every field-level problem at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.concept.trim().is_empty() {
            errors.push(FieldError::new("concept", "must not be empty"));
        }
        if self.session_id.trim().is_empty() {
            errors.push(FieldError::new("sessionId", "must not be empty"));
        }
        if let Some(meta) = &self.meta
            && !meta.is_object()
        {
            errors.push(FieldError::new("meta", "must be an object"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ScenesmithError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scene(id: &str, title: &str) -> MacroScene {
        MacroScene {
            id: id.to_string(),
            order: 1,
            title: title.to_string(),
            objective: "Reach the keep".to_string(),
        }
    }

    #[test]
    fn test_valid_chain() {
        let chain = MacroChain {
            chain_id: "chain_1".to_string(),
            scenes: vec![scene("s1", "Arrival")],
            status: Some(ContentStatus::Generated),
            ..MacroChain::default()
        };
        assert!(chain.validate().is_ok());
    }

    #[test]
    fn test_invalid_chain_reports_every_field() {
        let chain = MacroChain {
            chain_id: " ".to_string(),
            scenes: vec![scene("", "Arrival"), scene("s2", "")],
            ..MacroChain::default()
        };
        let err = chain.validate().unwrap_err();
        let fields: Vec<_> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["chainId", "scenes[0].id", "scenes[1].title"]);
    }

    #[test]
    fn test_chain_without_scenes_is_invalid() {
        let chain = MacroChain {
            chain_id: "chain_1".to_string(),
            ..MacroChain::default()
        };
        assert_eq!(chain.validate().unwrap_err().field_errors()[0].field, "scenes");
    }

    #[test]
    fn test_mistyped_fields_fall_back_and_fail_validation() {
        let chain: MacroChain = serde_json::from_value(json!({
            "chainId": 12,
            "scenes": [{"id": "s1", "order": "one", "title": "Arrival"}],
            "status": "Generated",
            "version": "2"
        }))
        .unwrap();
        assert_eq!(chain.scenes[0].order, 0);
        assert_eq!(chain.version, None);
        assert_eq!(chain.status, Some(ContentStatus::Generated));
        assert_eq!(chain.validate().unwrap_err().field_errors()[0].field, "chainId");
    }

    #[test]
    fn test_request_validation() {
        assert!(GenerateChainRequest::new("p1", "A heist in a floating city").validate().is_ok());

        let err = GenerateChainRequest::new("", "  ")
            .with_meta(json!("tone"))
            .validate()
            .unwrap_err();
        assert_eq!(err.field_errors().len(), 3);
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let body = serde_json::to_value(GenerateChainRequest::new("p1", "concept")).unwrap();
        assert_eq!(body, json!({"concept": "concept", "sessionId": "p1"}));
    }
}
