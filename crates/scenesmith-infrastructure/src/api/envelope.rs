use scenesmith_core::error::FieldError;
use scenesmith_core::{Result, ScenesmithError};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A decoded `{ "ok": bool, ... }` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub ok: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ApiEnvelope {
    /// Fails with [`ScenesmithError::Api`] when `ok` is false.
    pub fn ensure_ok(self) -> Result<Self> {
        if self.ok {
            return Ok(self);
        }
        let message = ["error", "message", "detail"]
            .iter()
            .find_map(|key| self.fields.get(*key).and_then(Value::as_str))
            .unwrap_or("request failed")
            .to_string();
        Err(ScenesmithError::api(message))
    }

    /// Deserializes the `data` member.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        self.into_field("data")
    }

    /// Deserializes a named member; a missing member reads as `null`.
    pub fn into_field<T: DeserializeOwned>(self, key: &str) -> Result<T> {
        let mut envelope = self.ensure_ok()?;
        let value = envelope.fields.remove(key).unwrap_or(Value::Null);
        Ok(serde_json::from_value(value)?)
    }

    /// Deserializes every member except `ok` as one object.
    pub fn into_body<T: DeserializeOwned>(self) -> Result<T> {
        let envelope = self.ensure_ok()?;
        Ok(serde_json::from_value(Value::Object(envelope.fields))?)
    }
}

/// Maps a non-success response body to an error.
///
/// Understands `{"detail": "..."}`, `{"detail": [{"loc": [...], "msg": ...}]}`
/// (request validation) and `{"error": "..."}`; anything else is passed
/// through as text.
pub fn parse_error_body(status: u16, body: &str) -> ScenesmithError {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        let message = if body.trim().is_empty() {
            format!("request failed with status {status}")
        } else {
            body.trim().to_string()
        };
        return ScenesmithError::http_status(status, message);
    };

    if let Some(Value::Array(items)) = value.get("detail") {
        let errors: Vec<FieldError> = items.iter().filter_map(field_error).collect();
        if !errors.is_empty() {
            return ScenesmithError::Validation(errors);
        }
    }

    let message = ["detail", "error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string());
    ScenesmithError::http_status(status, message)
}

fn field_error(item: &Value) -> Option<FieldError> {
    let message = item.get("msg")?.as_str()?;
    let field = item
        .get("loc")
        .and_then(Value::as_array)
        .map(|loc| {
            loc.iter()
                .filter(|part| part.as_str() != Some("body"))
                .map(|part| match part {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(".")
        })
        .unwrap_or_default();
    Some(FieldError::new(field, message))
}
