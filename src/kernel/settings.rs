use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Provider-neutral execution settings.
///
/// Connectors read the provider-specific values out of `extension_data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptExecutionSettings {
    /// Service the settings are meant for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    /// Model the settings are meant for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// Provider-specific settings, keyed by their snake_case names
    #[serde(flatten)]
    pub extension_data: HashMap<String, serde_json::Value>,
}

impl PromptExecutionSettings {
    /// Creates empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target model.
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    /// Sets the target service.
    pub fn with_service_id(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = Some(service_id.into());
        self
    }

    /// Adds one provider-specific value.
    pub fn with_extension(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extension_data.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattened_json_lands_in_extension_data() {
        let settings: PromptExecutionSettings = serde_json::from_value(serde_json::json!({
            "model_id": "gemini-pro",
            "max_tokens": 256,
            "temperature": 0.1
        }))
        .unwrap();

        assert_eq!(settings.model_id.as_deref(), Some("gemini-pro"));
        assert_eq!(settings.service_id, None);
        assert_eq!(settings.extension_data["max_tokens"], 256);
        assert_eq!(settings.extension_data.len(), 2);
    }
}
