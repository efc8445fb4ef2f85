//! Gemini-specific execution settings.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::ConnectorError;
use crate::kernel::PromptExecutionSettings;
use crate::models::{GenerationConfig, SafetySetting};

/// Generation parameters accepted by the Gemini clients.
///
/// Host-level [`PromptExecutionSettings`] are converted into this type by reading
/// their extension data, so `{"max_tokens": 100, "temperature": 0.2}` maps onto
/// the fields of the same name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct GeminiPromptExecutionSettings {
    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub temperature: Option<f64>,

    /// Nucleus sampling probability mass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub top_p: Option<f64>,

    /// Top-k sampling size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub top_k: Option<i32>,

    /// Maximum number of tokens to generate. Must be at least 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub max_tokens: Option<i32>,

    /// Number of candidates to generate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub candidate_count: Option<i32>,

    /// Sequences that stop generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub stop_sequences: Option<Vec<String>>,

    /// Safety settings applied to the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub safety_settings: Option<Vec<SafetySetting>>,
}

impl GeminiPromptExecutionSettings {
    /// Converts host-level settings into Gemini settings.
    ///
    /// `None` yields the defaults. Keys of the extension data that are not
    /// Gemini settings are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension data does not match the expected field types.
    pub fn from_execution_settings(
        settings: Option<&PromptExecutionSettings>,
    ) -> Result<Self, ConnectorError> {
        let Some(settings) = settings else {
            return Ok(Self::default());
        };

        let extension_data = serde_json::Value::Object(
            settings
                .extension_data
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        );
        Ok(serde_json::from_value(extension_data)?)
    }

    /// Checks values the API would reject.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::InvalidArgument`] if `max_tokens` is less than 1.
    pub fn validate(&self) -> Result<(), ConnectorError> {
        if let Some(max_tokens) = self.max_tokens {
            if max_tokens < 1 {
                return Err(ConnectorError::invalid_argument(
                    "max_tokens",
                    format!("must be at least 1, got {max_tokens}"),
                ));
            }
        }
        Ok(())
    }

    /// Builds the `generationConfig` for a request.
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            max_output_tokens: self.max_tokens,
            candidate_count: self.candidate_count,
            stop_sequences: self.stop_sequences.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HarmCategory, SafetyThreshold};

    #[test]
    fn max_tokens_below_one_is_rejected() {
        for max_tokens in [0, -15] {
            let settings = GeminiPromptExecutionSettings::builder()
                .max_tokens(max_tokens)
                .build();
            let err = settings.validate().unwrap_err();
            assert!(err.is_invalid_argument(), "{err}");
        }
    }

    #[test]
    fn unset_or_positive_max_tokens_is_accepted() {
        assert!(GeminiPromptExecutionSettings::default().validate().is_ok());
        assert!(GeminiPromptExecutionSettings::builder()
            .max_tokens(1)
            .build()
            .validate()
            .is_ok());
    }

    #[test]
    fn converts_from_extension_data() {
        let mut host = PromptExecutionSettings::new().with_model_id("host-model");
        host.extension_data
            .insert("unrelated".into(), serde_json::json!({ "x": 1 }));
        host.extension_data
            .insert("max_tokens".into(), serde_json::json!(102));
        host.extension_data
            .insert("temperature".into(), serde_json::json!(0.45));
        host.extension_data
            .insert("top_p".into(), serde_json::json!(0.6));
        host.extension_data.insert(
            "safety_settings".into(),
            serde_json::json!([{
                "category": "HARM_CATEGORY_DANGEROUS_CONTENT",
                "threshold": "BLOCK_LOW_AND_ABOVE"
            }]),
        );

        let settings = GeminiPromptExecutionSettings::from_execution_settings(Some(&host)).unwrap();

        assert_eq!(settings.max_tokens, Some(102));
        assert_eq!(settings.temperature, Some(0.45));
        assert_eq!(settings.top_p, Some(0.6));
        assert_eq!(
            settings.safety_settings,
            Some(vec![SafetySetting::new(
                HarmCategory::HarmCategoryDangerousContent,
                SafetyThreshold::BlockLowAndAbove
            )])
        );
    }

    #[test]
    fn mistyped_extension_data_is_a_json_error() {
        let mut host = PromptExecutionSettings::new();
        host.extension_data
            .insert("max_tokens".into(), serde_json::json!("lots"));

        let err = GeminiPromptExecutionSettings::from_execution_settings(Some(&host)).unwrap_err();
        assert!(matches!(err, ConnectorError::JsonError(_)));
    }

    #[test]
    fn none_yields_defaults() {
        assert_eq!(
            GeminiPromptExecutionSettings::from_execution_settings(None).unwrap(),
            GeminiPromptExecutionSettings::default()
        );
    }
}
