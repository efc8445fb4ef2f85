//! URL construction for the Gemini operations of Google AI and Vertex AI.

use std::fmt;

use crate::config::{GoogleAIConfig, VertexAIConfig};
use crate::error::ConnectorError;
use crate::models::RequestType;

/// Maps a model id to the absolute URL of each supported operation.
pub trait EndpointProvider: Send + Sync + fmt::Debug {
    /// URL prefix every model URL starts with, ending in `models/`.
    fn models_endpoint(&self) -> &str;

    /// Builds the URL of `request_type` for `model_id`.
    fn endpoint(&self, model_id: &str, request_type: RequestType) -> String;

    /// URL used to embed texts with `model_id`.
    fn embeddings_endpoint(&self, model_id: &str) -> String;

    /// URL of `generateContent`.
    fn text_generation_endpoint(&self, model_id: &str) -> String {
        self.endpoint(model_id, RequestType::GenerateContent)
    }

    /// URL of `streamGenerateContent`.
    fn stream_text_generation_endpoint(&self, model_id: &str) -> String {
        self.endpoint(model_id, RequestType::StreamGenerateContent)
    }

    /// Chat completion uses the text generation operation.
    fn chat_completion_endpoint(&self, model_id: &str) -> String {
        self.text_generation_endpoint(model_id)
    }

    /// Streaming chat completion uses the streaming text generation operation.
    fn stream_chat_completion_endpoint(&self, model_id: &str) -> String {
        self.stream_text_generation_endpoint(model_id)
    }

    /// URL of `countTokens`.
    fn count_tokens_endpoint(&self, model_id: &str) -> String {
        self.endpoint(model_id, RequestType::CountTokens)
    }
}

/// Endpoints of the Google AI Gemini API. The API key travels in the query string.
#[derive(Clone)]
pub struct GoogleAIGeminiEndpointProvider {
    base_endpoint: String,
    models_endpoint: String,
    api_key: String,
}

impl GoogleAIGeminiEndpointProvider {
    /// Creates a provider for the public Google AI endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConnectorError> {
        Self::from_config(&GoogleAIConfig::new(api_key))
    }

    /// Creates a provider from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a required configuration field is blank.
    pub fn from_config(config: &GoogleAIConfig) -> Result<Self, ConnectorError> {
        config.validate()?;
        let base_endpoint = format!(
            "{}/{}/",
            config.base_url.trim_end_matches('/'),
            config.api_version
        );
        let models_endpoint = format!("{base_endpoint}models/");
        Ok(Self {
            base_endpoint,
            models_endpoint,
            api_key: config.api_key.clone(),
        })
    }

    /// URL prefix of every Google AI operation.
    pub fn base_endpoint(&self) -> &str {
        &self.base_endpoint
    }
}

impl EndpointProvider for GoogleAIGeminiEndpointProvider {
    fn models_endpoint(&self) -> &str {
        &self.models_endpoint
    }

    fn endpoint(&self, model_id: &str, request_type: RequestType) -> String {
        format!(
            "{}{}:{}?key={}",
            self.models_endpoint, model_id, request_type, self.api_key
        )
    }

    fn embeddings_endpoint(&self, model_id: &str) -> String {
        self.endpoint(model_id, RequestType::BatchEmbedContents)
    }
}

impl fmt::Debug for GoogleAIGeminiEndpointProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleAIGeminiEndpointProvider")
            .field("models_endpoint", &self.models_endpoint)
            .finish_non_exhaustive()
    }
}

/// Endpoints of the Gemini models published on Vertex AI.
#[derive(Debug, Clone)]
pub struct VertexAIGeminiEndpointProvider {
    base_endpoint: String,
    models_endpoint: String,
}

impl VertexAIGeminiEndpointProvider {
    /// Creates a provider for the project and location in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required configuration field is blank.
    pub fn new(config: &VertexAIConfig) -> Result<Self, ConnectorError> {
        config.validate()?;
        let base_endpoint = format!(
            "{}/{}/projects/{}/locations/{}/publishers/google/",
            config.host_url().trim_end_matches('/'),
            config.api_version,
            config.project_id,
            config.location
        );
        let models_endpoint = format!("{base_endpoint}models/");
        Ok(Self {
            base_endpoint,
            models_endpoint,
        })
    }

    /// URL prefix of every operation of the Google publisher.
    pub fn base_endpoint(&self) -> &str {
        &self.base_endpoint
    }
}

impl EndpointProvider for VertexAIGeminiEndpointProvider {
    fn models_endpoint(&self) -> &str {
        &self.models_endpoint
    }

    fn endpoint(&self, model_id: &str, request_type: RequestType) -> String {
        format!("{}{}:{}", self.models_endpoint, model_id, request_type)
    }

    fn embeddings_endpoint(&self, model_id: &str) -> String {
        self.endpoint(model_id, RequestType::Predict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn google_ai_urls_contain_model_and_key() {
        let provider = GoogleAIGeminiEndpointProvider::new("fake-api-key").unwrap();

        assert_eq!(
            provider.text_generation_endpoint("fake-model"),
            "https://generativelanguage.googleapis.com/v1beta/models/fake-model:generateContent?key=fake-api-key"
        );
        assert_eq!(
            provider.stream_chat_completion_endpoint("fake-model"),
            "https://generativelanguage.googleapis.com/v1beta/models/fake-model:streamGenerateContent?key=fake-api-key"
        );
        assert_eq!(
            provider.count_tokens_endpoint("fake-model"),
            "https://generativelanguage.googleapis.com/v1beta/models/fake-model:countTokens?key=fake-api-key"
        );
        assert_eq!(
            provider.embeddings_endpoint("embedding-001"),
            "https://generativelanguage.googleapis.com/v1beta/models/embedding-001:batchEmbedContents?key=fake-api-key"
        );
        assert!(provider
            .chat_completion_endpoint("fake-model")
            .starts_with(provider.base_endpoint()));
    }

    #[test]
    fn vertex_urls_are_scoped_to_project_and_location() {
        let config = VertexAIConfig::new("my-project", "us-central1", "token");
        let provider = VertexAIGeminiEndpointProvider::new(&config).unwrap();

        assert_eq!(
            provider.models_endpoint(),
            "https://us-central1-aiplatform.googleapis.com/v1/projects/my-project/locations/us-central1/publishers/google/models/"
        );
        assert_eq!(
            provider.text_generation_endpoint("gemini-pro"),
            format!("{}gemini-pro:generateContent", provider.models_endpoint())
        );
        assert_eq!(
            provider.stream_text_generation_endpoint("gemini-pro"),
            format!("{}gemini-pro:streamGenerateContent", provider.models_endpoint())
        );
        assert_eq!(
            provider.embeddings_endpoint("textembedding-gecko"),
            format!("{}textembedding-gecko:predict", provider.models_endpoint())
        );
        assert_eq!(
            provider.count_tokens_endpoint("gemini-pro"),
            format!("{}gemini-pro:countTokens", provider.models_endpoint())
        );
    }

    #[test]
    fn base_url_override_is_respected() {
        let config = GoogleAIConfig::builder()
            .api_key("key")
            .base_url("http://127.0.0.1:8080/")
            .build();
        let provider = GoogleAIGeminiEndpointProvider::from_config(&config).unwrap();
        assert_eq!(
            provider.models_endpoint(),
            "http://127.0.0.1:8080/v1beta/models/"
        );
    }

    #[test]
    fn construction_fails_on_blank_configuration() {
        assert!(GoogleAIGeminiEndpointProvider::new("").is_err());
        assert!(
            VertexAIGeminiEndpointProvider::new(&VertexAIConfig::new("p", " ", "t")).is_err()
        );
    }

    #[test]
    fn debug_output_hides_api_key() {
        let provider = GoogleAIGeminiEndpointProvider::new("super-secret").unwrap();
        assert!(!format!("{provider:?}").contains("super-secret"));
    }
}
