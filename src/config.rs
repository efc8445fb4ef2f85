//! Connection settings for the Google AI, Vertex AI and Weaviate endpoints.

use std::fmt;

use typed_builder::TypedBuilder;

use crate::error::{verify_not_blank, ConnectorError};

/// Default API endpoint for Google's Generative AI service
pub const DEFAULT_GOOGLE_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default Google AI API version
pub const DEFAULT_GOOGLE_AI_API_VERSION: &str = "v1beta";
/// Default Vertex AI API version
pub const DEFAULT_VERTEX_AI_API_VERSION: &str = "v1";

/// Configuration for the Google AI (Gemini API) endpoints.
#[derive(Clone, TypedBuilder)]
#[builder(doc)]
pub struct GoogleAIConfig {
    /// The API key for authentication
    #[builder(setter(into))]
    pub api_key: String,

    /// Scheme and host of the API, without a trailing path
    #[builder(default = DEFAULT_GOOGLE_AI_BASE_URL.to_string(), setter(into))]
    pub base_url: String,

    /// API version path segment
    #[builder(default = DEFAULT_GOOGLE_AI_API_VERSION.to_string(), setter(into))]
    pub api_version: String,
}

impl GoogleAIConfig {
    /// Creates a configuration for the public endpoint with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder().api_key(api_key).build()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `GOOGLE_API_KEY` - The API key for authentication
    /// * `GOOGLE_BASE_URL` - Optional override of the API host
    ///
    /// # Errors
    ///
    /// Returns an error if the required environment variable is not set.
    pub fn from_env() -> Result<Self, ConnectorError> {
        let api_key = std::env::var("GOOGLE_API_KEY")?;
        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("GOOGLE_BASE_URL") {
            config.base_url = base_url;
        }
        Ok(config)
    }

    /// Checks that every required field is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::InvalidArgument`] naming the first blank field.
    pub fn validate(&self) -> Result<(), ConnectorError> {
        verify_not_blank("api_key", &self.api_key)?;
        verify_not_blank("base_url", &self.base_url)?;
        verify_not_blank("api_version", &self.api_version)
    }
}

impl fmt::Debug for GoogleAIConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleAIConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Configuration for the Vertex AI endpoints of one Google Cloud project and location.
#[derive(Clone, TypedBuilder)]
#[builder(doc)]
pub struct VertexAIConfig {
    /// Google Cloud project id
    #[builder(setter(into))]
    pub project_id: String,

    /// Google Cloud region, e.g. `us-central1`
    #[builder(setter(into))]
    pub location: String,

    /// OAuth2 access token sent as a bearer token
    #[builder(setter(into))]
    pub bearer_key: String,

    /// Scheme and host override. Defaults to `https://{location}-aiplatform.googleapis.com`.
    #[builder(default, setter(strip_option, into))]
    pub base_url: Option<String>,

    /// API version path segment
    #[builder(default = DEFAULT_VERTEX_AI_API_VERSION.to_string(), setter(into))]
    pub api_version: String,
}

impl VertexAIConfig {
    /// Creates a configuration for the regional public endpoint.
    pub fn new(
        project_id: impl Into<String>,
        location: impl Into<String>,
        bearer_key: impl Into<String>,
    ) -> Self {
        Self::builder()
            .project_id(project_id)
            .location(location)
            .bearer_key(bearer_key)
            .build()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `VERTEX_PROJECT_ID` - Google Cloud project id
    /// * `VERTEX_LOCATION` - Google Cloud region
    /// * `VERTEX_BEARER_KEY` - OAuth2 access token
    /// * `VERTEX_BASE_URL` - Optional override of the API host
    ///
    /// # Errors
    ///
    /// Returns an error if a required environment variable is not set.
    pub fn from_env() -> Result<Self, ConnectorError> {
        let mut config = Self::new(
            std::env::var("VERTEX_PROJECT_ID")?,
            std::env::var("VERTEX_LOCATION")?,
            std::env::var("VERTEX_BEARER_KEY")?,
        );
        config.base_url = std::env::var("VERTEX_BASE_URL").ok();
        Ok(config)
    }

    /// Returns the scheme and host requests are sent to.
    pub fn host_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}-aiplatform.googleapis.com", self.location))
    }

    /// Checks that every required field is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::InvalidArgument`] naming the first blank field.
    pub fn validate(&self) -> Result<(), ConnectorError> {
        verify_not_blank("project_id", &self.project_id)?;
        verify_not_blank("location", &self.location)?;
        verify_not_blank("bearer_key", &self.bearer_key)?;
        verify_not_blank("api_version", &self.api_version)
    }
}

impl fmt::Debug for VertexAIConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexAIConfig")
            .field("project_id", &self.project_id)
            .field("location", &self.location)
            .field("bearer_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Configuration for a Weaviate instance.
#[derive(Clone, TypedBuilder)]
#[builder(doc)]
pub struct WeaviateConfig {
    /// Base URL of the REST API, e.g. `http://localhost:8080/v1/`
    #[builder(setter(into))]
    pub endpoint: String,

    /// Optional API key sent as a bearer token
    #[builder(default, setter(strip_option, into))]
    pub api_key: Option<String>,
}

impl WeaviateConfig {
    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `WEAVIATE_ENDPOINT` - Base URL of the REST API
    /// * `WEAVIATE_API_KEY` - Optional API key
    ///
    /// # Errors
    ///
    /// Returns an error if `WEAVIATE_ENDPOINT` is not set.
    pub fn from_env() -> Result<Self, ConnectorError> {
        Ok(Self {
            endpoint: std::env::var("WEAVIATE_ENDPOINT")?,
            api_key: std::env::var("WEAVIATE_API_KEY").ok(),
        })
    }
}

impl fmt::Debug for WeaviateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeaviateConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
