//! Weaviate schema lookup.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::WeaviateConfig;
use crate::error::ConnectorError;
use crate::http::request_builder;

/// Request for the schema of a Weaviate instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetSchemaRequest;

impl GetSchemaRequest {
    /// Creates the request.
    pub fn create() -> Self {
        Self
    }

    /// Builds `GET {endpoint}/schema`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting URL is invalid.
    pub fn build(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
    ) -> Result<reqwest::Request, ConnectorError> {
        Ok(self.builder(client, endpoint).build()?)
    }

    fn builder(&self, client: &reqwest::Client, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/schema", endpoint.trim_end_matches('/'));
        request_builder(client, reqwest::Method::GET, &url)
    }
}

/// The classes defined on a Weaviate instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetSchemaResponse {
    /// Every class of the schema
    #[serde(default)]
    pub classes: Vec<ClassSchema>,
}

/// One class of a Weaviate schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassSchema {
    /// Class name
    pub class: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Vectorizer module, `none` when vectors are supplied by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vectorizer: Option<String>,
    /// Properties of the class
    #[serde(default)]
    pub properties: Vec<PropertySchema>,
}

/// One property of a Weaviate class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    /// Property name
    pub name: String,
    /// Weaviate data types, e.g. `["text"]`
    #[serde(default)]
    pub data_type: Vec<String>,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Minimal client for the Weaviate REST API.
#[derive(Debug, Clone)]
pub struct WeaviateClient {
    http_client: reqwest::Client,
    config: WeaviateConfig,
}

impl WeaviateClient {
    /// Creates a client, using a default HTTP client when none is given.
    pub fn new(config: WeaviateConfig, http_client: Option<reqwest::Client>) -> Self {
        Self {
            http_client: http_client.unwrap_or_default(),
            config,
        }
    }

    /// Fetches the schema.
    ///
    /// # Errors
    ///
    /// Returns the transport error, a [`ConnectorError::HttpStatus`] for a
    /// non-success answer, or the deserialization error of the body.
    pub async fn get_schema(&self) -> Result<GetSchemaResponse, ConnectorError> {
        let mut builder =
            GetSchemaRequest::create().builder(&self.http_client, &self.config.endpoint);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        debug!(endpoint = %self.config.endpoint, "fetching weaviate schema");
        let response = self.http_client.execute(builder.build()?).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "weaviate schema request failed");
            return Err(ConnectorError::HttpStatus { status, body });
        }

        Ok(serde_json::from_str(&response.text().await?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HTTP_USER_AGENT;

    #[test]
    fn builds_get_schema_relative_to_endpoint() {
        let client = reqwest::Client::new();
        for endpoint in ["http://localhost:8080/v1", "http://localhost:8080/v1/"] {
            let request = GetSchemaRequest::create().build(&client, endpoint).unwrap();
            assert_eq!(request.method(), reqwest::Method::GET);
            assert_eq!(request.url().as_str(), "http://localhost:8080/v1/schema");
            assert_eq!(request.headers()[reqwest::header::USER_AGENT], HTTP_USER_AGENT);
            assert!(request.body().is_none());
        }
    }

    #[test]
    fn deserializes_schema() {
        let schema: GetSchemaResponse = serde_json::from_value(serde_json::json!({
            "classes": [{
                "class": "Article",
                "description": "News articles",
                "vectorizer": "none",
                "properties": [{"name": "title", "dataType": ["text"]}]
            }]
        }))
        .unwrap();

        assert_eq!(schema.classes.len(), 1);
        assert_eq!(schema.classes[0].class, "Article");
        assert_eq!(schema.classes[0].properties[0].data_type, vec!["text"]);
        assert_eq!(schema.classes[0].properties[0].description, None);
    }
}
