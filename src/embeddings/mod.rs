//! Text embedding clients for Vertex AI and Google AI.

use std::sync::Arc;

use crate::client::ClientBase;
use crate::endpoint::EndpointProvider;
use crate::error::{verify_not_blank, ConnectorError};
use crate::http::HttpRequestFactory;
use crate::models::{
    GoogleAIEmbeddingRequest, GoogleAIEmbeddingResponse, RequestType, VertexAIEmbeddingRequest,
    VertexAIEmbeddingResponse,
};

fn verify_not_empty(data: &[String]) -> Result<(), ConnectorError> {
    if data.is_empty() {
        return Err(ConnectorError::invalid_argument(
            "data",
            "at least one text is required",
        ));
    }
    Ok(())
}

/// Embeds texts with a Vertex AI embedding model through `:predict`.
#[derive(Debug, Clone)]
pub struct VertexAIEmbeddingsClient {
    base: ClientBase,
    model_id: String,
}

impl VertexAIEmbeddingsClient {
    /// Creates a client for `model_id`, e.g. `textembedding-gecko`.
    ///
    /// # Errors
    ///
    /// Returns an error if `model_id` is blank.
    pub fn new(
        http_client: reqwest::Client,
        model_id: impl Into<String>,
        request_factory: Arc<dyn HttpRequestFactory>,
        endpoint_provider: Arc<dyn EndpointProvider>,
    ) -> Result<Self, ConnectorError> {
        let model_id = model_id.into();
        verify_not_blank("model_id", &model_id)?;
        Ok(Self {
            base: ClientBase::new(http_client, request_factory, endpoint_provider),
            model_id,
        })
    }

    /// The model this client talks to.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Embeds every text, returning one vector per text in input order.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::InvalidArgument`] without sending anything if
    /// `data` is empty. Otherwise returns the error of the call.
    pub async fn generate_embeddings(
        &self,
        data: &[String],
    ) -> Result<Vec<Vec<f32>>, ConnectorError> {
        verify_not_empty(data)?;
        let request = VertexAIEmbeddingRequest::from_data(data);
        let url = self.base.endpoint_provider().embeddings_endpoint(&self.model_id);

        let response: VertexAIEmbeddingResponse = self
            .base
            .post_json(&self.model_id, RequestType::Predict, &url, &request)
            .await?;

        Ok(response
            .predictions
            .into_iter()
            .map(|prediction| prediction.embeddings.values)
            .collect())
    }
}

/// Embeds texts with a Google AI embedding model through `:batchEmbedContents`.
#[derive(Debug, Clone)]
pub struct GoogleAIEmbeddingsClient {
    base: ClientBase,
    model_id: String,
}

impl GoogleAIEmbeddingsClient {
    /// Creates a client for `model_id`, e.g. `text-embedding-004`.
    ///
    /// # Errors
    ///
    /// Returns an error if `model_id` is blank.
    pub fn new(
        http_client: reqwest::Client,
        model_id: impl Into<String>,
        request_factory: Arc<dyn HttpRequestFactory>,
        endpoint_provider: Arc<dyn EndpointProvider>,
    ) -> Result<Self, ConnectorError> {
        let model_id = model_id.into();
        verify_not_blank("model_id", &model_id)?;
        Ok(Self {
            base: ClientBase::new(http_client, request_factory, endpoint_provider),
            model_id,
        })
    }

    /// The model this client talks to.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Embeds every text, returning one vector per text in input order.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::InvalidArgument`] without sending anything if
    /// `data` is empty. Otherwise returns the error of the call.
    pub async fn generate_embeddings(
        &self,
        data: &[String],
    ) -> Result<Vec<Vec<f32>>, ConnectorError> {
        verify_not_empty(data)?;
        let request = GoogleAIEmbeddingRequest::from_data(&self.model_id, data);
        let url = self.base.endpoint_provider().embeddings_endpoint(&self.model_id);

        let response: GoogleAIEmbeddingResponse = self
            .base
            .post_json(&self.model_id, RequestType::BatchEmbedContents, &url, &request)
            .await?;

        Ok(response
            .embeddings
            .into_iter()
            .map(|embedding| embedding.values)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VertexAIConfig;
    use crate::endpoint::VertexAIGeminiEndpointProvider;
    use crate::http::VertexAIGeminiHttpRequestFactory;

    #[tokio::test]
    async fn empty_input_is_rejected() {
        let config = VertexAIConfig::new("project", "us-central1", "token");
        let client = VertexAIEmbeddingsClient::new(
            reqwest::Client::new(),
            "textembedding-gecko",
            Arc::new(VertexAIGeminiHttpRequestFactory::new("token")),
            Arc::new(VertexAIGeminiEndpointProvider::new(&config).unwrap()),
        )
        .unwrap();

        let err = client.generate_embeddings(&[]).await.unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
