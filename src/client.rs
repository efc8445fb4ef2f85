//! Text generation client for the Gemini API.
//!
//! [`GeminiTextGenerationClient`] turns a prompt into a Gemini request, sends it
//! through an [`HttpRequestFactory`] to the URL chosen by an [`EndpointProvider`]
//! and projects the response candidates into [`TextContent`] items.

use std::fmt;
use std::sync::Arc;

use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, trace, warn};

use crate::endpoint::EndpointProvider;
use crate::error::{verify_not_blank, ConnectorError};
use crate::http::HttpRequestFactory;
use crate::kernel::{StreamingTextContent, StreamingTextStream, TextContent};
use crate::metadata::GeminiMetadata;
use crate::models::{
    Candidate, CountTokensRequest, CountTokensResponse, GeminiRequest, GeminiResponse,
    JsonObjectSplitter, RequestType,
};
use crate::settings::GeminiPromptExecutionSettings;

/// Default channel buffer size for streaming responses
const DEFAULT_CHANNEL_BUFFER_SIZE: usize = 16;

/// Stream of parsed response objects from a `streamGenerateContent` call.
pub(crate) type ResponseStream = ReceiverStream<Result<GeminiResponse, ConnectorError>>;

/// Transport shared by the Gemini clients.
#[derive(Clone)]
pub(crate) struct ClientBase {
    http_client: reqwest::Client,
    request_factory: Arc<dyn HttpRequestFactory>,
    endpoint_provider: Arc<dyn EndpointProvider>,
}

impl fmt::Debug for ClientBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBase")
            .field("request_factory", &self.request_factory)
            .field("endpoint_provider", &self.endpoint_provider)
            .finish_non_exhaustive()
    }
}

impl ClientBase {
    pub(crate) fn new(
        http_client: reqwest::Client,
        request_factory: Arc<dyn HttpRequestFactory>,
        endpoint_provider: Arc<dyn EndpointProvider>,
    ) -> Self {
        Self {
            http_client,
            request_factory,
            endpoint_provider,
        }
    }

    pub(crate) fn endpoint_provider(&self) -> &dyn EndpointProvider {
        self.endpoint_provider.as_ref()
    }

    /// Sends `body` as JSON and fails on a non-success status.
    async fn send<B>(
        &self,
        model_id: &str,
        request_type: RequestType,
        url: &str,
        body: &B,
    ) -> Result<reqwest::Response, ConnectorError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body)?;
        let request = self
            .request_factory
            .create_post(&self.http_client, url, body)?;

        // The URL is never logged, it may carry the API key.
        debug!(model_id, operation = %request_type, "sending request");
        let response = self.http_client.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(model_id, operation = %request_type, %status, "request failed");
            return Err(ConnectorError::HttpStatus { status, body });
        }

        Ok(response)
    }

    /// Sends `body` and deserializes the whole response body.
    pub(crate) async fn post_json<B, T>(
        &self,
        model_id: &str,
        request_type: RequestType,
        url: &str,
        body: &B,
    ) -> Result<T, ConnectorError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(model_id, request_type, url, body).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Sends `body` and parses the streamed JSON array object by object.
    ///
    /// A spawned task pumps the body into a bounded channel. Dropping the
    /// returned stream closes the channel and the task stops on its next send.
    pub(crate) async fn post_streaming<B>(
        &self,
        model_id: &str,
        url: &str,
        body: &B,
    ) -> Result<ResponseStream, ConnectorError>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .send(model_id, RequestType::StreamGenerateContent, url, body)
            .await?;

        let (tx, rx) = mpsc::channel(DEFAULT_CHANNEL_BUFFER_SIZE);
        let mut bytes = response.bytes_stream();

        tokio::spawn(async move {
            let mut splitter = JsonObjectSplitter::new();

            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        let _ = tx.send(Err(ConnectorError::from(e))).await;
                        return;
                    }
                };
                trace!(bytes = chunk.len(), "received stream chunk");

                for object in splitter.push(&chunk) {
                    let parsed = serde_json::from_slice::<GeminiResponse>(&object)
                        .map_err(ConnectorError::from)
                        .and_then(check_api_error);
                    // The API sends nothing useful after an error object.
                    let failed = matches!(parsed, Err(ConnectorError::Api { .. }));
                    if tx.send(parsed).await.is_err() || failed {
                        return;
                    }
                }
            }

            if splitter.has_partial_object() {
                let _ = tx
                    .send(Err(ConnectorError::stream(
                        "response ended in the middle of a JSON object",
                    )))
                    .await;
            }
        });

        Ok(ReceiverStream::new(rx))
    }
}

/// Turns an `error` object carried by a response body into [`ConnectorError::Api`].
pub(crate) fn check_api_error(response: GeminiResponse) -> Result<GeminiResponse, ConnectorError> {
    match response.error {
        Some(error) => {
            warn!(code = error.code, status = ?error.status, "API returned an error object");
            Err(ConnectorError::Api {
                code: error.code,
                message: error.message,
                status: error.status,
            })
        }
        None => Ok(response),
    }
}

/// Resolves the settings of a call, falling back to the defaults.
pub(crate) fn resolve_settings(
    settings: Option<&GeminiPromptExecutionSettings>,
) -> Result<GeminiPromptExecutionSettings, ConnectorError> {
    let settings = settings.cloned().unwrap_or_default();
    settings.validate()?;
    Ok(settings)
}

/// Candidates holding at least one valid part, with their joined text.
pub(crate) fn valid_candidates(
    response: &GeminiResponse,
) -> impl Iterator<Item = (&Candidate, String)> {
    response.candidates().iter().filter_map(|candidate| {
        let content = candidate.content.as_ref()?;
        if !content.has_valid_part() {
            return None;
        }
        Some((candidate, content.joined_text().unwrap_or_default()))
    })
}

/// Every candidate of a streamed chunk with its text, empty when it carries none.
///
/// The last chunk of a stream often holds only the finish reason and usage data,
/// so candidates without content are kept.
pub(crate) fn chunk_candidates(
    response: &GeminiResponse,
) -> impl Iterator<Item = (&Candidate, String)> {
    response.candidates().iter().map(|candidate| {
        let text = candidate
            .content
            .as_ref()
            .and_then(|content| content.joined_text())
            .unwrap_or_default();
        (candidate, text)
    })
}

/// Generates text with a Gemini model.
#[derive(Debug, Clone)]
pub struct GeminiTextGenerationClient {
    base: ClientBase,
    model_id: String,
}

impl GeminiTextGenerationClient {
    /// Creates a client for `model_id`.
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

    fn build_request(
        &self,
        prompt: &str,
        settings: Option<&GeminiPromptExecutionSettings>,
    ) -> Result<GeminiRequest, ConnectorError> {
        verify_not_blank("prompt", prompt)?;
        let settings = resolve_settings(settings)?;
        Ok(GeminiRequest::from_prompt(prompt, &settings))
    }

    /// Generates one [`TextContent`] per candidate that holds a valid part.
    ///
    /// # Errors
    ///
    /// Fails before any request is sent if the prompt is blank or the settings
    /// are invalid. Otherwise returns the transport error, the HTTP status error
    /// or the deserialization error of the call.
    pub async fn generate_text(
        &self,
        prompt: &str,
        settings: Option<&GeminiPromptExecutionSettings>,
    ) -> Result<Vec<TextContent>, ConnectorError> {
        let request = self.build_request(prompt, settings)?;
        let url = self
            .base
            .endpoint_provider()
            .text_generation_endpoint(&self.model_id);

        let response = self
            .base
            .post_json(&self.model_id, RequestType::GenerateContent, &url, &request)
            .await
            .and_then(check_api_error)?;

        Ok(valid_candidates(&response)
            .map(|(candidate, text)| TextContent {
                text,
                model_id: Some(self.model_id.clone()),
                metadata: Some(GeminiMetadata::from_candidate(&response, candidate)),
            })
            .collect())
    }

    /// Generates text as a stream of chunks, one per candidate of each streamed object.
    ///
    /// # Errors
    ///
    /// Fails like [`GeminiTextGenerationClient::generate_text`] before the stream
    /// starts. Errors while reading the body are yielded by the stream.
    pub async fn stream_generate_text(
        &self,
        prompt: &str,
        settings: Option<&GeminiPromptExecutionSettings>,
    ) -> Result<StreamingTextStream, ConnectorError> {
        let request = self.build_request(prompt, settings)?;
        let url = self
            .base
            .endpoint_provider()
            .stream_text_generation_endpoint(&self.model_id);

        let responses = self
            .base
            .post_streaming(&self.model_id, &url, &request)
            .await?;

        let model_id = self.model_id.clone();
        Ok(responses
            .flat_map(move |item| {
                let chunks: Vec<Result<StreamingTextContent, ConnectorError>> = match item {
                    Ok(response) => chunk_candidates(&response)
                        .map(|(candidate, text)| {
                            Ok(StreamingTextContent {
                                text,
                                choice_index: candidate.index,
                                model_id: Some(model_id.clone()),
                                metadata: Some(GeminiMetadata::from_candidate(
                                    &response, candidate,
                                )),
                            })
                        })
                        .collect(),
                    Err(e) => vec![Err(e)],
                };
                futures::stream::iter(chunks)
            })
            .boxed())
    }

    /// Counts the tokens `prompt` would use.
    ///
    /// # Errors
    ///
    /// Fails before any request is sent if the prompt is blank or the settings
    /// are invalid. Otherwise returns the error of the call.
    pub async fn count_tokens(
        &self,
        prompt: &str,
        settings: Option<&GeminiPromptExecutionSettings>,
    ) -> Result<i32, ConnectorError> {
        let request = CountTokensRequest::from(self.build_request(prompt, settings)?);
        let url = self
            .base
            .endpoint_provider()
            .count_tokens_endpoint(&self.model_id);

        let response: CountTokensResponse = self
            .base
            .post_json(&self.model_id, RequestType::CountTokens, &url, &request)
            .await?;
        Ok(response.total_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::GoogleAIGeminiEndpointProvider;
    use crate::http::GoogleAIGeminiHttpRequestFactory;

    fn response(value: serde_json::Value) -> GeminiResponse {
        serde_json::from_value(value).unwrap()
    }

    fn client(model_id: &str) -> Result<GeminiTextGenerationClient, ConnectorError> {
        GeminiTextGenerationClient::new(
            reqwest::Client::new(),
            model_id,
            Arc::new(GoogleAIGeminiHttpRequestFactory),
            Arc::new(GoogleAIGeminiEndpointProvider::new("key")?),
        )
    }

    #[test]
    fn candidates_without_valid_parts_are_skipped() {
        let response = response(serde_json::json!({
            "candidates": [
                {"index": 0, "content": {"role": "model", "parts": [{"text": "Hello"}, {"text": " there"}]}},
                {"index": 1, "content": {"role": "model", "parts": [{}]}},
                {"index": 2, "finishReason": "SAFETY"}
            ]
        }));

        let projected: Vec<_> = valid_candidates(&response)
            .map(|(candidate, text)| (candidate.index, text))
            .collect();
        assert_eq!(projected, vec![(0, "Hello there".to_string())]);
    }

    #[test]
    fn stream_chunks_keep_candidates_without_content() {
        let response = response(serde_json::json!({
            "candidates": [{"index": 0, "finishReason": "STOP"}],
            "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 5, "totalTokenCount": 8}
        }));

        let projected: Vec<_> = chunk_candidates(&response).collect();
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].1, "");
    }

    #[test]
    fn error_object_becomes_api_error() {
        let err = check_api_error(response(serde_json::json!({
            "error": {"code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED"}
        })))
        .unwrap_err();

        match err {
            ConnectorError::Api { code, message, status } => {
                assert_eq!(code, 429);
                assert_eq!(message, "Resource exhausted");
                assert_eq!(status.as_deref(), Some("RESOURCE_EXHAUSTED"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn blank_model_id_is_rejected() {
        let err = client("  ").unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected_before_sending() {
        let err = client("gemini-pro")
            .unwrap()
            .generate_text(" ", None)
            .await
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
