//! Chat completion client for the Gemini API.

use std::sync::Arc;

use futures::StreamExt;

use crate::client::{
    check_api_error, chunk_candidates, resolve_settings, valid_candidates, ClientBase,
};
use crate::endpoint::EndpointProvider;
use crate::error::{verify_not_blank, ConnectorError};
use crate::http::HttpRequestFactory;
use crate::kernel::{
    AuthorRole, ChatHistory, ChatMessageContent, StreamingChatMessageContent,
    StreamingChatMessageStream,
};
use crate::metadata::GeminiMetadata;
use crate::models::{GeminiRequest, RequestType};
use crate::settings::GeminiPromptExecutionSettings;

/// Continues a [`ChatHistory`] with a Gemini model.
#[derive(Debug, Clone)]
pub struct GeminiChatCompletionClient {
    base: ClientBase,
    model_id: String,
}

impl GeminiChatCompletionClient {
    /// Creates a client for `model_id`.
    ///
    /// # Arguments
    ///
    /// * `http_client` - The HTTP client used to send requests
    /// * `model_id` - The Gemini model, e.g. `gemini-1.5-flash`
    /// * `request_factory` - Builds the authenticated requests
    /// * `endpoint_provider` - Maps the model to its URLs
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
        history: &ChatHistory,
        settings: Option<&GeminiPromptExecutionSettings>,
    ) -> Result<GeminiRequest, ConnectorError> {
        if history
            .messages()
            .iter()
            .all(|message| message.role == AuthorRole::System)
        {
            return Err(ConnectorError::invalid_argument(
                "history",
                "chat history must contain at least one non-system message",
            ));
        }
        let settings = resolve_settings(settings)?;
        GeminiRequest::from_chat_history(history, &settings)
    }

    /// Generates one assistant message per candidate that holds a valid part.
    ///
    /// # Errors
    ///
    /// Fails before any request is sent if the history has no user-visible
    /// message or the settings are invalid. Otherwise returns the error of the call.
    pub async fn generate_chat_message(
        &self,
        history: &ChatHistory,
        settings: Option<&GeminiPromptExecutionSettings>,
    ) -> Result<Vec<ChatMessageContent>, ConnectorError> {
        let request = self.build_request(history, settings)?;
        let url = self
            .base
            .endpoint_provider()
            .chat_completion_endpoint(&self.model_id);

        let response = self
            .base
            .post_json(&self.model_id, RequestType::GenerateContent, &url, &request)
            .await
            .and_then(check_api_error)?;

        Ok(valid_candidates(&response)
            .map(|(candidate, text)| ChatMessageContent {
                role: AuthorRole::Assistant,
                content: text,
                model_id: Some(self.model_id.clone()),
                metadata: Some(GeminiMetadata::from_candidate(&response, candidate)),
            })
            .collect())
    }

    /// Streams the assistant reply.
    ///
    /// # Errors
    ///
    /// Fails like [`GeminiChatCompletionClient::generate_chat_message`] before
    /// the stream starts. Errors while reading the body are yielded by the stream.
    pub async fn stream_generate_chat_message(
        &self,
        history: &ChatHistory,
        settings: Option<&GeminiPromptExecutionSettings>,
    ) -> Result<StreamingChatMessageStream, ConnectorError> {
        let request = self.build_request(history, settings)?;
        let url = self
            .base
            .endpoint_provider()
            .stream_chat_completion_endpoint(&self.model_id);

        let responses = self
            .base
            .post_streaming(&self.model_id, &url, &request)
            .await?;

        let model_id = self.model_id.clone();
        Ok(responses
            .flat_map(move |item| {
                let chunks: Vec<Result<StreamingChatMessageContent, ConnectorError>> = match item
                {
                    Ok(response) => chunk_candidates(&response)
                        .map(|(candidate, text)| {
                            Ok(StreamingChatMessageContent {
                                role: Some(AuthorRole::Assistant),
                                content: text,
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
}
