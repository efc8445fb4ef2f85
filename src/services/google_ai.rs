use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::{
    chat_as_streaming_text_contents, chat_as_text_contents, chat_message_contents,
    streaming_chat_message_contents, streaming_text_contents, text_contents,
};
use crate::chat::GeminiChatCompletionClient;
use crate::client::GeminiTextGenerationClient;
use crate::config::GoogleAIConfig;
use crate::embeddings::GoogleAIEmbeddingsClient;
use crate::endpoint::GoogleAIGeminiEndpointProvider;
use crate::error::ConnectorError;
use crate::http::GoogleAIGeminiHttpRequestFactory;
use crate::kernel::{
    model_attributes, AIService, ChatCompletionService, ChatHistory, ChatMessageContent,
    PromptExecutionSettings, StreamingChatMessageStream, StreamingTextStream,
    TextContent, TextEmbeddingGenerationService, TextGenerationService,
};

/// Text generation with a Gemini model on Google AI.
#[derive(Debug, Clone)]
pub struct GoogleAIGeminiTextGenerationService {
    client: GeminiTextGenerationClient,
    attributes: HashMap<String, String>,
}

impl GoogleAIGeminiTextGenerationService {
    /// Creates a service for `model_id` on the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if `model_id` or `api_key` is blank.
    pub fn new(
        model_id: impl Into<String>,
        api_key: impl Into<String>,
        http_client: Option<reqwest::Client>,
    ) -> Result<Self, ConnectorError> {
        Self::from_config(model_id, &GoogleAIConfig::new(api_key), http_client)
    }

    /// Creates a service for `model_id` from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `model_id` or a configuration field is blank.
    pub fn from_config(
        model_id: impl Into<String>,
        config: &GoogleAIConfig,
        http_client: Option<reqwest::Client>,
    ) -> Result<Self, ConnectorError> {
        let client = GeminiTextGenerationClient::new(
            http_client.unwrap_or_default(),
            model_id,
            Arc::new(GoogleAIGeminiHttpRequestFactory),
            Arc::new(GoogleAIGeminiEndpointProvider::from_config(config)?),
        )?;
        Ok(Self {
            attributes: model_attributes(client.model_id()),
            client,
        })
    }

    /// The underlying client, for operations such as token counting.
    pub fn client(&self) -> &GeminiTextGenerationClient {
        &self.client
    }
}

impl AIService for GoogleAIGeminiTextGenerationService {
    fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[async_trait]
impl TextGenerationService for GoogleAIGeminiTextGenerationService {
    async fn get_text_contents(
        &self,
        prompt: &str,
        settings: Option<&PromptExecutionSettings>,
    ) -> Result<Vec<TextContent>, ConnectorError> {
        text_contents(&self.client, prompt, settings).await
    }

    async fn get_streaming_text_contents(
        &self,
        prompt: &str,
        settings: Option<&PromptExecutionSettings>,
    ) -> Result<StreamingTextStream, ConnectorError> {
        streaming_text_contents(&self.client, prompt, settings).await
    }
}

/// Chat completion with a Gemini model on Google AI.
///
/// Also usable for text generation: a prompt is sent as a single user message.
#[derive(Debug, Clone)]
pub struct GoogleAIGeminiChatCompletionService {
    client: GeminiChatCompletionClient,
    attributes: HashMap<String, String>,
}

impl GoogleAIGeminiChatCompletionService {
    /// Creates a service for `model_id` on the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if `model_id` or `api_key` is blank.
    pub fn new(
        model_id: impl Into<String>,
        api_key: impl Into<String>,
        http_client: Option<reqwest::Client>,
    ) -> Result<Self, ConnectorError> {
        Self::from_config(model_id, &GoogleAIConfig::new(api_key), http_client)
    }

    /// Creates a service for `model_id` from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `model_id` or a configuration field is blank.
    pub fn from_config(
        model_id: impl Into<String>,
        config: &GoogleAIConfig,
        http_client: Option<reqwest::Client>,
    ) -> Result<Self, ConnectorError> {
        let client = GeminiChatCompletionClient::new(
            http_client.unwrap_or_default(),
            model_id,
            Arc::new(GoogleAIGeminiHttpRequestFactory),
            Arc::new(GoogleAIGeminiEndpointProvider::from_config(config)?),
        )?;
        Ok(Self {
            attributes: model_attributes(client.model_id()),
            client,
        })
    }

    /// The underlying client.
    pub fn client(&self) -> &GeminiChatCompletionClient {
        &self.client
    }
}

impl AIService for GoogleAIGeminiChatCompletionService {
    fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[async_trait]
impl ChatCompletionService for GoogleAIGeminiChatCompletionService {
    async fn get_chat_message_contents(
        &self,
        history: &ChatHistory,
        settings: Option<&PromptExecutionSettings>,
    ) -> Result<Vec<ChatMessageContent>, ConnectorError> {
        chat_message_contents(&self.client, history, settings).await
    }

    async fn get_streaming_chat_message_contents(
        &self,
        history: &ChatHistory,
        settings: Option<&PromptExecutionSettings>,
    ) -> Result<StreamingChatMessageStream, ConnectorError> {
        streaming_chat_message_contents(&self.client, history, settings).await
    }
}

#[async_trait]
impl TextGenerationService for GoogleAIGeminiChatCompletionService {
    async fn get_text_contents(
        &self,
        prompt: &str,
        settings: Option<&PromptExecutionSettings>,
    ) -> Result<Vec<TextContent>, ConnectorError> {
        chat_as_text_contents(&self.client, prompt, settings).await
    }

    async fn get_streaming_text_contents(
        &self,
        prompt: &str,
        settings: Option<&PromptExecutionSettings>,
    ) -> Result<StreamingTextStream, ConnectorError> {
        chat_as_streaming_text_contents(&self.client, prompt, settings).await
    }
}

/// Text embeddings with a Google AI embedding model.
#[derive(Debug, Clone)]
pub struct GoogleAITextEmbeddingGenerationService {
    client: GoogleAIEmbeddingsClient,
    attributes: HashMap<String, String>,
}

impl GoogleAITextEmbeddingGenerationService {
    /// Creates a service for `model_id` on the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if `model_id` or `api_key` is blank.
    pub fn new(
        model_id: impl Into<String>,
        api_key: impl Into<String>,
        http_client: Option<reqwest::Client>,
    ) -> Result<Self, ConnectorError> {
        Self::from_config(model_id, &GoogleAIConfig::new(api_key), http_client)
    }

    /// Creates a service for `model_id` from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `model_id` or a configuration field is blank.
    pub fn from_config(
        model_id: impl Into<String>,
        config: &GoogleAIConfig,
        http_client: Option<reqwest::Client>,
    ) -> Result<Self, ConnectorError> {
        let client = GoogleAIEmbeddingsClient::new(
            http_client.unwrap_or_default(),
            model_id,
            Arc::new(GoogleAIGeminiHttpRequestFactory),
            Arc::new(GoogleAIGeminiEndpointProvider::from_config(config)?),
        )?;
        Ok(Self {
            attributes: model_attributes(client.model_id()),
            client,
        })
    }
}

impl AIService for GoogleAITextEmbeddingGenerationService {
    fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[async_trait]
impl TextEmbeddingGenerationService for GoogleAITextEmbeddingGenerationService {
    async fn generate_embeddings(&self, data: &[String]) -> Result<Vec<Vec<f32>>, ConnectorError> {
        self.client.generate_embeddings(data).await
    }
}
