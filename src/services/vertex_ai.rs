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
use crate::config::VertexAIConfig;
use crate::embeddings::VertexAIEmbeddingsClient;
use crate::endpoint::VertexAIGeminiEndpointProvider;
use crate::error::ConnectorError;
use crate::http::VertexAIGeminiHttpRequestFactory;
use crate::kernel::{
    model_attributes, AIService, ChatCompletionService, ChatHistory, ChatMessageContent,
    PromptExecutionSettings, StreamingChatMessageStream, StreamingTextStream,
    TextContent, TextEmbeddingGenerationService, TextGenerationService,
};

/// Text generation with a Gemini model on Vertex AI.
#[derive(Debug, Clone)]
pub struct VertexAIGeminiTextGenerationService {
    client: GeminiTextGenerationClient,
    attributes: HashMap<String, String>,
}

impl VertexAIGeminiTextGenerationService {
    /// Creates a service for `model_id` in the given project and location.
    ///
    /// # Errors
    ///
    /// Returns an error if any argument is blank.
    pub fn new(
        model_id: impl Into<String>,
        bearer_key: impl Into<String>,
        location: impl Into<String>,
        project_id: impl Into<String>,
        http_client: Option<reqwest::Client>,
    ) -> Result<Self, ConnectorError> {
        let config = VertexAIConfig::new(project_id, location, bearer_key);
        Self::from_config(model_id, &config, http_client)
    }

    /// Creates a service for `model_id` from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `model_id` or a configuration field is blank.
    pub fn from_config(
        model_id: impl Into<String>,
        config: &VertexAIConfig,
        http_client: Option<reqwest::Client>,
    ) -> Result<Self, ConnectorError> {
        let client = GeminiTextGenerationClient::new(
            http_client.unwrap_or_default(),
            model_id,
            Arc::new(VertexAIGeminiHttpRequestFactory::new(&config.bearer_key)),
            Arc::new(VertexAIGeminiEndpointProvider::new(config)?),
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

impl AIService for VertexAIGeminiTextGenerationService {
    fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[async_trait]
impl TextGenerationService for VertexAIGeminiTextGenerationService {
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

/// Chat completion with a Gemini model on Vertex AI.
#[derive(Debug, Clone)]
pub struct VertexAIGeminiChatCompletionService {
    client: GeminiChatCompletionClient,
    attributes: HashMap<String, String>,
}

impl VertexAIGeminiChatCompletionService {
    /// Creates a service for `model_id` in the given project and location.
    ///
    /// # Errors
    ///
    /// Returns an error if any argument is blank.
    pub fn new(
        model_id: impl Into<String>,
        bearer_key: impl Into<String>,
        location: impl Into<String>,
        project_id: impl Into<String>,
        http_client: Option<reqwest::Client>,
    ) -> Result<Self, ConnectorError> {
        let config = VertexAIConfig::new(project_id, location, bearer_key);
        Self::from_config(model_id, &config, http_client)
    }

    /// Creates a service for `model_id` from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `model_id` or a configuration field is blank.
    pub fn from_config(
        model_id: impl Into<String>,
        config: &VertexAIConfig,
        http_client: Option<reqwest::Client>,
    ) -> Result<Self, ConnectorError> {
        let client = GeminiChatCompletionClient::new(
            http_client.unwrap_or_default(),
            model_id,
            Arc::new(VertexAIGeminiHttpRequestFactory::new(&config.bearer_key)),
            Arc::new(VertexAIGeminiEndpointProvider::new(config)?),
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

impl AIService for VertexAIGeminiChatCompletionService {
    fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[async_trait]
impl ChatCompletionService for VertexAIGeminiChatCompletionService {
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
impl TextGenerationService for VertexAIGeminiChatCompletionService {
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

/// Text embeddings with a Vertex AI embedding model.
#[derive(Debug, Clone)]
pub struct VertexAITextEmbeddingGenerationService {
    client: VertexAIEmbeddingsClient,
    attributes: HashMap<String, String>,
}

impl VertexAITextEmbeddingGenerationService {
    /// Creates a service for `model_id` in the given project and location.
    ///
    /// # Errors
    ///
    /// Returns an error if any argument is blank.
    pub fn new(
        model_id: impl Into<String>,
        bearer_key: impl Into<String>,
        location: impl Into<String>,
        project_id: impl Into<String>,
        http_client: Option<reqwest::Client>,
    ) -> Result<Self, ConnectorError> {
        let config = VertexAIConfig::new(project_id, location, bearer_key);
        Self::from_config(model_id, &config, http_client)
    }

    /// Creates a service for `model_id` from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `model_id` or a configuration field is blank.
    pub fn from_config(
        model_id: impl Into<String>,
        config: &VertexAIConfig,
        http_client: Option<reqwest::Client>,
    ) -> Result<Self, ConnectorError> {
        let client = VertexAIEmbeddingsClient::new(
            http_client.unwrap_or_default(),
            model_id,
            Arc::new(VertexAIGeminiHttpRequestFactory::new(&config.bearer_key)),
            Arc::new(VertexAIGeminiEndpointProvider::new(config)?),
        )?;
        Ok(Self {
            attributes: model_attributes(client.model_id()),
            client,
        })
    }
}

impl AIService for VertexAITextEmbeddingGenerationService {
    fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[async_trait]
impl TextEmbeddingGenerationService for VertexAITextEmbeddingGenerationService {
    async fn generate_embeddings(&self, data: &[String]) -> Result<Vec<Vec<f32>>, ConnectorError> {
        self.client.generate_embeddings(data).await
    }
}
