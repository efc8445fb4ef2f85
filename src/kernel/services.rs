//! Service abstractions implemented by the connectors.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use futures::stream::BoxStream;

use super::{
    ChatHistory, ChatMessageContent, PromptExecutionSettings, StreamingChatMessageContent,
    StreamingTextContent, TextContent,
};
use crate::error::ConnectorError;

/// Attribute key holding the model id of a service
pub const MODEL_ID_KEY: &str = "ModelId";

/// Stream of text chunks.
pub type StreamingTextStream = BoxStream<'static, Result<StreamingTextContent, ConnectorError>>;

/// Stream of chat message chunks.
pub type StreamingChatMessageStream =
    BoxStream<'static, Result<StreamingChatMessageContent, ConnectorError>>;

/// Behavior shared by every AI service.
pub trait AIService: Any + Send + Sync + fmt::Debug {
    /// Descriptive attributes of the service, such as [`MODEL_ID_KEY`].
    fn attributes(&self) -> &HashMap<String, String>;

    /// The model the service talks to.
    fn model_id(&self) -> Option<&str> {
        self.attributes().get(MODEL_ID_KEY).map(String::as_str)
    }

    /// Upcast used to recover the concrete service type.
    fn as_any(&self) -> &dyn Any;
}

/// A service that completes a text prompt.
#[async_trait]
pub trait TextGenerationService: AIService {
    /// Generates one text content per returned candidate.
    async fn get_text_contents(
        &self,
        prompt: &str,
        settings: Option<&PromptExecutionSettings>,
    ) -> Result<Vec<TextContent>, ConnectorError>;

    /// Generates text as a stream of chunks.
    async fn get_streaming_text_contents(
        &self,
        prompt: &str,
        settings: Option<&PromptExecutionSettings>,
    ) -> Result<StreamingTextStream, ConnectorError>;
}

/// A service that continues a chat.
#[async_trait]
pub trait ChatCompletionService: AIService {
    /// Generates one assistant message per returned candidate.
    async fn get_chat_message_contents(
        &self,
        history: &ChatHistory,
        settings: Option<&PromptExecutionSettings>,
    ) -> Result<Vec<ChatMessageContent>, ConnectorError>;

    /// Generates the assistant reply as a stream of chunks.
    async fn get_streaming_chat_message_contents(
        &self,
        history: &ChatHistory,
        settings: Option<&PromptExecutionSettings>,
    ) -> Result<StreamingChatMessageStream, ConnectorError>;
}

/// A service that turns texts into embedding vectors.
#[async_trait]
pub trait TextEmbeddingGenerationService: AIService {
    /// Embeds every text, returning the vectors in input order.
    async fn generate_embeddings(&self, data: &[String]) -> Result<Vec<Vec<f32>>, ConnectorError>;
}

/// Builds the attribute map of a service bound to `model_id`.
pub(crate) fn model_attributes(model_id: &str) -> HashMap<String, String> {
    HashMap::from([(MODEL_ID_KEY.to_string(), model_id.to_string())])
}
