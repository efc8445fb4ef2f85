//! [`AIService`](crate::kernel::AIService) implementations backed by the Gemini clients.
//!
//! Each service owns one client and advertises its model id through
//! [`MODEL_ID_KEY`](crate::kernel::MODEL_ID_KEY). Host settings are converted into
//! [`GeminiPromptExecutionSettings`] on every call.

mod google_ai;
mod vertex_ai;

pub use google_ai::{
    GoogleAIGeminiChatCompletionService, GoogleAIGeminiTextGenerationService,
    GoogleAITextEmbeddingGenerationService,
};
pub use vertex_ai::{
    VertexAIGeminiChatCompletionService, VertexAIGeminiTextGenerationService,
    VertexAITextEmbeddingGenerationService,
};

use futures::StreamExt;

use crate::chat::GeminiChatCompletionClient;
use crate::client::GeminiTextGenerationClient;
use crate::error::{verify_not_blank, ConnectorError};
use crate::kernel::{
    ChatHistory, ChatMessageContent, PromptExecutionSettings, StreamingChatMessageStream,
    StreamingTextContent, StreamingTextStream, TextContent,
};
use crate::settings::GeminiPromptExecutionSettings;

async fn text_contents(
    client: &GeminiTextGenerationClient,
    prompt: &str,
    settings: Option<&PromptExecutionSettings>,
) -> Result<Vec<TextContent>, ConnectorError> {
    let settings = GeminiPromptExecutionSettings::from_execution_settings(settings)?;
    client.generate_text(prompt, Some(&settings)).await
}

async fn streaming_text_contents(
    client: &GeminiTextGenerationClient,
    prompt: &str,
    settings: Option<&PromptExecutionSettings>,
) -> Result<StreamingTextStream, ConnectorError> {
    let settings = GeminiPromptExecutionSettings::from_execution_settings(settings)?;
    client.stream_generate_text(prompt, Some(&settings)).await
}

async fn chat_message_contents(
    client: &GeminiChatCompletionClient,
    history: &ChatHistory,
    settings: Option<&PromptExecutionSettings>,
) -> Result<Vec<ChatMessageContent>, ConnectorError> {
    let settings = GeminiPromptExecutionSettings::from_execution_settings(settings)?;
    client.generate_chat_message(history, Some(&settings)).await
}

async fn streaming_chat_message_contents(
    client: &GeminiChatCompletionClient,
    history: &ChatHistory,
    settings: Option<&PromptExecutionSettings>,
) -> Result<StreamingChatMessageStream, ConnectorError> {
    let settings = GeminiPromptExecutionSettings::from_execution_settings(settings)?;
    client
        .stream_generate_chat_message(history, Some(&settings))
        .await
}

/// A prompt sent to a chat model is a history with one user message.
fn prompt_history(prompt: &str) -> Result<ChatHistory, ConnectorError> {
    verify_not_blank("prompt", prompt)?;
    let mut history = ChatHistory::new();
    history.add_user_message(prompt);
    Ok(history)
}

async fn chat_as_text_contents(
    client: &GeminiChatCompletionClient,
    prompt: &str,
    settings: Option<&PromptExecutionSettings>,
) -> Result<Vec<TextContent>, ConnectorError> {
    let messages = chat_message_contents(client, &prompt_history(prompt)?, settings).await?;
    Ok(messages.into_iter().map(TextContent::from).collect())
}

async fn chat_as_streaming_text_contents(
    client: &GeminiChatCompletionClient,
    prompt: &str,
    settings: Option<&PromptExecutionSettings>,
) -> Result<StreamingTextStream, ConnectorError> {
    let chunks =
        streaming_chat_message_contents(client, &prompt_history(prompt)?, settings).await?;
    Ok(chunks
        .map(|chunk| chunk.map(StreamingTextContent::from))
        .boxed())
}
