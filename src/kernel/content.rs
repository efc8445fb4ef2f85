//! Content types exchanged with the AI services.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metadata::{GeminiMetadata, MetadataMap};

/// The author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorRole {
    /// Instructions that steer the model
    System,
    /// A message from the user
    User,
    /// A reply from the model
    Assistant,
    /// The result of a tool invocation
    Tool,
}

/// Text produced by a text generation service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextContent {
    /// The generated text
    pub text: String,
    /// Model that produced the text
    pub model_id: Option<String>,
    /// Provider metadata about the generation
    pub metadata: Option<GeminiMetadata>,
}

impl TextContent {
    /// Creates text content without model or metadata.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// String-keyed view of [`TextContent::metadata`].
    pub fn metadata_map(&self) -> Option<MetadataMap> {
        self.metadata.as_ref().map(GeminiMetadata::to_map)
    }
}

impl fmt::Display for TextContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A chunk of text from a streaming text generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamingTextContent {
    /// Text carried by this chunk
    pub text: String,
    /// Candidate the chunk belongs to
    pub choice_index: i32,
    /// Model that produced the text
    pub model_id: Option<String>,
    /// Provider metadata reported with this chunk
    pub metadata: Option<GeminiMetadata>,
}

impl StreamingTextContent {
    /// String-keyed view of [`StreamingTextContent::metadata`].
    pub fn metadata_map(&self) -> Option<MetadataMap> {
        self.metadata.as_ref().map(GeminiMetadata::to_map)
    }
}

/// A single message of a chat.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessageContent {
    /// Author of the message
    pub role: AuthorRole,
    /// Message text
    pub content: String,
    /// Model that produced the message, for assistant messages
    pub model_id: Option<String>,
    /// Provider metadata, for assistant messages
    pub metadata: Option<GeminiMetadata>,
}

impl ChatMessageContent {
    /// Creates a message without model or metadata.
    pub fn new(role: AuthorRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            model_id: None,
            metadata: None,
        }
    }

    /// String-keyed view of [`ChatMessageContent::metadata`].
    pub fn metadata_map(&self) -> Option<MetadataMap> {
        self.metadata.as_ref().map(GeminiMetadata::to_map)
    }
}

impl fmt::Display for ChatMessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

impl From<ChatMessageContent> for TextContent {
    fn from(message: ChatMessageContent) -> Self {
        Self {
            text: message.content,
            model_id: message.model_id,
            metadata: message.metadata,
        }
    }
}

/// A chunk of a streaming chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamingChatMessageContent {
    /// Author of the message, when the chunk reports it
    pub role: Option<AuthorRole>,
    /// Text carried by this chunk
    pub content: String,
    /// Candidate the chunk belongs to
    pub choice_index: i32,
    /// Model that produced the message
    pub model_id: Option<String>,
    /// Provider metadata reported with this chunk
    pub metadata: Option<GeminiMetadata>,
}

impl From<StreamingChatMessageContent> for StreamingTextContent {
    fn from(chunk: StreamingChatMessageContent) -> Self {
        Self {
            text: chunk.content,
            choice_index: chunk.choice_index,
            model_id: chunk.model_id,
            metadata: chunk.metadata,
        }
    }
}

/// Ordered conversation sent to a chat completion service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatHistory {
    messages: Vec<ChatMessageContent>,
}

impl ChatHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history starting with a system message.
    pub fn with_system_message(content: impl Into<String>) -> Self {
        let mut history = Self::new();
        history.add_system_message(content);
        history
    }

    /// Appends a message.
    pub fn add_message(&mut self, message: ChatMessageContent) {
        self.messages.push(message);
    }

    /// Appends a system message.
    pub fn add_system_message(&mut self, content: impl Into<String>) {
        self.add_message(ChatMessageContent::new(AuthorRole::System, content));
    }

    /// Appends a user message.
    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.add_message(ChatMessageContent::new(AuthorRole::User, content));
    }

    /// Appends an assistant message.
    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.add_message(ChatMessageContent::new(AuthorRole::Assistant, content));
    }

    /// Messages in conversation order.
    pub fn messages(&self) -> &[ChatMessageContent] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the history holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Removes every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Extend<ChatMessageContent> for ChatHistory {
    fn extend<T: IntoIterator<Item = ChatMessageContent>>(&mut self, iter: T) {
        self.messages.extend(iter);
    }
}
