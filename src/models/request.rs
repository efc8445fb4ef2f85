//! Request models for the Gemini API.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::{Part, SafetySetting};
use crate::error::ConnectorError;
use crate::kernel::{AuthorRole, ChatHistory};
use crate::settings::GeminiPromptExecutionSettings;

/// A `generateContent` / `streamGenerateContent` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// The contents of the request, in conversation order.
    pub contents: Vec<Content>,

    /// Optional system instruction for the model
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub system_instruction: Option<Content>,

    /// Optional safety settings for content filtering
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub safety_settings: Option<Vec<SafetySetting>>,

    /// Optional generation parameters
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub configuration: Option<GenerationConfig>,
}

/// A content object holding the parts of one conversation turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// The producer of the content. Omitted for system instructions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// The parts that make up the content.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Creates a content with a single text part.
    pub fn text(role: Option<Role>, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part::text(text)],
        }
    }

    /// Returns the concatenated text of all text parts, or `None` if there are none.
    pub fn joined_text(&self) -> Option<String> {
        let texts: Vec<&str> = self
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!texts.is_empty()).then(|| texts.concat())
    }

    /// Returns `true` if at least one part is valid.
    pub fn has_valid_part(&self) -> bool {
        self.parts.iter().any(Part::is_valid)
    }
}

/// The producer of a [`Content`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Content written by the user.
    User,
    /// Content generated by the model.
    Model,
    /// Result of a function call.
    Function,
}

/// Generation parameters sent as `generationConfig`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling probability mass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Top-k sampling size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
    /// Maximum number of tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,
    /// Number of candidates to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_count: Option<i32>,
    /// Sequences that stop generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

impl GeminiRequest {
    /// Creates a request with a single user prompt.
    pub fn from_prompt(prompt: impl Into<String>, settings: &GeminiPromptExecutionSettings) -> Self {
        Self {
            contents: vec![Content::text(Some(Role::User), prompt)],
            system_instruction: None,
            safety_settings: settings.safety_settings.clone(),
            configuration: Some(settings.generation_config()),
        }
    }

    /// Creates a request from a chat history.
    ///
    /// System messages are collected into the system instruction and assistant
    /// messages are sent with the `model` role.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::InvalidArgument`] if the history holds a tool
    /// message. Gemini only accepts `function` content as a `functionResponse`
    /// part naming the called function, which a plain tool message cannot carry.
    pub fn from_chat_history(
        history: &ChatHistory,
        settings: &GeminiPromptExecutionSettings,
    ) -> Result<Self, ConnectorError> {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for message in history.messages() {
            let part = Part::text(message.content.clone());
            match message.role {
                AuthorRole::System => system_parts.push(part),
                AuthorRole::User => contents.push(Content {
                    role: Some(Role::User),
                    parts: vec![part],
                }),
                AuthorRole::Assistant => contents.push(Content {
                    role: Some(Role::Model),
                    parts: vec![part],
                }),
                AuthorRole::Tool => {
                    return Err(ConnectorError::invalid_argument(
                        "history",
                        "tool messages are not supported",
                    ))
                }
            }
        }

        Ok(Self {
            contents,
            system_instruction: (!system_parts.is_empty()).then(|| Content {
                role: None,
                parts: system_parts,
            }),
            safety_settings: settings.safety_settings.clone(),
            configuration: Some(settings.generation_config()),
        })
    }
}

/// A `countTokens` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountTokensRequest {
    /// The contents to count tokens for.
    pub contents: Vec<Content>,
}

impl From<GeminiRequest> for CountTokensRequest {
    fn from(request: GeminiRequest) -> Self {
        Self {
            contents: request.contents,
        }
    }
}
