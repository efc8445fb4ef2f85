//! Error types for the Gemini connectors.

use thiserror::Error;

/// Errors that can occur when using the Gemini connectors.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// A caller-supplied value failed local validation. Raised before any request is sent.
    #[error("Invalid argument `{name}`: {message}")]
    InvalidArgument {
        /// Name of the offending argument
        name: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// Error occurred during an API request.
    #[error("API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("Request failed with status {status}: {body}")]
    HttpStatus {
        /// Status code returned by the server
        status: reqwest::StatusCode,
        /// Raw response body
        body: String,
    },

    /// The API reported an error object in the response body.
    #[error("API error {code}: {message}")]
    Api {
        /// The HTTP status code the error maps to
        code: i32,
        /// Error message from the API
        message: String,
        /// Canonical status name, e.g. `INTERNAL`
        status: Option<String>,
    },

    /// Error occurred when accessing environment variables.
    #[error("Environment variable not found: {0}")]
    EnvError(#[from] std::env::VarError),

    /// Failed to read a file from disk.
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    /// Error occurred when parsing JSON.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// No service is registered for the requested abstraction.
    #[error("Service not registered: {0}")]
    ServiceNotRegistered(String),

    /// Error occurred while reading a streaming response.
    #[error("Streaming error: {message}")]
    Stream {
        /// Error message
        message: String,
    },
}

impl ConnectorError {
    /// Creates a new invalid argument error.
    pub fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            message: message.into(),
        }
    }

    /// Creates a new streaming error with the given message.
    pub fn stream(message: impl Into<String>) -> Self {
        Self::Stream {
            message: message.into(),
        }
    }

    /// Returns `true` if the error was raised by local validation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// Fails with [`ConnectorError::InvalidArgument`] when `value` is empty or whitespace.
pub(crate) fn verify_not_blank(name: &'static str, value: &str) -> Result<(), ConnectorError> {
    if value.trim().is_empty() {
        return Err(ConnectorError::invalid_argument(
            name,
            "value cannot be empty or whitespace",
        ));
    }
    Ok(())
}
