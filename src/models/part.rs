//! Common part model used in both requests and responses.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use super::{FunctionCall, FunctionResponse};
use crate::error::ConnectorError;

/// One unit of multi-modal content within a [`Content`](super::Content).
///
/// Exactly one of the four fields must be set for the part to be valid; see [`Part::is_valid`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text content of the part
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Inline binary data of the part
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,

    /// A function call predicted by the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,

    /// The result of a function call, sent back to the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
}

impl Part {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Creates an inline data part from raw bytes, base64-encoding them.
    pub fn inline_data(mime_type: impl Into<String>, bytes: impl AsRef<[u8]>) -> Self {
        Self {
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: STANDARD.encode(bytes),
            }),
            ..Default::default()
        }
    }

    /// Creates an inline data part from a file, guessing its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its MIME type cannot be determined.
    pub fn inline_data_from_path(path: impl AsRef<Path>) -> Result<Self, ConnectorError> {
        let path = path.as_ref();
        let mime_type = mime_guess::from_path(path).first().ok_or_else(|| {
            ConnectorError::invalid_argument("path", format!("unknown MIME type for {path:?}"))
        })?;
        let bytes = std::fs::read(path)?;
        Ok(Self::inline_data(mime_type.essence_str(), bytes))
    }

    /// Creates a function call part.
    pub fn function_call(function_call: FunctionCall) -> Self {
        Self {
            function_call: Some(function_call),
            ..Default::default()
        }
    }

    /// Creates a function response part.
    pub fn function_response(function_response: FunctionResponse) -> Self {
        Self {
            function_response: Some(function_response),
            ..Default::default()
        }
    }

    /// Returns `true` when exactly one of `text`, `inline_data`, `function_call`
    /// and `function_response` is set.
    pub fn is_valid(&self) -> bool {
        let populated = [
            self.text.is_some(),
            self.inline_data.is_some(),
            self.function_call.is_some(),
            self.function_response.is_some(),
        ];
        populated.iter().filter(|set| **set).count() == 1
    }
}

/// A part containing inline data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// The MIME type of the inline data
    pub mime_type: String,
    /// The base64-encoded data
    pub data: String,
}

impl InlineData {
    /// Decodes the base64 payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, ConnectorError> {
        STANDARD
            .decode(&self.data)
            .map_err(|e| ConnectorError::invalid_argument("inline_data", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn part_with(text: bool, inline: bool, call: bool, response: bool) -> Part {
        Part {
            text: text.then(|| "text".to_string()),
            inline_data: inline.then(InlineData::default),
            function_call: call.then(FunctionCall::default),
            function_response: response.then(FunctionResponse::default),
        }
    }

    #[test]
    fn part_is_valid_iff_exactly_one_field_is_set() {
        for mask in 0u8..16 {
            let part = part_with(
                mask & 1 != 0,
                mask & 2 != 0,
                mask & 4 != 0,
                mask & 8 != 0,
            );
            assert_eq!(
                part.is_valid(),
                mask.count_ones() == 1,
                "unexpected validity for field mask {mask:04b}"
            );
        }
    }

    #[test]
    fn empty_part_is_invalid() {
        assert!(!Part::default().is_valid());
    }

    #[test]
    fn constructors_produce_valid_parts() {
        assert!(Part::text("hello").is_valid());
        assert!(Part::inline_data("image/png", [1u8, 2, 3]).is_valid());
        assert!(Part::function_call(FunctionCall::default()).is_valid());
        assert!(Part::function_response(FunctionResponse::default()).is_valid());
    }

    #[test]
    fn text_part_serializes_without_empty_fields() {
        let json = serde_json::to_value(Part::text("hi")).unwrap();
        assert_eq!(json, serde_json::json!({ "text": "hi" }));
    }

    #[test]
    fn inline_data_uses_camel_case_and_base64() {
        let part = Part::inline_data("text/plain", b"abc");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "inlineData": { "mimeType": "text/plain", "data": "YWJj" } })
        );
        assert_eq!(part.inline_data.unwrap().decode().unwrap(), b"abc");
    }

    #[test]
    fn inline_data_from_path_guesses_mime_type() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"file contents").unwrap();

        let part = Part::inline_data_from_path(file.path()).unwrap();
        let inline = part.inline_data.unwrap();
        assert_eq!(inline.mime_type, "text/plain");
        assert_eq!(inline.decode().unwrap(), b"file contents");
    }
}
