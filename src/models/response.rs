//! Response models for the Gemini API.

use serde::{Deserialize, Serialize};

use super::{Content, SafetyRating};

/// A `generateContent` response, or one chunk of a `streamGenerateContent` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// The generated candidates from the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
    /// Feedback about the prompt, including why it was blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
    /// Metadata about token usage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
    /// The version of the model used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    /// An error reported in place of a response, e.g. inside a stream that
    /// already answered with a success status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl GeminiResponse {
    /// Returns the candidates, or an empty slice when the response has none.
    pub fn candidates(&self) -> &[Candidate] {
        self.candidates.as_deref().unwrap_or_default()
    }
}

/// The `error` object of a failed Gemini call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// The HTTP status code the error maps to.
    #[serde(default)]
    pub code: i32,
    /// A developer-facing error message.
    #[serde(default)]
    pub message: String,
    /// The canonical status name, e.g. `INTERNAL`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A candidate response from the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The content of the candidate response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// The reason why the generation finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    /// Index of the candidate in the list of candidates.
    #[serde(default)]
    pub index: i32,
    /// Safety ratings for different harm categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_ratings: Option<Vec<SafetyRating>>,
    /// Number of tokens in this candidate.
    #[serde(default)]
    pub token_count: i32,
    /// Citation information for this candidate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_metadata: Option<CitationMetadata>,
}

/// Feedback about the prompt sent with the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Why the prompt was blocked, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<BlockReason>,
    /// Safety ratings of the prompt.
    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,
}

/// Reason why a prompt was blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockReason {
    /// Default value. This value is unused.
    #[serde(rename = "BLOCK_REASON_UNSPECIFIED")]
    Unspecified,
    /// Prompt was blocked due to safety reasons.
    Safety,
    /// Prompt was blocked due to unknown reasons.
    Other,
    /// Prompt contains terms from the terminology blocklist.
    Blocklist,
    /// Prompt was blocked due to prohibited content.
    ProhibitedContent,
    /// A reason this version of the crate does not know about.
    #[serde(other)]
    Unknown,
}

/// Citation metadata for a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationMetadata {
    /// The citations for this candidate.
    #[serde(default, alias = "citationSources")]
    pub citations: Vec<Citation>,
}

/// A citation for a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    /// The start index of the citation.
    #[serde(default)]
    pub start_index: i32,
    /// The end index of the citation.
    #[serde(default)]
    pub end_index: i32,
    /// The URI of the citation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// The license of the citation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

/// Reason why the generation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    #[serde(rename = "FINISH_REASON_UNSPECIFIED")]
    /// Default value. This value is unused.
    Unspecified,
    /// Natural stop point of the model or provided stop sequence.
    Stop,
    /// The maximum number of tokens as specified in the request was reached.
    MaxTokens,
    /// The response candidate content was flagged for safety reasons.
    Safety,
    /// The response candidate content was flagged for recitation reasons.
    Recitation,
    /// The response candidate content was flagged for using an unsupported language.
    Language,
    /// Unknown reason.
    Other,
    /// Token generation stopped because the content contains forbidden terms.
    Blocklist,
    /// Token generation stopped for potentially containing prohibited content.
    ProhibitedContent,
    /// Token generation stopped because the content potentially contains Sensitive Personally Identifiable Information (SPII).
    Spii,
    /// The function call generated by the model is invalid.
    MalformedFunctionCall,
    /// A reason this version of the crate does not know about.
    #[serde(other)]
    Unknown,
}

/// Metadata about token usage in the request and response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Number of tokens in the prompt.
    #[serde(default)]
    pub prompt_token_count: i32,
    /// Number of tokens in the generated candidates.
    #[serde(default)]
    pub candidates_token_count: i32,
    /// Total number of tokens used.
    #[serde(default)]
    pub total_token_count: i32,
}

/// Response from token counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountTokensResponse {
    /// Total number of tokens in the request.
    pub total_tokens: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HarmCategory, Role, SafetyProbability};

    #[test]
    fn deserializes_full_response() {
        let response: GeminiResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Hello" }] },
                "finishReason": "STOP",
                "index": 0,
                "tokenCount": 3,
                "safetyRatings": [
                    { "category": "HARM_CATEGORY_HARASSMENT", "probability": "NEGLIGIBLE" }
                ]
            }],
            "promptFeedback": {
                "blockReason": "SAFETY",
                "safetyRatings": [
                    { "category": "HARM_CATEGORY_HATE_SPEECH", "probability": "HIGH", "blocked": true }
                ]
            },
            "usageMetadata": {
                "promptTokenCount": 4,
                "candidatesTokenCount": 3,
                "totalTokenCount": 7
            }
        }))
        .unwrap();

        let candidate = &response.candidates()[0];
        assert_eq!(candidate.finish_reason, Some(FinishReason::Stop));
        assert_eq!(candidate.token_count, 3);
        assert_eq!(
            candidate.content.as_ref().unwrap().role,
            Some(Role::Model)
        );
        assert_eq!(
            candidate.safety_ratings.as_ref().unwrap()[0].probability,
            SafetyProbability::Negligible
        );

        let feedback = response.prompt_feedback.as_ref().unwrap();
        assert_eq!(feedback.block_reason, Some(BlockReason::Safety));
        assert_eq!(
            feedback.safety_ratings[0].category,
            HarmCategory::HarmCategoryHateSpeech
        );
        assert!(feedback.safety_ratings[0].block);
        assert_eq!(response.usage_metadata.unwrap().total_token_count, 7);
        assert_eq!(
            candidate.content.as_ref().unwrap().joined_text().as_deref(),
            Some("Hello")
        );
        assert!(response.error.is_none());
    }

    #[test]
    fn blocked_prompt_has_no_candidates() {
        let response: GeminiResponse = serde_json::from_value(serde_json::json!({
            "promptFeedback": { "blockReason": "OTHER" }
        }))
        .unwrap();

        assert!(response.candidates().is_empty());
    }

    #[test]
    fn unknown_finish_reason_is_tolerated() {
        let candidate: Candidate =
            serde_json::from_value(serde_json::json!({ "finishReason": "IMAGE_SAFETY" })).unwrap();
        assert_eq!(candidate.finish_reason, Some(FinishReason::Unknown));
    }

    #[test]
    fn deserializes_error_object() {
        let response: GeminiResponse = serde_json::from_value(serde_json::json!({
            "error": { "code": 500, "message": "Internal error", "status": "INTERNAL" }
        }))
        .unwrap();

        assert!(response.candidates().is_empty());
        assert_eq!(
            response.error,
            Some(ApiError {
                code: 500,
                message: "Internal error".into(),
                status: Some("INTERNAL".into()),
            })
        );
    }
}
