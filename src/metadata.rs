//! Projection of a response candidate into flat metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConnectorError;
use crate::models::{BlockReason, Candidate, FinishReason, GeminiResponse, SafetyRating};

/// String-keyed view of [`GeminiMetadata`].
pub type MetadataMap = BTreeMap<String, serde_json::Value>;

/// Metadata attached to every generated content item.
///
/// This record is the only source of truth; [`GeminiMetadata::to_map`] derives
/// the string-keyed view from it, keyed by the PascalCase field names
/// (`FinishReason`, `PromptTokenCount`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeminiMetadata {
    /// Why the candidate finished.
    pub finish_reason: Option<FinishReason>,
    /// Index of the candidate.
    pub index: i32,
    /// Tokens in the prompt.
    pub prompt_token_count: i32,
    /// Tokens in this candidate.
    pub current_candidate_token_count: i32,
    /// Tokens across all candidates.
    pub candidates_token_count: i32,
    /// Total tokens for the exchange.
    pub total_token_count: i32,
    /// Why the prompt was blocked, if it was.
    pub prompt_feedback_block_reason: Option<BlockReason>,
    /// Safety ratings of the prompt.
    pub prompt_feedback_safety_ratings: Option<Vec<SafetyRating>>,
    /// Safety ratings of this candidate.
    pub response_safety_ratings: Option<Vec<SafetyRating>>,
}

impl GeminiMetadata {
    /// Projects one candidate plus the response-wide feedback and usage data.
    pub fn from_candidate(response: &GeminiResponse, candidate: &Candidate) -> Self {
        let usage = response.usage_metadata.unwrap_or_default();
        let feedback = response.prompt_feedback.as_ref();

        Self {
            finish_reason: candidate.finish_reason,
            index: candidate.index,
            prompt_token_count: usage.prompt_token_count,
            current_candidate_token_count: candidate.token_count,
            candidates_token_count: usage.candidates_token_count,
            total_token_count: usage.total_token_count,
            prompt_feedback_block_reason: feedback.and_then(|f| f.block_reason),
            prompt_feedback_safety_ratings: feedback.map(|f| f.safety_ratings.clone()),
            response_safety_ratings: candidate.safety_ratings.clone(),
        }
    }

    /// Generates the string-keyed view of this record.
    pub fn to_map(&self) -> MetadataMap {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(fields)) => fields.into_iter().collect(),
            _ => MetadataMap::new(),
        }
    }

    /// Rebuilds the typed record from its string-keyed view.
    ///
    /// # Errors
    ///
    /// Returns an error if the map was not produced by [`GeminiMetadata::to_map`]
    /// or has been altered into an incompatible shape.
    pub fn from_map(map: &MetadataMap) -> Result<Self, ConnectorError> {
        let value = serde_json::Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        );
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Content, HarmCategory, Part, PromptFeedback, SafetyProbability, UsageMetadata,
    };

    fn rating(category: HarmCategory, probability: SafetyProbability, block: bool) -> SafetyRating {
        SafetyRating {
            category,
            probability,
            block,
        }
    }

    fn sample_response() -> GeminiResponse {
        GeminiResponse {
            candidates: Some(vec![Candidate {
                content: Some(Content::text(None, "hi")),
                finish_reason: Some(FinishReason::MaxTokens),
                index: 1,
                safety_ratings: Some(vec![rating(
                    HarmCategory::HarmCategoryHarassment,
                    SafetyProbability::Low,
                    false,
                )]),
                token_count: 9,
                citation_metadata: None,
            }]),
            prompt_feedback: Some(PromptFeedback {
                block_reason: Some(BlockReason::Other),
                safety_ratings: vec![rating(
                    HarmCategory::HarmCategoryHateSpeech,
                    SafetyProbability::High,
                    true,
                )],
            }),
            usage_metadata: Some(UsageMetadata {
                prompt_token_count: 5,
                candidates_token_count: 9,
                total_token_count: 14,
            }),
            model_version: None,
            error: None,
        }
    }

    #[test]
    fn projects_candidate_and_shared_fields() {
        let response = sample_response();
        let candidate = &response.candidates()[0];
        let metadata = GeminiMetadata::from_candidate(&response, candidate);

        assert_eq!(metadata.finish_reason, Some(FinishReason::MaxTokens));
        assert_eq!(metadata.index, 1);
        assert_eq!(metadata.prompt_token_count, 5);
        assert_eq!(metadata.current_candidate_token_count, 9);
        assert_eq!(metadata.candidates_token_count, 9);
        assert_eq!(metadata.total_token_count, 14);
        assert_eq!(metadata.prompt_feedback_block_reason, Some(BlockReason::Other));
        assert_eq!(
            metadata.prompt_feedback_safety_ratings.as_deref(),
            Some(response.prompt_feedback.as_ref().unwrap().safety_ratings.as_slice())
        );
        assert_eq!(metadata.response_safety_ratings, candidate.safety_ratings);
    }

    #[test]
    fn map_view_matches_typed_record() {
        let response = sample_response();
        let metadata = GeminiMetadata::from_candidate(&response, &response.candidates()[0]);
        let map = metadata.to_map();

        assert_eq!(map["FinishReason"], "MAX_TOKENS");
        assert_eq!(map["Index"], 1);
        assert_eq!(map["PromptTokenCount"], 5);
        assert_eq!(map["CurrentCandidateTokenCount"], 9);
        assert_eq!(map["CandidatesTokenCount"], 9);
        assert_eq!(map["TotalTokenCount"], 14);
        assert_eq!(map["PromptFeedbackBlockReason"], "OTHER");
        assert_eq!(map["PromptFeedbackSafetyRatings"][0]["blocked"], true);
        assert_eq!(
            map["ResponseSafetyRatings"][0]["category"],
            "HARM_CATEGORY_HARASSMENT"
        );
        assert_eq!(GeminiMetadata::from_map(&map).unwrap(), metadata);
    }

    #[test]
    fn missing_usage_and_feedback_project_to_defaults() {
        let response = GeminiResponse {
            candidates: Some(vec![Candidate {
                content: Some(Content {
                    role: None,
                    parts: vec![Part::text("x")],
                }),
                ..Default::default()
            }]),
            ..Default::default()
        };
        let metadata = GeminiMetadata::from_candidate(&response, &response.candidates()[0]);

        assert_eq!(metadata.total_token_count, 0);
        assert_eq!(metadata.prompt_feedback_block_reason, None);
        assert_eq!(metadata.prompt_feedback_safety_ratings, None);
        assert!(metadata.to_map()["FinishReason"].is_null());
    }
}
