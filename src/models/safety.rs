use serde::{Deserialize, Serialize};

/// Safety category for content filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    /// Category is unspecified.
    HarmCategoryUnspecified,
    /// Negative or harmful comments targeting identity and/or protected attributes.
    HarmCategoryDerogatory,
    /// Content that is rude, disrespectful, or profane.
    HarmCategoryToxicity,
    /// Scenarios depicting violence against an individual or group.
    HarmCategoryViolence,
    /// Contains references to sexual acts or other lewd content.
    HarmCategorySexual,
    /// Promotes unchecked medical advice.
    HarmCategoryMedical,
    /// Dangerous content that promotes, facilitates, or encourages harmful acts.
    HarmCategoryDangerous,
    /// Content that harasses, bullies, or threatens individuals or groups.
    HarmCategoryHarassment,
    /// Content that expresses hateful, biased, or discriminatory views.
    HarmCategoryHateSpeech,
    /// Content of a sexual nature or containing explicit material.
    HarmCategorySexuallyExplicit,
    /// Content that promotes or provides instructions for dangerous activities.
    HarmCategoryDangerousContent,
    /// Content that may undermine or manipulate civic processes and institutions.
    HarmCategoryCivicIntegrity,
    /// A category this version of the crate does not know about.
    #[serde(other)]
    Unknown,
}

/// Safety threshold level for content filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyThreshold {
    /// Threshold is unspecified.
    #[serde(rename = "HARM_BLOCK_THRESHOLD_UNSPECIFIED")]
    Unspecified,
    /// Block only high-risk content
    BlockOnlyHigh,
    /// Block medium and high-risk content
    BlockMediumAndAbove,
    /// Block all potentially risky content
    BlockLowAndAbove,
    /// Allow all content regardless of risk
    BlockNone,
}

/// Safety setting for a specific harm category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    /// The category of harm to filter
    pub category: HarmCategory,
    /// The threshold level for filtering
    pub threshold: SafetyThreshold,
}

impl SafetySetting {
    /// Creates a new safety setting.
    pub fn new(category: HarmCategory, threshold: SafetyThreshold) -> Self {
        Self {
            category,
            threshold,
        }
    }
}

/// Probability level for safety ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyProbability {
    /// Probability is unspecified.
    #[serde(rename = "HARM_PROBABILITY_UNSPECIFIED")]
    Unspecified,
    /// Negligible probability of harmful content.
    Negligible,
    /// Low probability of harmful content.
    Low,
    /// Medium probability of harmful content.
    Medium,
    /// High probability of harmful content.
    High,
    /// A probability this version of the crate does not know about.
    #[serde(other)]
    Unknown,
}

/// Safety rating for a specific harm category, attached to a candidate or to the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyRating {
    /// The category of harm being rated.
    pub category: HarmCategory,
    /// The probability level of harmful content.
    pub probability: SafetyProbability,
    /// Whether the content was blocked because of this rating.
    #[serde(default, rename = "blocked")]
    pub block: bool,
}
