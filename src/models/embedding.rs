//! Embedding request and response models for both Vertex AI and Google AI.

use serde::{Deserialize, Serialize};

use super::{Content, Part};

/// Vertex AI `:predict` request for text embedding models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexAIEmbeddingRequest {
    /// One instance per input text.
    pub instances: Vec<EmbeddingInstance>,
}

/// A single text to embed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingInstance {
    /// The text to embed.
    pub content: String,
}

impl VertexAIEmbeddingRequest {
    /// Creates a request with one instance per input text.
    pub fn from_data<I, S>(data: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            instances: data
                .into_iter()
                .map(|content| EmbeddingInstance {
                    content: content.into(),
                })
                .collect(),
        }
    }
}

/// Vertex AI `:predict` response for text embedding models.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VertexAIEmbeddingResponse {
    /// One prediction per input instance, in input order.
    pub predictions: Vec<EmbeddingPrediction>,
}

/// The embedding produced for one instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmbeddingPrediction {
    /// The embedding of the instance.
    pub embeddings: PredictionEmbeddings,
}

/// Embedding values and optional statistics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionEmbeddings {
    /// The embedding vector.
    pub values: Vec<f32>,
    /// Token statistics for the instance.
    #[serde(default)]
    pub statistics: Option<EmbeddingStatistics>,
}

/// Statistics reported alongside a Vertex AI embedding.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EmbeddingStatistics {
    /// Number of tokens in the input text.
    #[serde(default)]
    pub token_count: f64,
    /// Whether the input was truncated.
    #[serde(default)]
    pub truncated: bool,
}

/// Google AI `:batchEmbedContents` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoogleAIEmbeddingRequest {
    /// One embed request per input text.
    pub requests: Vec<EmbedContentRequest>,
}

/// A single embed request inside a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedContentRequest {
    /// Fully qualified model name, `models/{model_id}`.
    pub model: String,
    /// The content to embed.
    pub content: Content,
}

impl GoogleAIEmbeddingRequest {
    /// Creates a batch request embedding each text with `model_id`.
    pub fn from_data<I, S>(model_id: &str, data: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            requests: data
                .into_iter()
                .map(|text| EmbedContentRequest {
                    model: format!("models/{model_id}"),
                    content: Content {
                        role: None,
                        parts: vec![Part::text(text)],
                    },
                })
                .collect(),
        }
    }
}

/// Google AI `:batchEmbedContents` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GoogleAIEmbeddingResponse {
    /// One embedding per request, in request order.
    pub embeddings: Vec<ContentEmbedding>,
}

/// A single embedding vector.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentEmbedding {
    /// The embedding vector.
    pub values: Vec<f32>,
}
