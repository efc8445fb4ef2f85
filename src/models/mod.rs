//! Data structures mirroring the Gemini and Vertex AI JSON schemas.

mod embedding;
mod function;
mod part;
mod request;
mod request_type;
mod response;
mod safety;
mod stream;

pub use embedding::{
    ContentEmbedding, EmbedContentRequest, EmbeddingInstance, EmbeddingPrediction,
    EmbeddingStatistics, GoogleAIEmbeddingRequest, GoogleAIEmbeddingResponse,
    PredictionEmbeddings, VertexAIEmbeddingRequest, VertexAIEmbeddingResponse,
};
pub use function::{FunctionCall, FunctionResponse};
pub use part::{InlineData, Part};
pub use request::{Content, CountTokensRequest, GeminiRequest, GenerationConfig, Role};
pub use request_type::RequestType;
pub use response::{
    ApiError, BlockReason, Candidate, Citation, CitationMetadata, CountTokensResponse, FinishReason,
    GeminiResponse, PromptFeedback, UsageMetadata,
};
pub use safety::{HarmCategory, SafetyProbability, SafetyRating, SafetySetting, SafetyThreshold};
pub use stream::JsonObjectSplitter;
