use std::fmt;

/// The model operation a request targets, rendered as the `:{operation}` URL suffix.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RequestType {
    /// A request to generate content.
    GenerateContent,
    /// A request to generate content in a streaming fashion.
    StreamGenerateContent,
    /// A request to count the tokens of a prompt.
    CountTokens,
    /// A Vertex AI prediction, used for embeddings.
    Predict,
    /// A Google AI batch embedding request.
    BatchEmbedContents,
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenerateContent => write!(f, "generateContent"),
            Self::StreamGenerateContent => write!(f, "streamGenerateContent"),
            Self::CountTokens => write!(f, "countTokens"),
            Self::Predict => write!(f, "predict"),
            Self::BatchEmbedContents => write!(f, "batchEmbedContents"),
        }
    }
}
