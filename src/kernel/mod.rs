//! Host framework abstractions the connectors plug into.

mod content;
mod registry;
mod services;
mod settings;

pub use content::{
    AuthorRole, ChatHistory, ChatMessageContent, StreamingChatMessageContent,
    StreamingTextContent, TextContent,
};
pub use registry::{Kernel, KernelBuilder, ServiceCollection, ServiceProvider};
pub(crate) use services::model_attributes;
pub use services::{
    AIService, ChatCompletionService, StreamingChatMessageStream, StreamingTextStream,
    TextEmbeddingGenerationService, TextGenerationService, MODEL_ID_KEY,
};
pub use settings::PromptExecutionSettings;

/// Anything services can be registered on.
pub trait ServiceRegistrar {
    /// The collection registrations are added to.
    fn service_collection(&mut self) -> &mut ServiceCollection;
}

impl ServiceRegistrar for ServiceCollection {
    fn service_collection(&mut self) -> &mut ServiceCollection {
        self
    }
}

impl ServiceRegistrar for KernelBuilder {
    fn service_collection(&mut self) -> &mut ServiceCollection {
        self.services()
    }
}
