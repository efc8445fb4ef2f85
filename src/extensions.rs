//! Registration of the Gemini services on a [`ServiceCollection`] or [`KernelBuilder`].
//!
//! Each helper builds one service and registers it under every abstraction it
//! implements, keyed by `service_id` when one is given.
//!
//! [`KernelBuilder`]: crate::kernel::KernelBuilder

use std::sync::Arc;

use crate::error::ConnectorError;
use crate::kernel::{
    ChatCompletionService, ServiceCollection, ServiceRegistrar, TextEmbeddingGenerationService,
    TextGenerationService,
};
use crate::services::{
    GoogleAIGeminiChatCompletionService, GoogleAIGeminiTextGenerationService,
    GoogleAITextEmbeddingGenerationService, VertexAIGeminiChatCompletionService,
    VertexAIGeminiTextGenerationService, VertexAITextEmbeddingGenerationService,
};

fn register<T>(services: &mut ServiceCollection, service_id: Option<&str>, service: Arc<T>)
where
    T: ?Sized + Send + Sync + 'static,
{
    match service_id {
        Some(id) => services.add_keyed_singleton::<T>(id, service),
        None => services.add_singleton::<T>(service),
    };
}

/// Registers Google AI services.
pub trait GoogleAIServiceCollectionExt: ServiceRegistrar {
    /// Registers a Gemini text generation service.
    ///
    /// # Errors
    ///
    /// Returns an error if `model_id` or `api_key` is blank.
    fn add_google_ai_gemini_text_generation(
        &mut self,
        model_id: &str,
        api_key: &str,
        service_id: Option<&str>,
    ) -> Result<&mut Self, ConnectorError> {
        let service = Arc::new(GoogleAIGeminiTextGenerationService::new(
            model_id, api_key, None,
        )?);
        register::<dyn TextGenerationService>(self.service_collection(), service_id, service);
        Ok(self)
    }

    /// Registers a Gemini chat completion service, also resolvable as a text generation service.
    ///
    /// # Errors
    ///
    /// Returns an error if `model_id` or `api_key` is blank.
    fn add_google_ai_gemini_chat_completion(
        &mut self,
        model_id: &str,
        api_key: &str,
        service_id: Option<&str>,
    ) -> Result<&mut Self, ConnectorError> {
        let service = Arc::new(GoogleAIGeminiChatCompletionService::new(
            model_id, api_key, None,
        )?);
        let services = self.service_collection();
        register::<dyn ChatCompletionService>(services, service_id, service.clone());
        register::<dyn TextGenerationService>(services, service_id, service);
        Ok(self)
    }

    /// Registers a Google AI text embedding service.
    ///
    /// # Errors
    ///
    /// Returns an error if `model_id` or `api_key` is blank.
    fn add_google_ai_embedding_generation(
        &mut self,
        model_id: &str,
        api_key: &str,
        service_id: Option<&str>,
    ) -> Result<&mut Self, ConnectorError> {
        let service = Arc::new(GoogleAITextEmbeddingGenerationService::new(
            model_id, api_key, None,
        )?);
        register::<dyn TextEmbeddingGenerationService>(
            self.service_collection(),
            service_id,
            service,
        );
        Ok(self)
    }
}

impl<T: ServiceRegistrar + ?Sized> GoogleAIServiceCollectionExt for T {}

/// Registers Vertex AI services.
pub trait VertexAIServiceCollectionExt: ServiceRegistrar {
    /// Registers a Gemini text generation service.
    ///
    /// # Errors
    ///
    /// Returns an error if any argument is blank.
    fn add_vertex_ai_gemini_text_generation(
        &mut self,
        model_id: &str,
        bearer_key: &str,
        location: &str,
        project_id: &str,
        service_id: Option<&str>,
    ) -> Result<&mut Self, ConnectorError> {
        let service = Arc::new(VertexAIGeminiTextGenerationService::new(
            model_id, bearer_key, location, project_id, None,
        )?);
        register::<dyn TextGenerationService>(self.service_collection(), service_id, service);
        Ok(self)
    }

    /// Registers a Gemini chat completion service, also resolvable as a text generation service.
    ///
    /// # Errors
    ///
    /// Returns an error if any argument is blank.
    fn add_vertex_ai_gemini_chat_completion(
        &mut self,
        model_id: &str,
        bearer_key: &str,
        location: &str,
        project_id: &str,
        service_id: Option<&str>,
    ) -> Result<&mut Self, ConnectorError> {
        let service = Arc::new(VertexAIGeminiChatCompletionService::new(
            model_id, bearer_key, location, project_id, None,
        )?);
        let services = self.service_collection();
        register::<dyn ChatCompletionService>(services, service_id, service.clone());
        register::<dyn TextGenerationService>(services, service_id, service);
        Ok(self)
    }

    /// Registers a Vertex AI text embedding service.
    ///
    /// # Errors
    ///
    /// Returns an error if any argument is blank.
    fn add_vertex_ai_embedding_generation(
        &mut self,
        model_id: &str,
        bearer_key: &str,
        location: &str,
        project_id: &str,
        service_id: Option<&str>,
    ) -> Result<&mut Self, ConnectorError> {
        let service = Arc::new(VertexAITextEmbeddingGenerationService::new(
            model_id, bearer_key, location, project_id, None,
        )?);
        register::<dyn TextEmbeddingGenerationService>(
            self.service_collection(),
            service_id,
            service,
        );
        Ok(self)
    }
}

impl<T: ServiceRegistrar + ?Sized> VertexAIServiceCollectionExt for T {}
