#![deny(missing_docs)]

//! Gemini connectors for Google AI and Vertex AI.
//!
//! This library talks to Gemini models published on the Google AI API and on
//! Vertex AI. It builds the endpoint URLs and authenticated requests, sends them,
//! and projects the responses into host content types with typed metadata.
//!
//! The connectors are exposed as AI services that can be registered on a
//! [`KernelBuilder`](kernel::KernelBuilder):
//!
//! ```no_run
//! use gemini_connectors::extensions::GoogleAIServiceCollectionExt;
//! use gemini_connectors::kernel::{Kernel, TextGenerationService};
//!
//! # async fn run() -> Result<(), gemini_connectors::ConnectorError> {
//! let mut builder = Kernel::builder();
//! builder.add_google_ai_gemini_chat_completion("gemini-1.5-flash", "api-key", None)?;
//! let kernel = builder.build();
//!
//! let service = kernel.get_required_service::<dyn TextGenerationService>()?;
//! let contents = service.get_text_contents("Why is the sky blue?", None).await?;
//! println!("{}", contents[0]);
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod client;
pub mod config;
pub mod embeddings;
pub mod endpoint;
pub mod error;
pub mod extensions;
pub mod http;
pub mod kernel;
pub mod metadata;
pub mod models;
pub mod services;
pub mod settings;
pub mod weaviate;

pub use chat::GeminiChatCompletionClient;
pub use client::GeminiTextGenerationClient;
pub use config::{GoogleAIConfig, VertexAIConfig, WeaviateConfig};
pub use embeddings::{GoogleAIEmbeddingsClient, VertexAIEmbeddingsClient};
pub use endpoint::{EndpointProvider, GoogleAIGeminiEndpointProvider, VertexAIGeminiEndpointProvider};
pub use error::ConnectorError;
pub use http::{GoogleAIGeminiHttpRequestFactory, HttpRequestFactory, VertexAIGeminiHttpRequestFactory};
pub use metadata::{GeminiMetadata, MetadataMap};
pub use settings::GeminiPromptExecutionSettings;
