use colored::*;
use gemini_connectors::{
    kernel::TextEmbeddingGenerationService,
    services::{GoogleAITextEmbeddingGenerationService, VertexAITextEmbeddingGenerationService},
    GoogleAIConfig, VertexAIConfig,
};
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn display_embeddings(texts: &[String], embeddings: &[Vec<f32>]) {
    for (text, values) in texts.iter().zip(embeddings) {
        let preview: Vec<String> = values.iter().take(5).map(|v| format!("{v:.4}")).collect();
        println!("\n{} {}", "📝 Text:".blue().bold(), text);
        println!("{} {}", "Dimensions:".bright_yellow(), values.len());
        println!("{} [{}, ...]", "Values:".bright_yellow(), preview.join(", "));
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "🔢 Gemini Embeddings Demo".bright_green().bold());
    println!("{}", "=======================".bright_green());

    dotenv::dotenv().ok();

    let texts = vec![
        "The quick brown fox jumps over the lazy dog.".to_string(),
        "Rust is a systems programming language.".to_string(),
    ];

    let service: Box<dyn TextEmbeddingGenerationService> = match VertexAIConfig::from_env() {
        Ok(config) => {
            println!("{}", "✓ Using Vertex AI".green());
            Box::new(VertexAITextEmbeddingGenerationService::from_config(
                "text-embedding-004",
                &config,
                None,
            )?)
        }
        Err(_) => {
            println!("{}", "✓ Using Google AI".green());
            Box::new(GoogleAITextEmbeddingGenerationService::from_config(
                "text-embedding-004",
                &GoogleAIConfig::from_env()?,
                None,
            )?)
        }
    };

    let embeddings = service.generate_embeddings(&texts).await?;
    display_embeddings(&texts, &embeddings);

    println!("\n{}", "✨ Demo completed successfully!".green().bold());
    Ok(())
}
