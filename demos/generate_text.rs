use colored::*;
use futures::StreamExt;
use gemini_connectors::{
    kernel::{AIService, PromptExecutionSettings, TextGenerationService},
    services::GoogleAIGeminiTextGenerationService,
    GoogleAIConfig,
};
use std::{error::Error, io::Write};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "🤖 Gemini Text Generation Demo".bright_green().bold());
    println!("{}", "============================".bright_green());

    dotenv::dotenv().ok();
    let config = GoogleAIConfig::from_env()?;
    let service = GoogleAIGeminiTextGenerationService::from_config("gemini-1.5-flash", &config, None)?;
    println!(
        "{} {}",
        "✓ Service initialized for".green(),
        service.model_id().unwrap_or_default()
    );

    let settings = PromptExecutionSettings::new()
        .with_extension("max_tokens", 256.into())
        .with_extension("temperature", 0.4.into());

    let prompt = "Write a haiku about programming.";
    println!("\n{} {}", "🔍 Prompt:".blue().bold(), prompt);

    for content in service.get_text_contents(prompt, Some(&settings)).await? {
        println!("\n{}", "💭 Generated Text:".cyan().bold());
        println!("{}", content.text.white());

        if let Some(metadata) = &content.metadata {
            println!("\n{}", "📊 Usage Statistics:".green().bold());
            println!("{} {:?}", "Finish Reason:".bright_yellow(), metadata.finish_reason);
            println!("{} {}", "Prompt Tokens:".bright_green(), metadata.prompt_token_count);
            println!("{} {}", "Total Tokens:".bright_green(), metadata.total_token_count);
        }
    }

    let tokens = service.client().count_tokens(prompt, None).await?;
    println!("\n{} {}", "🔢 Prompt tokens counted:".blue().bold(), tokens);

    println!("\n{}", "🌊 Streaming:".blue().bold());
    let mut stream = service
        .get_streaming_text_contents("Explain how rainbows form.", Some(&settings))
        .await?;
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(chunk) => {
                print!("{}", chunk.text.white());
                std::io::stdout().flush()?;
            }
            Err(e) => eprintln!("\n{} {}", "❌ Error:".red().bold(), e),
        }
    }

    println!("\n\n{}", "✨ Demo completed successfully!".green().bold());
    Ok(())
}
