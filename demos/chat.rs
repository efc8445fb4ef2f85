use colored::*;
use futures::StreamExt;
use gemini_connectors::{
    extensions::GoogleAIServiceCollectionExt,
    kernel::{ChatCompletionService, ChatHistory, Kernel},
    GoogleAIConfig,
};
use std::{error::Error, io::Write};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("\n{}", "💬 Gemini Chat Demo".bright_blue().bold());
    println!("{}", "=================".bright_blue());

    dotenv::dotenv().ok();
    let config = GoogleAIConfig::from_env()?;

    let mut builder = Kernel::builder();
    builder.add_google_ai_gemini_chat_completion("gemini-1.5-flash", &config.api_key, None)?;
    let kernel = builder.build();
    let chat = kernel.get_required_service::<dyn ChatCompletionService>()?;

    let mut history = ChatHistory::with_system_message(
        "You are a helpful AI assistant with expertise in Rust programming. \
        You provide clear, concise answers with code examples when relevant.",
    );
    println!("{}", "✓ Chat initialized with Rust programming expertise".green());

    let messages = [
        "What makes Rust's ownership model unique?",
        "Show me a short example of using Option in Rust.",
    ];

    for message in messages {
        println!("\n{}", "━".repeat(50).bright_black());
        println!("{} {}", "👤 User:".blue().bold(), message);
        print!("{} ", "🤖 Assistant:".green().bold());
        std::io::stdout().flush()?;

        history.add_user_message(message);

        let mut reply = String::new();
        let mut stream = chat
            .get_streaming_chat_message_contents(&history, None)
            .await?;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            print!("{}", chunk.content.white());
            std::io::stdout().flush()?;
            reply.push_str(&chunk.content);
        }
        println!();

        history.add_assistant_message(reply);
    }

    println!("\n{}", "✨ Demo completed successfully!".green().bold());
    Ok(())
}
