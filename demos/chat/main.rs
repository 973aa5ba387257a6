//! Chat completion over a message history.
//!
//! ```bash
//! export AZURE_API_KEY=...
//! export AZURE_ENDPOINT=https://Llama-3-3-70B-Instruct.swedencentral.models.ai.azure.com
//! cargo run --example chat
//! ```

use llama_azure::{AzureLlamaConfig, LlamaClient, RetryConfig};
use llama_core::{ChatMessage, GenerationParams};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    llama_telemetry::init_telemetry("llama-demo")?;

    let api_key = std::env::var("AZURE_API_KEY").expect("AZURE_API_KEY must be set");
    let endpoint = std::env::var("AZURE_ENDPOINT").expect("AZURE_ENDPOINT must be set");

    // More patient retry policy than the default, for shared deployments.
    let retry_config = RetryConfig::default()
        .with_max_attempts(5)
        .with_initial_delay(Duration::from_millis(500))
        .with_max_delay(Duration::from_secs(30));

    let client = LlamaClient::new(AzureLlamaConfig::new(endpoint, api_key))?
        .with_retry_config(retry_config);

    let history = vec![
        ChatMessage::system("You are a helpful assistant."),
        ChatMessage::user("What are three interesting facts about Sweden?"),
    ];

    let params = GenerationParams::default().with_max_tokens(500).with_temperature(0.7);
    let result = client.generate_chat(&history, &params).await?;

    println!("=== Chat Response ===\n");
    println!("{}", result.text);

    Ok(())
}
