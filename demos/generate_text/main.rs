//! Single-prompt text generation.
//!
//! ```bash
//! export AZURE_API_KEY=...
//! export AZURE_ENDPOINT=https://Llama-3-3-70B-Instruct.swedencentral.models.ai.azure.com
//! cargo run --example generate_text
//! ```

use llama_azure::{AzureLlamaConfig, LlamaClient};
use llama_core::GenerationParams;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    llama_telemetry::init_telemetry("llama-demo")?;

    let api_key = std::env::var("AZURE_API_KEY").expect("AZURE_API_KEY must be set");
    let endpoint = std::env::var("AZURE_ENDPOINT").expect("AZURE_ENDPOINT must be set");

    let client = LlamaClient::new(AzureLlamaConfig::new(endpoint, api_key))?;

    let params = GenerationParams::default().with_max_tokens(500).with_temperature(0.7);
    let result = client
        .generate_text("What are three interesting facts about Sweden?", &params)
        .await?;

    println!("=== Text Generation ===\n");
    println!("{}\n", result.text);
    if let Some(usage) = result.usage {
        println!("  Prompt tokens:     {}", usage.prompt_tokens);
        println!("  Completion tokens: {}", usage.completion_tokens);
        println!("  Total tokens:      {}", usage.total_tokens);
    }
    if let Some(reason) = result.finish_reason {
        println!("  Finish reason:     {reason:?}");
    }

    Ok(())
}
