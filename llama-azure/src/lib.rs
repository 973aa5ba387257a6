//! # llama-azure
//!
//! Client for Llama models deployed on Azure AI endpoints.
//!
//! Formats a chat completions request from a prompt or a message history,
//! POSTs it to the configured endpoint, retries transient failures with
//! exponential backoff, and returns the extracted text plus token usage and
//! finish reason when the response carries them.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use llama_azure::{AzureLlamaConfig, LlamaClient};
//! use llama_core::{ChatMessage, GenerationParams};
//!
//! let client = LlamaClient::new(AzureLlamaConfig::new(
//!     std::env::var("AZURE_ENDPOINT")?,
//!     std::env::var("AZURE_API_KEY")?,
//! ))?;
//!
//! let result = client
//!     .generate_chat(
//!         &[
//!             ChatMessage::system("You are a helpful assistant."),
//!             ChatMessage::user("What are three interesting facts about Sweden?"),
//!         ],
//!         &GenerationParams::default().with_max_tokens(500),
//!     )
//!     .await?;
//! println!("{}", result.text);
//! ```
//!
//! ## Authentication
//!
//! Requests carry `Authorization: Bearer <api-key>` and the `api-version`
//! query parameter expected by serverless Azure deployments.
//!
//! ## Retry behavior
//!
//! Connection failures, timeouts, and the 429/500/502/503/504 status family
//! are retried up to [`RetryConfig::max_attempts`] with exponential backoff;
//! every other failure surfaces immediately. See [`retry`].

mod client;
mod config;
pub(crate) mod convert;
pub mod retry;

pub use client::LlamaClient;
pub use config::{AzureLlamaConfig, DEFAULT_API_VERSION, DEFAULT_TIMEOUT};
pub use retry::RetryConfig;
