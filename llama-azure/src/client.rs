//! Azure Llama client implementation.

use std::time::Instant;

use llama_core::{
    ChatMessage, GenerationParams, GenerationResult, LlamaError, Result, body_snippet,
};
use reqwest::{Client, Url, header};
use tracing::{debug, info, warn};

use crate::config::AzureLlamaConfig;
use crate::convert::{self, ChatCompletionRequest};
use crate::retry::{RetryConfig, execute_with_retry, is_retryable_status};

/// Client for a Llama model deployed on an Azure AI endpoint.
///
/// Holds the endpoint configuration and nothing else: no conversation or
/// parameter state survives a call, so one client may be shared freely
/// between concurrent call sites.
///
/// # Example
///
/// ```rust,ignore
/// use llama_azure::{AzureLlamaConfig, LlamaClient};
/// use llama_core::GenerationParams;
///
/// let client = LlamaClient::new(AzureLlamaConfig::new(
///     "https://my-endpoint.swedencentral.models.ai.azure.com",
///     "my-api-key",
/// ))?;
/// let result = client
///     .generate_text("What are three interesting facts about Sweden?", &GenerationParams::default())
///     .await?;
/// println!("{}", result.text);
/// ```
#[derive(Debug)]
pub struct LlamaClient {
    client: Client,
    api_key: String,
    url: String,
    retry_config: RetryConfig,
}

impl LlamaClient {
    /// Create a client from the given config.
    ///
    /// Validates the endpoint and API key and builds an HTTP client bounded
    /// by the configured per-attempt timeout. A trailing `/` on the
    /// endpoint is tolerated.
    ///
    /// # Errors
    /// Returns [`LlamaError::Config`] if the endpoint is empty, not a
    /// well-formed `http`/`https` URL, or the API key is empty.
    pub fn new(config: AzureLlamaConfig) -> Result<Self> {
        let endpoint = config.endpoint.trim().trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(LlamaError::Config { detail: "endpoint must not be empty".to_string() });
        }
        let parsed = Url::parse(endpoint).map_err(|e| LlamaError::Config {
            detail: format!("invalid endpoint URL `{endpoint}`: {e}"),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LlamaError::Config {
                detail: format!("endpoint must use http or https, got `{}`", parsed.scheme()),
            });
        }
        if config.api_key.trim().is_empty() {
            return Err(LlamaError::Config { detail: "api key must not be empty".to_string() });
        }

        let client = Client::builder().timeout(config.timeout).build().map_err(|e| {
            LlamaError::Config { detail: format!("failed to build HTTP client: {e}") }
        })?;

        let url = format!("{}/chat/completions?api-version={}", endpoint, config.api_version);

        info!(
            endpoint = %endpoint,
            api_version = %config.api_version,
            timeout_secs = config.timeout.as_secs(),
            "LlamaClient initialized"
        );

        Ok(Self { client, api_key: config.api_key, url, retry_config: RetryConfig::default() })
    }

    /// Set the retry configuration, consuming and returning `self` for
    /// builder chaining.
    #[must_use]
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    /// Set the retry configuration by mutable reference.
    pub fn set_retry_config(&mut self, retry_config: RetryConfig) {
        self.retry_config = retry_config;
    }

    /// Return a reference to the current retry configuration.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }

    /// Generate a completion for a single prompt.
    ///
    /// The prompt is sent as a one-message `user` history; everything else
    /// is identical to [`generate_chat`](Self::generate_chat).
    ///
    /// # Errors
    /// - [`LlamaError::Validation`] for an empty prompt or out-of-range
    ///   params, before any network I/O
    /// - [`LlamaError::PermanentHttp`] for a non-retryable status
    /// - [`LlamaError::ResponseFormat`] for a 2xx body without text
    /// - [`LlamaError::RetryExhausted`] once transient failures consume the
    ///   attempt budget
    pub async fn generate_text(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<GenerationResult> {
        if prompt.is_empty() {
            return Err(LlamaError::Validation {
                field: "prompt",
                detail: "must not be empty".to_string(),
            });
        }
        params.validate()?;

        let messages = [ChatMessage::user(prompt)];
        self.request_completion(&messages, params).await
    }

    /// Generate a completion for a conversation history.
    ///
    /// Messages are sent to the endpoint in the order given; the caller is
    /// responsible for accumulating history across turns.
    ///
    /// # Errors
    /// Same as [`generate_text`](Self::generate_text), with
    /// [`LlamaError::Validation`] for an empty history.
    pub async fn generate_chat(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<GenerationResult> {
        if messages.is_empty() {
            return Err(LlamaError::Validation {
                field: "messages",
                detail: "history must contain at least one message".to_string(),
            });
        }
        params.validate()?;

        self.request_completion(messages, params).await
    }

    async fn request_completion(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<GenerationResult> {
        let started = Instant::now();
        let body = convert::build_request_body(messages, params);

        debug!(
            message_count = messages.len(),
            max_tokens = params.max_tokens,
            "POST {}", self.url
        );

        let response_body =
            execute_with_retry(&self.retry_config, || self.send_once(&body)).await?;
        let result = convert::parse_response(&response_body)?;

        info!(
            latency_ms = started.elapsed().as_millis() as u64,
            text_len = result.text.len(),
            "chat completion succeeded"
        );

        Ok(result)
    }

    /// One network attempt: POST the body, classify the status, return the
    /// raw 2xx body for parsing outside the retry loop.
    async fn send_once(&self, body: &ChatCompletionRequest<'_>) -> Result<String> {
        let response = self
            .client
            .post(&self.url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let snippet = body_snippet(&text);
            warn!(%status, %snippet, "chat completions returned non-success status");

            if is_retryable_status(status.as_u16()) {
                return Err(LlamaError::TransientHttp { status, snippet });
            }
            return Err(LlamaError::PermanentHttp { status, snippet });
        }

        Ok(response.text().await?)
    }
}
