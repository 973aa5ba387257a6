//! Bounded retry with exponential backoff around one network attempt.

use std::{future::Future, time::Duration};

use llama_core::{LlamaError, Result};

/// Retry policy for transient endpoint failures.
///
/// `max_attempts` counts total attempts, including the first; a value of 0
/// is treated as 1. The delay before retry `n+1` is the delay before retry
/// `n` scaled by `backoff_multiplier` and clamped at `max_delay`.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// A policy that never retries.
    #[must_use]
    pub fn no_retries() -> Self {
        Self { max_attempts: 1, ..Self::default() }
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    #[must_use]
    pub fn with_backoff_multiplier(mut self, backoff_multiplier: f32) -> Self {
        self.backoff_multiplier = backoff_multiplier;
        self
    }
}

/// True for failures a later attempt may clear: transport-level errors and
/// the rate-limit/overload status family.
#[must_use]
pub fn is_transient(error: &LlamaError) -> bool {
    matches!(error, LlamaError::Network(_) | LlamaError::TransientHttp { .. })
}

/// True for HTTP statuses the endpoint may clear on its own.
///
/// Request timeouts (408) surface as [`LlamaError::Network`] via the client
/// timeout instead, so they are not listed here.
#[must_use]
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

fn next_delay(current: Duration, retry_config: &RetryConfig) -> Duration {
    if current >= retry_config.max_delay {
        return retry_config.max_delay;
    }

    let multiplier = retry_config.backoff_multiplier.max(1.0) as f64;
    let scaled = Duration::from_secs_f64(current.as_secs_f64() * multiplier);
    scaled.min(retry_config.max_delay)
}

/// Run `operation` until it succeeds, fails permanently, or the attempt
/// budget runs out.
///
/// Transient failures on the last attempt are wrapped in
/// [`LlamaError::RetryExhausted`] carrying the attempt count and the last
/// failure as its source. Non-transient failures are returned as-is after a
/// single attempt.
pub async fn execute_with_retry<T, Op, Fut>(
    retry_config: &RetryConfig,
    mut operation: Op,
) -> Result<T>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = retry_config.max_attempts.max(1);
    let mut attempt: u32 = 1;
    let mut delay = retry_config.initial_delay;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if !is_transient(&error) => return Err(error),
            Err(error) if attempt >= max_attempts => {
                return Err(LlamaError::RetryExhausted {
                    attempts: attempt,
                    source: Box::new(error),
                });
            }
            Err(error) => {
                llama_telemetry::warn!(
                    attempt = attempt,
                    max_attempts = max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "Request failed with transient error; retrying"
                );
                tokio::time::sleep(delay).await;
                delay = next_delay(delay, retry_config);
                attempt += 1;
            }
        }
    }
}
