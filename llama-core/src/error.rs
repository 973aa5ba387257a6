use reqwest::StatusCode;

/// Unified error for the Azure Llama client crates.
///
/// Validation and configuration failures are raised before any network I/O.
/// `Network` and `TransientHttp` are the only variants the retry loop will
/// re-attempt; everything else propagates to the caller on first occurrence.
#[derive(Debug, thiserror::Error)]
pub enum LlamaError {
    /// Invalid endpoint or API key at construction.
    #[error("Configuration error: {detail}")]
    Config { detail: String },

    /// Caller-supplied input outside its documented range.
    #[error("Validation error: {field}: {detail}")]
    Validation { field: &'static str, detail: String },

    /// Connection or timeout failure below the HTTP layer. Transient.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Retryable HTTP status from the endpoint (rate limit or server overload).
    #[error("Transient HTTP error {status}: {snippet}")]
    TransientHttp { status: StatusCode, snippet: String },

    /// Non-retryable HTTP status (bad request, auth rejection, missing deployment).
    #[error("HTTP error {status}: {snippet}")]
    PermanentHttp { status: StatusCode, snippet: String },

    /// A 2xx response whose body is not the expected chat completions shape.
    #[error("Response format error: {detail}")]
    ResponseFormat { detail: String },

    /// The retry budget was consumed; wraps the last transient failure.
    #[error("Retries exhausted after {attempts} attempts")]
    RetryExhausted {
        attempts: u32,
        #[source]
        source: Box<LlamaError>,
    },
}

pub type Result<T> = std::result::Result<T, LlamaError>;

/// Maximum number of characters of a response body kept in error messages.
const SNIPPET_MAX_CHARS: usize = 200;

/// Trim a response body down to a short excerpt suitable for error context.
#[must_use]
pub fn body_snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= SNIPPET_MAX_CHARS {
        return trimmed.to_string();
    }
    let mut snippet: String = trimmed.chars().take(SNIPPET_MAX_CHARS).collect();
    snippet.push_str("...");
    snippet
}
