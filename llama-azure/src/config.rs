//! Configuration types for the Azure Llama endpoint.

use std::fmt;
use std::time::Duration;

/// API version sent as the `api-version` query parameter.
pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// Default bound on each network attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for an Azure-hosted Llama deployment.
///
/// Each endpoint hosts one model deployment, so no model name is carried
/// here; the endpoint URL identifies the deployment. Both values are
/// required and are validated by [`LlamaClient::new`].
///
/// # Example
///
/// ```rust
/// use llama_azure::AzureLlamaConfig;
///
/// let config = AzureLlamaConfig::new(
///     "https://Llama-3-3-70B-Instruct.swedencentral.models.ai.azure.com",
///     "my-api-key",
/// );
/// ```
///
/// [`LlamaClient::new`]: crate::LlamaClient::new
#[derive(Clone)]
pub struct AzureLlamaConfig {
    /// Azure endpoint URL for the deployed model.
    pub endpoint: String,
    /// API key for the endpoint.
    pub api_key: String,
    /// `api-version` query parameter value.
    pub api_version: String,
    /// Bound on each network attempt, including connect and body read.
    pub timeout: Duration,
}

impl AzureLlamaConfig {
    /// Create a config with the given endpoint and API key and default
    /// API version and timeout.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the `api-version` query parameter.
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Override the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Manual impl so the API key never lands in logs.
impl fmt::Debug for AzureLlamaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureLlamaConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}
