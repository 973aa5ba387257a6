use serde::{Deserialize, Serialize};

use crate::{LlamaError, Result};

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of a conversation. The caller owns the history and appends to it
/// across turns; the client never retains messages between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }

    /// Shorthand for a `system` message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Shorthand for a `user` message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Shorthand for an `assistant` message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Sampling parameters for one generation call. Passed per call, never
/// retained by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Maximum number of tokens to generate. Must be greater than zero.
    pub max_tokens: u32,
    /// Randomness control, `0.0..=2.0`.
    pub temperature: f32,
    /// Nucleus sampling cutoff, `(0.0, 1.0]`.
    pub top_p: f32,
    /// Token frequency penalty, `-2.0..=2.0`.
    pub frequency_penalty: f32,
    /// Token presence penalty, `-2.0..=2.0`.
    pub presence_penalty: f32,
    /// Sequences at which generation stops. Entries must be non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.7,
            top_p: 0.95,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stop_sequences: None,
        }
    }
}

impl GenerationParams {
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    #[must_use]
    pub fn with_frequency_penalty(mut self, frequency_penalty: f32) -> Self {
        self.frequency_penalty = frequency_penalty;
        self
    }

    #[must_use]
    pub fn with_presence_penalty(mut self, presence_penalty: f32) -> Self {
        self.presence_penalty = presence_penalty;
        self
    }

    #[must_use]
    pub fn with_stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.stop_sequences = Some(stop_sequences);
        self
    }

    /// Check every parameter against its documented range.
    ///
    /// The client calls this before building a request, so an out-of-range
    /// value never reaches the network.
    ///
    /// # Errors
    /// Returns [`LlamaError::Validation`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.max_tokens == 0 {
            return Err(LlamaError::Validation {
                field: "max_tokens",
                detail: "must be greater than zero".to_string(),
            });
        }
        in_range("temperature", self.temperature, 0.0, 2.0)?;
        if !self.top_p.is_finite() || self.top_p <= 0.0 || self.top_p > 1.0 {
            return Err(LlamaError::Validation {
                field: "top_p",
                detail: format!("expected a value in (0.0, 1.0], got {}", self.top_p),
            });
        }
        in_range("frequency_penalty", self.frequency_penalty, -2.0, 2.0)?;
        in_range("presence_penalty", self.presence_penalty, -2.0, 2.0)?;
        if let Some(stops) = &self.stop_sequences {
            if stops.iter().any(|s| s.is_empty()) {
                return Err(LlamaError::Validation {
                    field: "stop_sequences",
                    detail: "entries must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn in_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(LlamaError::Validation {
            field,
            detail: format!("expected a value in {min:?}..={max:?}, got {value}"),
        })
    }
}

/// Token accounting reported by the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Why the endpoint stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Other,
}

/// Extracted text plus whatever metadata the response carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub usage: Option<Usage>,
    pub finish_reason: Option<FinishReason>,
}
