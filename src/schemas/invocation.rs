//! Invocation payload and result schema definitions
//!
//! The payload is the small argument object clients send to the gateway;
//! the result carries the generated text, token usage, and the model id
//! that served the request.

use serde::{Deserialize, Serialize};

use crate::schemas::claude::TokenUsage;

/// Invocation payload.
///
/// Unknown extra fields are accepted and ignored. `max_tokens` and
/// `temperature` fall back to the configured defaults when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvocationRequest {
    #[serde(default)]
    pub prompt: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl InvocationRequest {
    /// Create a payload that relies on the configured defaults.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Set the token budget.
    pub fn with_max_tokens(mut self, max_tokens: i32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Token budget, falling back to `default` when omitted.
    pub fn max_tokens_or(&self, default: i32) -> i32 {
        self.max_tokens.unwrap_or(default)
    }

    /// Sampling temperature, falling back to `default` when omitted.
    pub fn temperature_or(&self, default: f32) -> f32 {
        self.temperature.unwrap_or(default)
    }

    /// Validate the payload.
    ///
    /// Returns the message to surface in a 400 response when the payload
    /// is unusable.
    pub fn validate(&self) -> Result<(), String> {
        if self.prompt.is_empty() {
            return Err("Prompt is required".to_string());
        }
        if let Some(max_tokens) = self.max_tokens {
            if max_tokens <= 0 {
                return Err("max_tokens must be greater than 0".to_string());
            }
        }
        if let Some(temperature) = self.temperature {
            if !(0.0..=1.0).contains(&temperature) {
                return Err("temperature must be between 0.0 and 1.0".to_string());
            }
        }
        Ok(())
    }
}

/// Invocation result returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvocationResponse {
    /// Generated text.
    pub response: String,

    /// Token usage reported by the model.
    pub usage: TokenUsage,

    /// Model id that served the request.
    pub model: String,
}

impl InvocationResponse {
    pub fn new(response: impl Into<String>, usage: TokenUsage, model: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            usage,
            model: model.into(),
        }
    }
}
