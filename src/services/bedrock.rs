//! Bedrock service for AWS Bedrock API interactions
//!
//! This module handles communication with AWS Bedrock for model inference.
//! It uses the InvokeModel API with the native Anthropic request body.

use aws_sdk_bedrockruntime::{
    operation::invoke_model::InvokeModelError, primitives::Blob, Client as BedrockRuntimeClient,
};
use aws_smithy_runtime_api::client::result::SdkError;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;
use crate::schemas::claude::{ClaudeRequest, ClaudeResponse};
use crate::utils::retry::{retry_with_backoff, RetryConfig};
use crate::utils::timeout::{with_timeout, TimeoutError};

/// Service for invoking Claude models through AWS Bedrock.
///
/// Wraps the Bedrock Runtime SDK client and provides a typed invoke call
/// with error classification, per-call deadline, and retry on transient
/// failures.
#[derive(Clone)]
pub struct BedrockService {
    /// Application settings
    settings: Arc<Settings>,

    /// AWS Bedrock Runtime SDK client
    client: BedrockRuntimeClient,
}

impl BedrockService {
    /// Create a new Bedrock service.
    pub fn new(settings: Arc<Settings>, client: BedrockRuntimeClient) -> Self {
        Self { settings, client }
    }

    /// Get a reference to the underlying AWS SDK client
    pub fn client(&self) -> &BedrockRuntimeClient {
        &self.client
    }

    /// Check if the Bedrock service is healthy
    ///
    /// There is no health check API for Bedrock Runtime; the service is
    /// considered healthy once the client exists. Connectivity problems
    /// surface on the first real call.
    pub fn health_check(&self) -> bool {
        true
    }

    /// Invoke a Claude model once with the given request body.
    pub async fn invoke_claude(
        &self,
        model_id: &str,
        request: &ClaudeRequest,
    ) -> Result<ClaudeResponse, BedrockError> {
        let body = serde_json::to_vec(request)
            .map_err(|e| BedrockError::Serialization(e.to_string()))?;

        tracing::debug!(
            model_id = %model_id,
            max_tokens = request.max_tokens,
            temperature = request.temperature,
            "Calling Bedrock InvokeModel API"
        );

        let output = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(BedrockError::from_invoke_error)?;

        let response: ClaudeResponse = serde_json::from_slice(output.body().as_ref())
            .map_err(|e| BedrockError::Deserialization(e.to_string()))?;

        tracing::debug!(
            stop_reason = ?response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Bedrock InvokeModel call completed"
        );

        Ok(response)
    }

    /// Invoke a Claude model with a per-attempt deadline and retry on
    /// transient failures.
    ///
    /// The deadline and retry budget come from the application settings.
    pub async fn invoke_claude_with_retry(
        &self,
        model_id: &str,
        request: &ClaudeRequest,
    ) -> Result<ClaudeResponse, BedrockError> {
        let deadline = Duration::from_secs(self.settings.bedrock_timeout_seconds);
        let retry_config = RetryConfig::bedrock().with_max_retries(self.settings.max_retries);

        retry_with_backoff(&retry_config, BedrockError::is_retryable, || async {
            match with_timeout(deadline, self.invoke_claude(model_id, request)).await {
                Ok(response) => Ok(response),
                Err(TimeoutError::Timeout(elapsed)) => Err(BedrockError::Timeout(elapsed)),
                Err(TimeoutError::Inner(err)) => Err(err),
            }
        })
        .await
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during Bedrock API calls
#[derive(Debug, thiserror::Error)]
pub enum BedrockError {
    /// Request serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Response deserialization failed
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Throttling error (rate limited or quota exceeded)
    #[error("Throttled: {0}")]
    Throttled(String),

    /// Validation error (invalid request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Service unavailable or model not ready
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Access denied
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Internal service error
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Call exceeded the configured deadline
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// Unknown error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl BedrockError {
    /// Create BedrockError from an InvokeModel API error
    pub fn from_invoke_error<R>(err: SdkError<InvokeModelError, R>) -> Self
    where
        R: std::fmt::Debug,
    {
        match &err {
            SdkError::ServiceError(service_err) => {
                let error = service_err.err();
                match error {
                    InvokeModelError::ThrottlingException(e) => BedrockError::Throttled(
                        e.message().unwrap_or("Rate limited").to_string(),
                    ),
                    InvokeModelError::ServiceQuotaExceededException(e) => BedrockError::Throttled(
                        e.message().unwrap_or("Service quota exceeded").to_string(),
                    ),
                    InvokeModelError::ValidationException(e) => BedrockError::ValidationError(
                        e.message().unwrap_or("Validation failed").to_string(),
                    ),
                    InvokeModelError::ModelNotReadyException(e) => BedrockError::ServiceUnavailable(
                        e.message().unwrap_or("Model not ready").to_string(),
                    ),
                    InvokeModelError::ModelTimeoutException(e) => BedrockError::ServiceUnavailable(
                        e.message().unwrap_or("Model timeout").to_string(),
                    ),
                    InvokeModelError::ServiceUnavailableException(e) => {
                        BedrockError::ServiceUnavailable(
                            e.message().unwrap_or("Service unavailable").to_string(),
                        )
                    }
                    InvokeModelError::InternalServerException(e) => BedrockError::InternalError(
                        e.message().unwrap_or("Internal server error").to_string(),
                    ),
                    InvokeModelError::ModelErrorException(e) => BedrockError::InternalError(
                        e.message().unwrap_or("Model error").to_string(),
                    ),
                    InvokeModelError::AccessDeniedException(e) => BedrockError::AccessDenied(
                        e.message().unwrap_or("Access denied").to_string(),
                    ),
                    InvokeModelError::ResourceNotFoundException(e) => BedrockError::ModelNotFound(
                        e.message().unwrap_or("Resource not found").to_string(),
                    ),
                    _ => BedrockError::Unknown(format!("{:?}", error)),
                }
            }
            _ => BedrockError::Unknown(format!("{:?}", err)),
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BedrockError::Throttled(_)
                | BedrockError::ServiceUnavailable(_)
                | BedrockError::InternalError(_)
                | BedrockError::Timeout(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bedrock_error_is_retryable() {
        assert!(BedrockError::Throttled("test".to_string()).is_retryable());
        assert!(BedrockError::ServiceUnavailable("test".to_string()).is_retryable());
        assert!(BedrockError::InternalError("test".to_string()).is_retryable());
        assert!(BedrockError::Timeout(Duration::from_secs(120)).is_retryable());

        assert!(!BedrockError::ValidationError("test".to_string()).is_retryable());
        assert!(!BedrockError::AccessDenied("test".to_string()).is_retryable());
        assert!(!BedrockError::ModelNotFound("test".to_string()).is_retryable());
        assert!(!BedrockError::Deserialization("test".to_string()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = BedrockError::Throttled("too many requests".to_string());
        assert_eq!(err.to_string(), "Throttled: too many requests");
    }
}
