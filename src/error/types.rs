//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::BedrockError;

/// Errors surfaced to gateway clients.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Bedrock error: {0}")]
    Bedrock(#[from] BedrockError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// HTTP status code for this error.
    ///
    /// Upstream failures are classified rather than collapsed into a
    /// single 500: throttling surfaces as 429 so clients can back off,
    /// unavailability as 503 so load balancers can react.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Bedrock(err) => match err {
                BedrockError::ValidationError(_)
                | BedrockError::Serialization(_)
                | BedrockError::ModelNotFound(_) => StatusCode::BAD_REQUEST,
                BedrockError::Throttled(_) => StatusCode::TOO_MANY_REQUESTS,
                BedrockError::ServiceUnavailable(_) | BedrockError::Timeout(_) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                BedrockError::AccessDenied(_)
                | BedrockError::InternalError(_)
                | BedrockError::Deserialization(_)
                | BedrockError::Unknown(_) => StatusCode::BAD_GATEWAY,
            },
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::InvalidRequest(msg) => ErrorBody::new(msg),
            ApiError::Bedrock(err) => {
                ErrorBody::new(format!("Bedrock error: {}", error_label(&err)))
                    .with_message(err.to_string())
            }
            ApiError::Internal(err) => {
                ErrorBody::new("Internal server error").with_message(err.to_string())
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Short label for a Bedrock error class, used in the `error` field.
fn error_label(err: &BedrockError) -> &'static str {
    match err {
        BedrockError::Serialization(_) => "SerializationError",
        BedrockError::Deserialization(_) => "DeserializationError",
        BedrockError::ModelNotFound(_) => "ResourceNotFoundException",
        BedrockError::Throttled(_) => "ThrottlingException",
        BedrockError::ValidationError(_) => "ValidationException",
        BedrockError::ServiceUnavailable(_) => "ServiceUnavailableException",
        BedrockError::AccessDenied(_) => "AccessDeniedException",
        BedrockError::InternalError(_) => "InternalServerException",
        BedrockError::Timeout(_) => "Timeout",
        BedrockError::Unknown(_) => "UnknownException",
    }
}

/// JSON error body: `{"error": ..., "message": ...}`.
///
/// `message` is omitted when there is no detail beyond the error itself,
/// so a bare validation failure serializes as `{"error": "Prompt is required"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_status() {
        let err = ApiError::InvalidRequest("Prompt is required".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_bedrock_error_statuses() {
        let throttled = ApiError::Bedrock(BedrockError::Throttled("slow down".to_string()));
        assert_eq!(throttled.status(), StatusCode::TOO_MANY_REQUESTS);

        let unavailable =
            ApiError::Bedrock(BedrockError::ServiceUnavailable("not ready".to_string()));
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);

        let denied = ApiError::Bedrock(BedrockError::AccessDenied("no".to_string()));
        assert_eq!(denied.status(), StatusCode::BAD_GATEWAY);

        let invalid = ApiError::Bedrock(BedrockError::ValidationError("bad".to_string()));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_bare_error_body_omits_message() {
        let body = ErrorBody::new("Prompt is required");
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"Prompt is required"}"#);
    }

    #[test]
    fn test_error_body_with_message() {
        let body = ErrorBody::new("Bedrock error: ThrottlingException")
            .with_message("Too many requests, please wait");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "Bedrock error: ThrottlingException");
        assert_eq!(json["message"], "Too many requests, please wait");
    }
}
