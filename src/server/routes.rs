//! Application routing
//!
//! This module defines all HTTP routes for the application.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{health, invoke};
use crate::middleware::logging::log_request;
use crate::server::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // Health check routes (for monitoring and orchestration)
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness))
        .route("/liveness", get(health::liveness));

    // The invocation route
    let invoke_routes = Router::new().route("/invoke", post(invoke::invoke));

    Router::new()
        .merge(invoke_routes)
        .merge(health_routes)
        .layer(create_cors_layer())
        // Custom request logging with trace IDs
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Create CORS layer with permissive settings for development
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([
            // Expose trace ID headers to clients
            "x-trace-id".parse().unwrap(),
            "x-request-id".parse().unwrap(),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::services::BedrockService;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use std::time::Instant;
    use tower::ServiceExt;

    /// Build an AppState whose Bedrock client has static test credentials
    /// and never touches the network (no request reaches it in these tests).
    fn test_state() -> AppState {
        let settings = Arc::new(Settings::default());

        let conf = aws_sdk_bedrockruntime::config::Builder::new()
            .behavior_version(aws_sdk_bedrockruntime::config::BehaviorVersion::latest())
            .region(aws_sdk_bedrockruntime::config::Region::new("us-east-1"))
            .credentials_provider(aws_sdk_bedrockruntime::config::Credentials::new(
                "test", "test", None, None, "test",
            ))
            .build();
        let client = aws_sdk_bedrockruntime::Client::from_conf(conf);

        AppState {
            settings: settings.clone(),
            bedrock: Arc::new(BedrockService::new(settings, client)),
            start_time: Instant::now(),
        }
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let router = create_router(test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let router = create_router(test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/liveness")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invoke_rejects_empty_prompt() {
        let router = create_router(test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/invoke")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"prompt": ""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Prompt is required");
    }

    #[tokio::test]
    async fn test_invoke_rejects_bad_parameters() {
        let router = create_router(test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/invoke")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"prompt": "hi", "max_tokens": -5}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_responses_carry_trace_id() {
        let router = create_router(test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().contains_key("x-trace-id"));
    }
}
