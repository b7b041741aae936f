//! Health check endpoints
//!
//! Provides health check endpoints for monitoring and container
//! orchestration (Kubernetes, ECS, etc.)

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::server::state::AppState;

/// Response for the main health check endpoint
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: u64,
}

/// Response for readiness probe
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: ReadinessChecks,
}

/// Individual readiness checks
#[derive(Debug, Serialize)]
pub struct ReadinessChecks {
    pub config_loaded: bool,
    pub bedrock: bool,
}

/// Response for liveness probe
#[derive(Serialize)]
pub struct LivenessResponse {
    pub alive: bool,
}

/// Main health check endpoint
///
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.settings.app_version.clone(),
        environment: state.settings.environment.to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Readiness probe endpoint
///
/// Bedrock has no health check API, so readiness reduces to having
/// loaded configuration and constructed the client; real connectivity
/// problems surface on the first invocation.
///
/// GET /ready
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let checks = ReadinessChecks {
        config_loaded: true,
        bedrock: state.bedrock.health_check(),
    };

    let ready = checks.config_loaded && checks.bedrock;

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    if !ready {
        tracing::warn!(checks = ?checks, "Service not ready");
    }

    (status, Json(ReadinessResponse { ready, checks }))
}

/// Liveness probe endpoint
///
/// GET /liveness
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { alive: true })
}
