//! Invocation endpoint
//!
//! This module implements POST /invoke: it validates the payload, builds
//! a single-turn Claude request, invokes the model through Bedrock, and
//! returns the generated text with token usage.

use axum::{extract::State, Json};
use std::time::Instant;
use uuid::Uuid;

use crate::error::ApiError;
use crate::schemas::claude::ClaudeRequest;
use crate::schemas::invocation::{InvocationRequest, InvocationResponse};
use crate::server::state::AppState;
use crate::utils::preview;

/// POST /invoke - Invoke the configured Claude model with a prompt
///
/// Accepts `{"prompt": ..., "max_tokens": ..., "temperature": ...}` where
/// the generation parameters are optional, and responds with
/// `{"response": ..., "usage": ..., "model": ...}`.
pub async fn invoke(
    State(state): State<AppState>,
    Json(payload): Json<InvocationRequest>,
) -> Result<Json<InvocationResponse>, ApiError> {
    let start_time = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    payload.validate().map_err(ApiError::InvalidRequest)?;

    let model_id = state.settings.model_id.clone();
    let max_tokens = payload.max_tokens_or(state.settings.default_max_tokens);
    let temperature = payload.temperature_or(state.settings.default_temperature);

    tracing::info!(
        request_id = %request_id,
        model_id = %model_id,
        max_tokens = max_tokens,
        temperature = temperature,
        prompt = %preview(&payload.prompt, 100),
        "Invoking model"
    );

    if state.settings.print_prompts {
        println!("[{}] prompt: {}", request_id, payload.prompt);
    }

    let request = ClaudeRequest::single_turn(&payload.prompt, max_tokens, temperature);

    let response = state
        .bedrock
        .invoke_claude_with_retry(&model_id, &request)
        .await
        .map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                error = %e,
                "Bedrock InvokeModel call failed"
            );
            ApiError::Bedrock(e)
        })?;

    let text = response
        .first_text()
        .ok_or_else(|| anyhow::anyhow!("Model response contained no text content"))
        .map_err(ApiError::Internal)?;

    let duration_ms = start_time.elapsed().as_millis() as u64;

    tracing::info!(
        request_id = %request_id,
        model_id = %model_id,
        input_tokens = response.usage.input_tokens,
        output_tokens = response.usage.output_tokens,
        stop_reason = ?response.stop_reason,
        duration_ms = duration_ms,
        "Invocation completed successfully"
    );

    Ok(Json(InvocationResponse::new(
        text,
        response.usage,
        model_id,
    )))
}
