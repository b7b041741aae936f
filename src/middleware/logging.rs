//! Request logging middleware
//!
//! Logs each HTTP request with its duration and status, correlated by a
//! trace ID that is propagated from (or added to) the response headers.

use axum::{
    body::Body,
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

/// Header name for trace ID
pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Header name for request ID (alias for trace ID)
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware to log HTTP requests and responses
///
/// Accepts an incoming `x-trace-id` (or `x-request-id`) header for
/// correlation across services; otherwise a fresh ID is generated. The
/// ID is echoed back on both headers.
pub async fn log_request(request: Request, next: Next) -> Response<Body> {
    let start = Instant::now();

    let trace_id = incoming_trace_id(&request)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %method,
        path = %path,
    );

    let mut response = {
        let _guard = span.enter();
        next.run(request).await
    };

    let status = response.status();
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    if status.is_server_error() {
        tracing::error!(
            trace_id = %trace_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = %format!("{:.2}", duration_ms),
            "Request failed"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            trace_id = %trace_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = %format!("{:.2}", duration_ms),
            "Client error"
        );
    } else {
        tracing::info!(
            trace_id = %trace_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = %format!("{:.2}", duration_ms),
            "Request completed"
        );
    }

    if let Ok(header_value) = HeaderValue::from_str(&trace_id) {
        response
            .headers_mut()
            .insert(TRACE_ID_HEADER, header_value.clone());
        response.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    response
}

/// Trace ID supplied by the caller, if any.
fn incoming_trace_id(request: &Request) -> Option<String> {
    [TRACE_ID_HEADER, REQUEST_ID_HEADER]
        .iter()
        .find_map(|name| request.headers().get(*name))
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http;

    #[test]
    fn test_incoming_trace_id_prefers_trace_header() {
        let request = http::Request::builder()
            .header(TRACE_ID_HEADER, "abc-123")
            .header(REQUEST_ID_HEADER, "other")
            .body(Body::empty())
            .unwrap();

        assert_eq!(incoming_trace_id(&request).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_incoming_trace_id_falls_back_to_request_id() {
        let request = http::Request::builder()
            .header(REQUEST_ID_HEADER, "req-9")
            .body(Body::empty())
            .unwrap();

        assert_eq!(incoming_trace_id(&request).as_deref(), Some("req-9"));
    }

    #[test]
    fn test_incoming_trace_id_absent() {
        let request = http::Request::builder().body(Body::empty()).unwrap();
        assert!(incoming_trace_id(&request).is_none());
    }
}
