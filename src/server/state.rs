//! Application state container
//!
//! Shared state passed to all request handlers via Axum's state
//! extraction. Cheap to clone and thread-safe.

use crate::config::{create_bedrock_client, Settings};
use crate::services::BedrockService;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Bedrock service for model inference
    pub bedrock: Arc<BedrockService>,

    /// Application start time (for uptime calculation)
    pub start_time: Instant,
}

impl AppState {
    /// Create a new application state
    ///
    /// Initializes the AWS SDK client asynchronously.
    pub async fn new(settings: Settings) -> anyhow::Result<Self> {
        let settings = Arc::new(settings);
        let start_time = Instant::now();

        tracing::debug!(
            region = %settings.aws_region,
            bedrock_endpoint = ?settings.bedrock_endpoint_url,
            model_id = %settings.model_id,
            "Initializing AWS SDK client"
        );

        let bedrock_sdk_client = create_bedrock_client(&settings).await;
        let bedrock = Arc::new(BedrockService::new(settings.clone(), bedrock_sdk_client));

        tracing::info!("Application state initialized successfully");

        Ok(Self {
            settings,
            bedrock,
            start_time,
        })
    }

    /// Get the application uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
