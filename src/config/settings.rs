//! Application settings and configuration
//!
//! Settings load from environment variables (with `.env` support) and
//! carry sensible defaults for local development.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Default Bedrock model id served by the gateway.
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-haiku-20240307-v1:0";

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[value(alias = "dev")]
    Development,
    #[value(alias = "stage")]
    Staging,
    #[value(alias = "prod")]
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => anyhow::bail!(
                "Invalid environment: {}. Expected: development, staging, or production",
                s
            ),
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    // App settings
    pub app_name: String,
    pub app_version: String,
    pub environment: Environment,
    pub log_level: String,

    // Server settings
    pub host: String,
    pub port: u16,

    // AWS settings
    pub aws_region: String,
    pub bedrock_endpoint_url: Option<String>,

    // Model settings
    pub model_id: String,
    pub default_max_tokens: i32,
    pub default_temperature: f32,

    // Upstream call behavior
    pub bedrock_timeout_seconds: u64,
    pub max_retries: u32,

    // Debug options
    /// Print all request prompts to stdout
    #[serde(default)]
    pub print_prompts: bool,
}

impl Settings {
    /// Load settings from environment variables with defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignored in production typically)
        dotenvy::dotenv().ok();

        let settings = Self {
            app_name: env_or_default("APP_NAME", "bedrock-prompt-gateway"),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: env_or_default("ENVIRONMENT", "development")
                .parse()
                .unwrap_or_default(),
            log_level: env_or_default("LOG_LEVEL", "info"),

            host: env_or_default("HOST", "0.0.0.0"),
            port: env_or_default("PORT", "8000")
                .parse()
                .context("Invalid PORT value")?,

            aws_region: env_or_default("AWS_REGION", "us-east-1"),
            bedrock_endpoint_url: env::var("BEDROCK_ENDPOINT_URL").ok(),

            model_id: env_or_default("MODEL_ID", DEFAULT_MODEL_ID),
            default_max_tokens: env_or_default("DEFAULT_MAX_TOKENS", "1000")
                .parse()
                .context("Invalid DEFAULT_MAX_TOKENS value")?,
            default_temperature: env_or_default("DEFAULT_TEMPERATURE", "0.7")
                .parse()
                .context("Invalid DEFAULT_TEMPERATURE value")?,

            bedrock_timeout_seconds: env_or_default("BEDROCK_TIMEOUT_SECS", "120")
                .parse()
                .unwrap_or(120),
            max_retries: env_or_default("MAX_RETRIES", "3").parse().unwrap_or(3),

            print_prompts: env_or_default("PRINT_PROMPTS", "false")
                .parse()
                .unwrap_or(false),
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate settings
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("Port cannot be 0");
        }
        if self.model_id.is_empty() {
            anyhow::bail!("MODEL_ID cannot be empty");
        }
        if self.default_max_tokens <= 0 {
            anyhow::bail!("DEFAULT_MAX_TOKENS must be > 0");
        }
        if !(0.0..=1.0).contains(&self.default_temperature) {
            anyhow::bail!("DEFAULT_TEMPERATURE must be between 0.0 and 1.0");
        }
        if self.bedrock_timeout_seconds == 0 {
            anyhow::bail!("BEDROCK_TIMEOUT_SECS must be > 0");
        }

        Ok(())
    }

    /// Check if running in development mode
    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Get the server address string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "bedrock-prompt-gateway".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::Development,
            log_level: "info".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            aws_region: "us-east-1".to_string(),
            bedrock_endpoint_url: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
            default_max_tokens: 1000,
            default_temperature: 0.7,
            bedrock_timeout_seconds: 120,
            max_retries: 3,
            print_prompts: false,
        }
    }
}

/// Helper function to get environment variable with default
fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
