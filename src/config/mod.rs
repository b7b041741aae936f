//! Configuration module
//!
//! Contains application settings and AWS SDK configuration.

pub mod aws;
pub mod settings;

pub use aws::{build_aws_config, create_bedrock_client, AwsConfigBuilder};
pub use settings::{Environment, Settings, DEFAULT_MODEL_ID};
