//! Services module
//!
//! Contains business logic and external service integrations.

pub mod bedrock;

pub use bedrock::{BedrockError, BedrockService};
