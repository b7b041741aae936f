//! Schema module
//!
//! Contains the invocation payload/result models and the native Claude
//! wire types for the Bedrock InvokeModel API.

pub mod claude;
pub mod invocation;

pub use claude::{ClaudeContentBlock, ClaudeMessage, ClaudeRequest, ClaudeResponse, TokenUsage};
pub use invocation::{InvocationRequest, InvocationResponse};
