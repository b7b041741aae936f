//! Native Claude request/response schema for the Bedrock InvokeModel API
//!
//! These are the raw JSON bodies exchanged with Anthropic models through
//! `InvokeModel` (as opposed to the provider-neutral Converse API).

use serde::{Deserialize, Serialize};

/// Anthropic API version accepted by Bedrock-hosted Claude models.
pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

// ============================================================================
// Request Body
// ============================================================================

/// A single message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClaudeMessage {
    pub role: String, // "user" or "assistant"
    pub content: String,
}

impl ClaudeMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for invoking a Claude model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClaudeRequest {
    pub anthropic_version: String,
    pub max_tokens: i32,
    pub temperature: f32,
    pub messages: Vec<ClaudeMessage>,
}

impl ClaudeRequest {
    /// Build a single-turn request: one user message carrying the prompt.
    pub fn single_turn(prompt: impl Into<String>, max_tokens: i32, temperature: f32) -> Self {
        Self {
            anthropic_version: ANTHROPIC_VERSION.to_string(),
            max_tokens,
            temperature,
            messages: vec![ClaudeMessage::user(prompt)],
        }
    }
}

// ============================================================================
// Response Body
// ============================================================================

/// Token usage reported by the model.
///
/// Defaults to zeroed counts so a response without a `usage` object still
/// deserializes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TokenUsage {
    #[serde(default)]
    pub input_tokens: i32,
    #[serde(default)]
    pub output_tokens: i32,
}

impl TokenUsage {
    pub fn new(input_tokens: i32, output_tokens: i32) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }
}

/// Content block in a Claude response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ClaudeContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ClaudeContentBlock {
    /// Get the text if this is a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ClaudeContentBlock::Text { text } => Some(text),
        }
    }
}

/// Response body returned by a Claude model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClaudeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub content: Vec<ClaudeContentBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: TokenUsage,
}

impl ClaudeResponse {
    /// Get the text of the first text content block, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| block.as_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_turn_request_shape() {
        let request = ClaudeRequest::single_turn("What is machine learning?", 1000, 0.7);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["anthropic_version"], "bedrock-2023-05-31");
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "What is machine learning?");
    }

    #[test]
    fn test_parse_response() {
        let body = serde_json::json!({
            "id": "msg_01ABC",
            "type": "message",
            "role": "assistant",
            "model": "claude-3-haiku-20240307",
            "content": [{"type": "text", "text": "Machine learning is..."}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 12, "output_tokens": 205}
        });

        let response: ClaudeResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.first_text(), Some("Machine learning is..."));
        assert_eq!(response.usage.input_tokens, 12);
        assert_eq!(response.usage.output_tokens, 205);
        assert_eq!(response.stop_reason.as_deref(), Some("end_turn"));
    }

    #[test]
    fn test_parse_response_without_usage() {
        let body = serde_json::json!({
            "content": [{"type": "text", "text": "hi"}]
        });

        let response: ClaudeResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.usage, TokenUsage::default());
        assert_eq!(response.first_text(), Some("hi"));
    }

    #[test]
    fn test_first_text_empty_content() {
        let response: ClaudeResponse = serde_json::from_value(serde_json::json!({
            "content": []
        }))
        .unwrap();
        assert!(response.first_text().is_none());
    }
}
