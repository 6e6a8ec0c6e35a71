//! Chat-completion types matching the OpenAI-compatible REST API used by OpenRouter

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Messages
// ============================================================================

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system" or "user"
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// Sampling options for a chat request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOptions {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_tokens: None,
        }
    }
}

impl ChatOptions {
    /// Cap the response length
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Body of a `POST /chat/completions` request
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl<'a> ChatRequest<'a> {
    pub fn new(model: &'a str, messages: &'a [ChatMessage], options: &ChatOptions) -> Self {
        Self {
            model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        }
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Extract `choices[0].message.content` from a decoded response body
pub fn extract_content(body: &Value) -> Option<&str> {
    body.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let messages = vec![ChatMessage::system("be brief"), ChatMessage::user("hi")];
        let request = ChatRequest::new("some/model", &messages, &ChatOptions::default());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "model": "some/model",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hi"}
                ],
                "temperature": 0.2f32
            })
        );
    }

    #[test]
    fn test_request_includes_max_tokens_when_set() {
        let messages = vec![ChatMessage::user("hi")];
        let options = ChatOptions::default().with_max_tokens(64);
        let value = serde_json::to_value(ChatRequest::new("m", &messages, &options)).unwrap();
        assert_eq!(value["max_tokens"], 64);
    }

    #[test]
    fn test_extract_content() {
        let body = json!({"choices": [{"message": {"role": "assistant", "content": "hello"}}]});
        assert_eq!(extract_content(&body), Some("hello"));

        assert_eq!(extract_content(&json!({"choices": []})), None);
        assert_eq!(extract_content(&json!({"error": "nope"})), None);
        assert_eq!(
            extract_content(&json!({"choices": [{"message": {"content": null}}]})),
            None
        );
    }
}
