//! Chat provider trait
//!
//! Abstracts the chat-completion call so agent steps can be driven by
//! OpenRouter in production and by a scripted provider in tests.

use anyhow::Result;

use super::types::{ChatMessage, ChatOptions};

/// Trait for LLM providers used by agent steps
#[async_trait::async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send the conversation and return the assistant's text reply
    async fn chat(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<String>;

    /// Get the current model name
    fn model(&self) -> &str;

    /// Get the provider name (e.g., "openrouter")
    fn provider_name(&self) -> &str;
}
