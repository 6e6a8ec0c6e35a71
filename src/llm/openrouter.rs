//! OpenRouter chat-completions client
//!
//! A direct HTTP client for `POST {base_url}/chat/completions`.
//!
//! ```ignore
//! let client = OpenRouterClient::from_env()?;
//! let reply = client
//!     .chat(&[ChatMessage::user("What is a monad?")], &ChatOptions::default())
//!     .await?;
//! ```

use anyhow::{anyhow, bail, Context, Result};
use reqwest::Client;
use serde_json::Value;

use super::config::OpenRouterConfig;
use super::provider::ChatProvider;
use super::types::{extract_content, ChatMessage, ChatOptions, ChatRequest};

/// OpenRouter LLM provider
pub struct OpenRouterClient {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenRouterClient {
    /// Create a client from explicit configuration
    pub fn new(config: OpenRouterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout()?)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, config })
    }

    /// Create a client from `OPENROUTER_*` environment variables
    pub fn from_env() -> Result<Self> {
        tracing::info!("Creating OpenRouter provider from environment");
        let config = OpenRouterConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &OpenRouterConfig {
        &self.config
    }

    async fn send_request(&self, request: &ChatRequest<'_>) -> Result<String> {
        let url = self.config.completions_url();
        tracing::debug!("[OpenRouter] POST {} ({} messages)", url, request.messages.len());

        let mut builder = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request);

        if let Some(referer) = &self.config.referer {
            builder = builder.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.config.title {
            builder = builder.header("X-Title", title);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| anyhow!("OpenRouter request failed: {}", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read OpenRouter response body")?;

        tracing::debug!("[OpenRouter] Response status: {}", status);

        if !status.is_success() {
            tracing::error!("[OpenRouter] API error: {} - {}", status, body);
            bail!("OpenRouter error {}: {}", status.as_u16(), body);
        }

        Ok(body)
    }
}

/// Decode a response body and pull out the assistant text
pub fn parse_completion(body: &str) -> Result<String> {
    let decoded: Value =
        serde_json::from_str(body).map_err(|_| anyhow!("OpenRouter returned invalid JSON."))?;

    match extract_content(&decoded) {
        Some(content) => Ok(content.to_string()),
        None => bail!("OpenRouter response missing content: {}", decoded),
    }
}

#[async_trait::async_trait]
impl ChatProvider for OpenRouterClient {
    async fn chat(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<String> {
        tracing::info!("Sending {} messages to OpenRouter", messages.len());

        let request = ChatRequest::new(&self.config.model, messages, options);
        let body = self.send_request(&request).await?;
        let content = parse_completion(&body)?;

        tracing::info!("Received response, length: {} chars", content.len());
        Ok(content)
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn provider_name(&self) -> &str {
        "OpenRouter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_completion() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "A monad is..."}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "A monad is...");
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_completion("<html>").unwrap_err();
        assert_eq!(err.to_string(), "OpenRouter returned invalid JSON.");
    }

    #[test]
    fn test_parse_missing_content() {
        let err = parse_completion(r#"{"choices": []}"#).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("OpenRouter response missing content:"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_error() {
        let config = OpenRouterConfig::new("sk")
            .with_base_url("http://127.0.0.1:1/v1")
            .with_timeout_s(2.0);
        let client = OpenRouterClient::new(config).unwrap();

        let err = client
            .chat(&[ChatMessage::user("hi")], &ChatOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("OpenRouter request failed"));
    }

    #[test]
    fn test_negative_timeout_is_config_error() {
        let err = OpenRouterClient::new(OpenRouterConfig::new("sk").with_timeout_s(-1.0))
            .err()
            .unwrap();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: OPENROUTER_TIMEOUT_S must be positive, got -1"
        );
    }

    #[test]
    fn test_provider_metadata() {
        let client =
            OpenRouterClient::new(OpenRouterConfig::new("sk").with_model("test/model")).unwrap();
        assert_eq!(client.model(), "test/model");
        assert_eq!(client.provider_name(), "OpenRouter");
    }
}
