//! OpenRouter configuration
//!
//! Loaded from environment variables:
//! - `OPENROUTER_API_KEY` (required)
//! - `OPENROUTER_MODEL` (optional, defaults to `x-ai/grok-4.1-fast`)
//! - `OPENROUTER_BASE_URL` (optional, defaults to `https://openrouter.ai/api/v1`)
//! - `OPENROUTER_REFERER` / `OPENROUTER_TITLE` (optional attribution headers)
//! - `OPENROUTER_TIMEOUT_S` (optional, defaults to 30)

use std::env;
use std::time::Duration;

use crate::core::{FrameworkError, FrameworkResult};

pub const DEFAULT_MODEL: &str = "x-ai/grok-4.1-fast";
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_TIMEOUT_S: f64 = 30.0;

/// Connection settings for the OpenRouter API
#[derive(Debug, Clone, PartialEq)]
pub struct OpenRouterConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Sent as `HTTP-Referer`
    pub referer: Option<String>,
    /// Sent as `X-Title`
    pub title: Option<String>,
    pub timeout_s: f64,
}

impl OpenRouterConfig {
    /// Create a config with defaults for everything but the key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            referer: None,
            title: None,
            timeout_s: DEFAULT_TIMEOUT_S,
        }
    }

    /// Load the config from the process environment
    pub fn from_env() -> FrameworkResult<Self> {
        tracing::info!("Loading OpenRouter configuration from environment");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load the config through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> FrameworkResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("OPENROUTER_API_KEY")
            .ok_or_else(|| FrameworkError::MissingEnv("OPENROUTER_API_KEY".into()))?;

        let timeout_s = match non_empty("OPENROUTER_TIMEOUT_S") {
            Some(raw) => {
                let parsed: f64 = raw.trim().parse().map_err(|_| {
                    FrameworkError::InvalidConfig(format!(
                        "OPENROUTER_TIMEOUT_S must be a number, got '{}'",
                        raw
                    ))
                })?;
                check_timeout(parsed)?;
                parsed
            }
            None => DEFAULT_TIMEOUT_S,
        };

        let config = Self {
            api_key,
            model: non_empty("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_empty("OPENROUTER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            referer: non_empty("OPENROUTER_REFERER"),
            title: non_empty("OPENROUTER_TITLE"),
            timeout_s,
        };

        tracing::info!("Using model: {}", config.model);
        tracing::debug!("Base URL: {}", config.base_url);

        Ok(config)
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout_s(mut self, timeout_s: f64) -> Self {
        self.timeout_s = timeout_s;
        self
    }

    /// The request timeout, rejecting values that are not a positive number
    pub fn timeout(&self) -> FrameworkResult<Duration> {
        check_timeout(self.timeout_s)?;
        Ok(Duration::from_secs_f64(self.timeout_s))
    }

    /// Full URL of the chat-completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn check_timeout(timeout_s: f64) -> FrameworkResult<()> {
    if !timeout_s.is_finite() || timeout_s <= 0.0 {
        return Err(FrameworkError::InvalidConfig(format!(
            "OPENROUTER_TIMEOUT_S must be positive, got {}",
            timeout_s
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key() {
        let err = OpenRouterConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err.to_string(), "OPENROUTER_API_KEY is required");
    }

    #[test]
    fn test_defaults() {
        let config = OpenRouterConfig::from_lookup(lookup_from(&[("OPENROUTER_API_KEY", "sk")]))
            .unwrap();
        assert_eq!(config, OpenRouterConfig::new("sk"));
        assert_eq!(config.timeout().unwrap(), Duration::from_secs(30));
        assert_eq!(
            config.completions_url(),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_overrides() {
        let config = OpenRouterConfig::from_lookup(lookup_from(&[
            ("OPENROUTER_API_KEY", "sk"),
            ("OPENROUTER_MODEL", "openai/gpt-4o-mini"),
            ("OPENROUTER_BASE_URL", "http://localhost:8080/v1/"),
            ("OPENROUTER_REFERER", "https://example.com"),
            ("OPENROUTER_TITLE", "mce"),
            ("OPENROUTER_TIMEOUT_S", "2.5"),
        ]))
        .unwrap();

        assert_eq!(config.model, "openai/gpt-4o-mini");
        assert_eq!(config.completions_url(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(config.referer.as_deref(), Some("https://example.com"));
        assert_eq!(config.title.as_deref(), Some("mce"));
        assert_eq!(config.timeout().unwrap(), Duration::from_millis(2500));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = OpenRouterConfig::from_lookup(lookup_from(&[
            ("OPENROUTER_API_KEY", "sk"),
            ("OPENROUTER_TIMEOUT_S", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, FrameworkError::InvalidConfig(_)));

        let err = OpenRouterConfig::from_lookup(lookup_from(&[
            ("OPENROUTER_API_KEY", "sk"),
            ("OPENROUTER_TIMEOUT_S", "-1"),
        ]))
        .unwrap_err();
        assert!(matches!(err, FrameworkError::InvalidConfig(_)));
    }

    #[test]
    fn test_builder_timeout_is_validated() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = OpenRouterConfig::new("sk").with_timeout_s(bad).timeout().unwrap_err();
            assert!(matches!(err, FrameworkError::InvalidConfig(_)));
        }
    }
}
