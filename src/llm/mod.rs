pub mod config;
pub mod openrouter;
pub mod provider;
pub mod types;

pub use config::OpenRouterConfig;
pub use openrouter::{parse_completion, OpenRouterClient};
pub use provider::ChatProvider;
pub use types::{ChatMessage, ChatOptions, ChatRequest};
