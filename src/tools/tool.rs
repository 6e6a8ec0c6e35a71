//! Tool trait definition
//!
//! All tools implement this trait to provide a consistent interface.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::AgentState;

/// A request to run a named tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Identifier correlating the call with its result
    pub tool_id: String,
    /// Name of the tool to run
    pub name: String,
    /// Tool arguments
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl ToolCall {
    /// Create a call with no arguments
    pub fn new(tool_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tool_id: tool_id.into(),
            name: name.into(),
            arguments: Map::new(),
        }
    }

    /// Add an argument
    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Look up a string argument
    pub fn str_argument(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(Value::as_str)
    }
}

/// Result of executing a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Identifier of the call this result answers
    pub tool_id: String,
    /// The output of the tool, or the error message
    pub content: String,
    /// Whether the tool execution resulted in an error
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(tool_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_id: tool_id.into(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Create an error tool result
    pub fn failure(tool_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_id: tool_id.into(),
            content: content.into(),
            is_error: true,
        }
    }
}

/// Trait for tools that agent steps can call
pub trait Tool: Send + Sync {
    /// Get the name of this tool
    fn name(&self) -> &str;

    /// Get a description of this tool
    fn description(&self) -> &str;

    /// Execute the tool against the current state
    ///
    /// Returns the textual output; errors are reported to the caller as a
    /// failed [`ToolResult`] by the registry.
    fn execute(&self, state: &AgentState, call: &ToolCall) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_result_success() {
        let result = ToolResult::success("tool-1", "output");
        assert_eq!(result.tool_id, "tool-1");
        assert_eq!(result.content, "output");
        assert!(!result.is_error);
    }

    #[test]
    fn test_tool_result_failure() {
        let result = ToolResult::failure("tool-1", "error message");
        assert_eq!(result.content, "error message");
        assert!(result.is_error);
    }

    #[test]
    fn test_tool_call_arguments() {
        let call = ToolCall::new("tool-1", "search")
            .with_argument("query", "monads")
            .with_argument("limit", 3);

        assert_eq!(call.str_argument("query"), Some("monads"));
        assert_eq!(call.str_argument("limit"), None);
        assert_eq!(call.arguments.len(), 2);
    }

    #[test]
    fn test_tool_call_serde() {
        let call: ToolCall =
            serde_json::from_str(r#"{"tool_id": "t", "name": "search"}"#).unwrap();
        assert_eq!(call, ToolCall::new("t", "search"));
    }
}
