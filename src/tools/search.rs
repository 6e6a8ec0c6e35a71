//! Canned search tool

use anyhow::Result;

use super::tool::{Tool, ToolCall};
use crate::core::AgentState;

/// Offline search tool returning a fixed snippet for a query
///
/// The query comes from the `query` argument, falling back to the task.
pub struct SearchTool;

impl Tool for SearchTool {
    fn name(&self) -> &str {
        "search"
    }

    fn description(&self) -> &str {
        "Search for background material on a query"
    }

    fn execute(&self, state: &AgentState, call: &ToolCall) -> Result<String> {
        let query = call.str_argument("query").unwrap_or(&state.task);
        Ok(format!(
            "Search results for '{}': MCE formalizes agent steps using monads.",
            query
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_argument() {
        let call = ToolCall::new("tool-1", "search").with_argument("query", "functors");
        let output = SearchTool.execute(&AgentState::new("ignored"), &call).unwrap();
        assert_eq!(
            output,
            "Search results for 'functors': MCE formalizes agent steps using monads."
        );
    }

    #[test]
    fn test_falls_back_to_task() {
        let call = ToolCall::new("tool-1", "search");
        let output = SearchTool.execute(&AgentState::new("the task"), &call).unwrap();
        assert!(output.starts_with("Search results for 'the task'"));
    }
}
