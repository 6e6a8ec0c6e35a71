//! Tool registry for managing available tools
//!
//! The registry holds all tools that agent steps may call, keyed by name.
//! Running a call never fails outright: unknown tools and tool errors come
//! back as failed [`ToolResult`]s.

use std::collections::HashMap;
use std::sync::Arc;

use super::search::SearchTool;
use super::tool::{Tool, ToolCall, ToolResult};
use crate::core::AgentState;

/// Registry that holds all available tools
#[derive(Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        tracing::info!("Registering tool: {}", name);
        self.tools.insert(name, Arc::new(tool));
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Run a tool call
    pub fn run(&self, state: &AgentState, call: &ToolCall) -> ToolResult {
        let Some(tool) = self.tools.get(&call.name) else {
            tracing::warn!("Tool not found: {}", call.name);
            return ToolResult::failure(&call.tool_id, format!("Tool not found: {}", call.name));
        };

        tracing::info!("Executing tool: {}", call.name);
        tracing::debug!("Arguments: {:?}", call.arguments);

        match tool.execute(state, call) {
            Ok(content) => {
                tracing::debug!("Tool {} completed", call.name);
                ToolResult::success(&call.tool_id, content)
            }
            Err(err) => {
                tracing::warn!("Tool {} failed: {:#}", call.name, err);
                ToolResult::failure(&call.tool_id, format!("Tool error: {:#}", err))
            }
        }
    }

    /// Get the list of tool names, sorted
    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A registry with the built-in `search` tool
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(SearchTool);
    registry
}
