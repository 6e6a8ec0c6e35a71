//! Tools available to agent steps
//!
//! - `Tool` - trait implemented by every tool
//! - `ToolRegistry` - name-keyed collection of tools
//! - `SearchTool` - the built-in `search` tool

pub mod registry;
pub mod search;
pub mod tool;

pub use registry::{default_registry, ToolRegistry};
pub use search::SearchTool;
pub use tool::{Tool, ToolCall, ToolResult};
