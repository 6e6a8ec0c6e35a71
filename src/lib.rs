//! Composable, stateful, fallible agent workflows
//!
//! Agent steps are chained through a result-state monad: every step sees the
//! current state and value and returns a new state with either a value or an
//! error. A failure short-circuits the rest of the chain.

pub mod core;
pub mod monad;
pub mod tools;

// Optional components
pub mod cli;
pub mod llm;
pub mod logging;

// Steps and flows for the example agent
pub mod agent;

pub use crate::core::{AgentState, ErrorInfo, FrameworkError, FrameworkResult};
pub use crate::monad::{gather_sync, gather_sync_with, AgentMonad, AsyncAgentMonad, Outcome};
