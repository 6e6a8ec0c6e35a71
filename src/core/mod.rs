//! Core types for the agent framework
//!
//! This module provides the fundamental types used throughout the framework:
//! - `AgentState` - State threaded through an agent flow
//! - `ErrorInfo` - Failure payload carried by failed monads
//! - `FrameworkError` - Error types

pub mod error;
pub mod state;

pub use error::{ErrorInfo, FrameworkError, FrameworkResult, NO_FLOWS_MESSAGE};
pub use state::AgentState;
