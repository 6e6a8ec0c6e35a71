//! Framework error types
//!
//! Two families live here:
//! - `ErrorInfo` - the payload carried by a failed monad. Flows through chains unchanged.
//! - `FrameworkError` - errors raised by the framework itself (contract violations, config).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Sentinel message reported when `gather` is given no flows
pub const NO_FLOWS_MESSAGE: &str = "No flows provided";

/// Failure payload attached to a failed `AgentMonad`
///
/// Short-circuiting steps pass this through verbatim; nothing in the
/// framework re-wraps it.
#[derive(Debug, Clone)]
pub enum ErrorInfo {
    /// A step explicitly failed with a message (tool not found, bad input, ...)
    Message(String),

    /// A step panicked and the fault was captured at the `then` boundary
    Panic(String),

    /// `gather` was called with an empty collection
    NoFlows,

    /// A structured error from an I/O collaborator (HTTP, parsing)
    Source(Arc<anyhow::Error>),
}

impl ErrorInfo {
    /// Create a message failure
    pub fn message(msg: impl Into<String>) -> Self {
        ErrorInfo::Message(msg.into())
    }

    /// Build a `Panic` payload from the value returned by `catch_unwind`
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let msg = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        ErrorInfo::Panic(msg)
    }

    /// Whether this failure came from a captured panic
    pub fn is_panic(&self) -> bool {
        matches!(self, ErrorInfo::Panic(_))
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorInfo::Message(msg) => write!(f, "{}", msg),
            ErrorInfo::Panic(msg) => write!(f, "Step panicked: {}", msg),
            ErrorInfo::NoFlows => write!(f, "{}", NO_FLOWS_MESSAGE),
            ErrorInfo::Source(err) => write!(f, "{:#}", err),
        }
    }
}

impl PartialEq for ErrorInfo {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ErrorInfo::Message(a), ErrorInfo::Message(b)) => a == b,
            (ErrorInfo::Panic(a), ErrorInfo::Panic(b)) => a == b,
            (ErrorInfo::NoFlows, ErrorInfo::NoFlows) => true,
            (ErrorInfo::Source(a), ErrorInfo::Source(b)) => {
                Arc::ptr_eq(a, b) || format!("{:#}", a) == format!("{:#}", b)
            }
            _ => false,
        }
    }
}

impl From<String> for ErrorInfo {
    fn from(msg: String) -> Self {
        ErrorInfo::Message(msg)
    }
}

impl From<&str> for ErrorInfo {
    fn from(msg: &str) -> Self {
        ErrorInfo::Message(msg.to_string())
    }
}

impl From<anyhow::Error> for ErrorInfo {
    fn from(err: anyhow::Error) -> Self {
        ErrorInfo::Source(Arc::new(err))
    }
}

impl From<FrameworkError> for ErrorInfo {
    fn from(err: FrameworkError) -> Self {
        ErrorInfo::Source(Arc::new(err.into()))
    }
}

/// Errors raised by the framework itself
#[derive(Error, Debug)]
pub enum FrameworkError {
    /// A value was read from a failed monad
    #[error("AgentMonad has no value: {0}")]
    NoValue(ErrorInfo),

    /// A required environment variable is not set
    #[error("{0} is required")]
    MissingEnv(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for framework operations
pub type FrameworkResult<T> = Result<T, FrameworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_info_display() {
        assert_eq!(ErrorInfo::message("boom").to_string(), "boom");
        assert_eq!(ErrorInfo::NoFlows.to_string(), "No flows provided");
        assert_eq!(
            ErrorInfo::Panic("oops".into()).to_string(),
            "Step panicked: oops"
        );
    }

    #[test]
    fn test_from_panic_payloads() {
        let info = ErrorInfo::from_panic(Box::new("static str"));
        assert_eq!(info, ErrorInfo::Panic("static str".into()));

        let info = ErrorInfo::from_panic(Box::new(String::from("owned")));
        assert_eq!(info, ErrorInfo::Panic("owned".into()));

        let info = ErrorInfo::from_panic(Box::new(42u32));
        assert!(info.is_panic());
    }

    #[test]
    fn test_source_equality_by_message() {
        let a: ErrorInfo = anyhow::anyhow!("network down").into();
        let b: ErrorInfo = anyhow::anyhow!("network down").into();
        assert_eq!(a, b);
        assert_ne!(a, ErrorInfo::message("network down"));
    }

    #[test]
    fn test_framework_error_display() {
        let err = FrameworkError::MissingEnv("OPENROUTER_API_KEY".into());
        assert_eq!(err.to_string(), "OPENROUTER_API_KEY is required");

        let err = FrameworkError::NoValue(ErrorInfo::message("tool failed"));
        assert_eq!(err.to_string(), "AgentMonad has no value: tool failed");
    }
}
