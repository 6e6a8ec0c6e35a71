//! Synchronous result-state monad
//!
//! `AgentMonad<S, V>` pairs a state with either a success value or an
//! [`ErrorInfo`]. Steps are chained with [`AgentMonad::then`]; once a chain
//! carries a failure every later step is skipped and the failure travels to
//! the end of the chain untouched.
//!
//! ```
//! use mce_agent::monad::AgentMonad;
//!
//! let flow = AgentMonad::start(vec!["start".to_string()], 2)
//!     .then(|mut log, v| {
//!         log.push("doubled".into());
//!         AgentMonad::success(log, v * 2)
//!     })
//!     .map(|v| v + 1);
//!
//! assert_eq!(*flow.value(), 5);
//! assert_eq!(flow.state().len(), 2);
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::core::{ErrorInfo, FrameworkError, FrameworkResult};

const NO_VALUE_PANIC: &str = "AgentMonad has no value";

fn no_value(error: &ErrorInfo) -> ! {
    panic!("{} (failed with: {})", NO_VALUE_PANIC, error)
}

/// Whether a caught panic came from reading the value of a failure
///
/// `then` boundaries re-raise these instead of converting them to failures.
pub(super) fn is_no_value_panic(payload: &(dyn Any + Send)) -> bool {
    payload
        .downcast_ref::<String>()
        .is_some_and(|msg| msg.starts_with(NO_VALUE_PANIC))
}

/// Either the success value of a step or the reason it failed
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<V> {
    /// The step produced a value
    Success(V),
    /// The step failed
    Failure(ErrorInfo),
}

impl<V> Outcome<V> {
    /// Check if this is a success
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Convert into a standard `Result`
    pub fn into_result(self) -> Result<V, ErrorInfo> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }
}

/// Immutable container for stateful, fallible agent steps
///
/// The state is always present. Exactly one of value or error is present,
/// enforced by [`Outcome`].
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct AgentMonad<S, V> {
    state: S,
    outcome: Outcome<V>,
}

impl<S, V> AgentMonad<S, V> {
    /// Begin a chain with an explicit initial value
    pub fn start(state: S, initial_value: V) -> Self {
        Self::success(state, initial_value)
    }

    /// Construct a success
    pub fn success(state: S, value: V) -> Self {
        Self {
            state,
            outcome: Outcome::Success(value),
        }
    }

    /// Construct a failure
    pub fn failure(state: S, error_info: impl Into<ErrorInfo>) -> Self {
        Self {
            state,
            outcome: Outcome::Failure(error_info.into()),
        }
    }

    /// Build a monad from an existing outcome
    pub fn from_parts(state: S, outcome: Outcome<V>) -> Self {
        Self { state, outcome }
    }

    /// The current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The current outcome
    pub fn outcome(&self) -> &Outcome<V> {
        &self.outcome
    }

    pub fn is_successful(&self) -> bool {
        self.outcome.is_success()
    }

    /// The error payload, if this monad failed
    pub fn error_info(&self) -> Option<&ErrorInfo> {
        match &self.outcome {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    /// The success value, or `FrameworkError::NoValue` if this monad failed
    pub fn try_value(&self) -> FrameworkResult<&V> {
        match &self.outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(FrameworkError::NoValue(error.clone())),
        }
    }

    /// The success value
    ///
    /// # Panics
    ///
    /// Panics if this monad is a failure. Reading a value from a failure is a
    /// contract violation; check [`is_successful`](Self::is_successful) or use
    /// [`try_value`](Self::try_value) instead.
    pub fn value(&self) -> &V {
        match &self.outcome {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => no_value(error),
        }
    }

    /// Consume the monad and return the success value
    ///
    /// # Panics
    ///
    /// Panics if this monad is a failure, like [`value`](Self::value).
    pub fn into_value(self) -> V {
        match self.outcome {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => no_value(&error),
        }
    }

    pub fn into_state(self) -> S {
        self.state
    }

    pub fn into_parts(self) -> (S, Outcome<V>) {
        (self.state, self.outcome)
    }

    /// Split into a `Result`, keeping the state on both sides
    pub fn into_result(self) -> Result<(S, V), (S, ErrorInfo)> {
        match self.outcome {
            Outcome::Success(value) => Ok((self.state, value)),
            Outcome::Failure(error) => Err((self.state, error)),
        }
    }

    /// Transform the success value
    ///
    /// `func` must not fail; use [`then`](Self::then) for fallible work.
    pub fn map<R, F>(self, func: F) -> AgentMonad<S, R>
    where
        F: FnOnce(V) -> R,
    {
        match self.outcome {
            Outcome::Success(value) => AgentMonad::success(self.state, func(value)),
            Outcome::Failure(error) => AgentMonad::failure(self.state, error),
        }
    }

    /// Apply a function carried by another monad to this monad's value
    ///
    /// If both sides failed, this monad's error wins. The result always
    /// carries this monad's state.
    pub fn apply<R, F>(self, func_monad: AgentMonad<S, F>) -> AgentMonad<S, R>
    where
        F: FnOnce(V) -> R,
    {
        match (self.outcome, func_monad.outcome) {
            (Outcome::Failure(error), _) => AgentMonad::failure(self.state, error),
            (Outcome::Success(_), Outcome::Failure(error)) => {
                AgentMonad::failure(self.state, error)
            }
            (Outcome::Success(value), Outcome::Success(func)) => {
                AgentMonad::success(self.state, func(value))
            }
        }
    }
}

impl<S: Clone, V> AgentMonad<S, V> {
    /// Chain a step that receives the current state and value
    ///
    /// On a failure the step is never invoked and the failure is carried
    /// forward with the same state and error. A panic raised by the step is
    /// captured and turned into an [`ErrorInfo::Panic`] failure holding the
    /// state from before the step ran. Reading the value of a failure inside
    /// the step is not captured and keeps unwinding.
    pub fn then<R, F>(self, step: F) -> AgentMonad<S, R>
    where
        F: FnOnce(S, V) -> AgentMonad<S, R>,
    {
        let AgentMonad { state, outcome } = self;
        match outcome {
            Outcome::Failure(error) => {
                tracing::debug!("Skipping step, chain already failed: {}", error);
                AgentMonad::failure(state, error)
            }
            Outcome::Success(value) => {
                let fallback = state.clone();
                match panic::catch_unwind(AssertUnwindSafe(move || step(state, value))) {
                    Ok(next) => next,
                    Err(payload) if is_no_value_panic(payload.as_ref()) => {
                        panic::resume_unwind(payload)
                    }
                    Err(payload) => {
                        let error = ErrorInfo::from_panic(payload);
                        tracing::warn!("Step panicked, converting to failure: {}", error);
                        AgentMonad::failure(fallback, error)
                    }
                }
            }
        }
    }

    /// Chain a step that reports failure through `Result`
    ///
    /// `Err(e)` becomes a failure carrying the state from before the step.
    pub fn try_then<R, E, F>(self, step: F) -> AgentMonad<S, R>
    where
        E: Into<ErrorInfo>,
        F: FnOnce(S, V) -> Result<AgentMonad<S, R>, E>,
    {
        let fallback = self.state.clone();
        self.then(move |state, value| match step(state, value) {
            Ok(next) => next,
            Err(error) => AgentMonad::failure(fallback, error),
        })
    }
}

impl<S: Clone> AgentMonad<S, S> {
    /// Begin a chain whose initial value is the state itself
    pub fn from_state(state: S) -> Self {
        let value = state.clone();
        Self::success(state, value)
    }
}
