//! Asynchronous result-state monad
//!
//! `AsyncAgentMonad<S, V>` describes an async chain of steps without running
//! it. Nothing happens until [`AsyncAgentMonad::run`] is awaited, and every
//! call to `run` executes the whole chain again from the start.
//!
//! ```
//! use mce_agent::monad::{AgentMonad, AsyncAgentMonad};
//!
//! # tokio_test_block_on(async {
//! let double = |s: String, v: i32| async move { AgentMonad::success(s, v * 2) };
//!
//! let a = AsyncAgentMonad::start("a".to_string(), 2).then(double);
//! let b = AsyncAgentMonad::start("b".to_string(), 3).then(double);
//!
//! let result = AsyncAgentMonad::gather(vec![a, b]).run().await;
//! assert_eq!(result.value(), &vec![4, 6]);
//! assert_eq!(result.state(), "b");
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};

use super::gather::fan_in;
use super::sync::{is_no_value_panic, AgentMonad, Outcome};
use crate::core::ErrorInfo;

type Deferred<S, V> = Arc<dyn Fn() -> BoxFuture<'static, AgentMonad<S, V>> + Send + Sync>;

type MergeFn<S> = Arc<dyn Fn(&[S]) -> S + Send + Sync>;

/// Deferred, re-runnable chain of async agent steps
///
/// Cloning is cheap and shares the description of the work, not a result.
#[must_use]
pub struct AsyncAgentMonad<S, V> {
    run_fn: Deferred<S, V>,
}

impl<S, V> Clone for AsyncAgentMonad<S, V> {
    fn clone(&self) -> Self {
        Self {
            run_fn: Arc::clone(&self.run_fn),
        }
    }
}

impl<S, V> std::fmt::Debug for AsyncAgentMonad<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncAgentMonad").finish_non_exhaustive()
    }
}

impl<S, V> AsyncAgentMonad<S, V>
where
    S: Send + 'static,
    V: Send + 'static,
{
    /// Wrap a deferred computation
    ///
    /// `run_fn` is called once per [`run`](Self::run).
    pub fn new<F, Fut>(run_fn: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AgentMonad<S, V>> + Send + 'static,
    {
        Self {
            run_fn: Arc::new(move || run_fn().boxed()),
        }
    }

    /// Execute the chain and return its final monad
    pub async fn run(&self) -> AgentMonad<S, V> {
        (self.run_fn)().await
    }

    /// A deferred computation that yields a copy of `monad` on every run
    pub fn from_monad(monad: AgentMonad<S, V>) -> Self
    where
        S: Clone + Sync,
        V: Clone + Sync,
    {
        Self::new(move || future::ready(monad.clone()))
    }

    /// Begin an async chain with an explicit initial value
    pub fn start(state: S, initial_value: V) -> Self
    where
        S: Clone + Sync,
        V: Clone + Sync,
    {
        Self::from_monad(AgentMonad::start(state, initial_value))
    }

    pub fn success(state: S, value: V) -> Self
    where
        S: Clone + Sync,
        V: Clone + Sync,
    {
        Self::from_monad(AgentMonad::success(state, value))
    }

    pub fn failure(state: S, error_info: impl Into<ErrorInfo>) -> Self
    where
        S: Clone + Sync,
    {
        let error_info = error_info.into();
        Self::new(move || future::ready(AgentMonad::failure(state.clone(), error_info.clone())))
    }

    /// Chain an async step
    ///
    /// Upstream is not executed here; the returned monad runs upstream first
    /// and then `step`, strictly in sequence. An upstream failure is carried
    /// forward without invoking `step`. A panic while creating or polling the
    /// step's future becomes an [`ErrorInfo::Panic`] failure holding
    /// upstream's state, except reading the value of a failure, which keeps
    /// unwinding.
    pub fn then<R, F, Fut>(self, step: F) -> AsyncAgentMonad<S, R>
    where
        S: Clone,
        R: Send + 'static,
        F: Fn(S, V) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AgentMonad<S, R>> + Send + 'static,
    {
        let step = Arc::new(step);
        AsyncAgentMonad::new(move || {
            let upstream = self.clone();
            let step = Arc::clone(&step);
            async move {
                let (state, outcome) = upstream.run().await.into_parts();
                match outcome {
                    Outcome::Failure(error) => {
                        tracing::debug!("Skipping async step, chain already failed: {}", error);
                        AgentMonad::failure(state, error)
                    }
                    Outcome::Success(value) => {
                        let fallback = state.clone();
                        let attempt = AssertUnwindSafe(async move { step(state, value).await })
                            .catch_unwind()
                            .await;
                        match attempt {
                            Ok(next) => next,
                            Err(payload) if is_no_value_panic(payload.as_ref()) => {
                                panic::resume_unwind(payload)
                            }
                            Err(payload) => {
                                let error = ErrorInfo::from_panic(payload);
                                tracing::warn!("Async step panicked, converting to failure: {}", error);
                                AgentMonad::failure(fallback, error)
                            }
                        }
                    }
                }
            }
        })
    }

    /// Transform the success value once the chain has run
    pub fn map<R, F>(self, func: F) -> AsyncAgentMonad<S, R>
    where
        R: Send + 'static,
        F: Fn(V) -> R + Send + Sync + 'static,
    {
        let func = Arc::new(func);
        AsyncAgentMonad::new(move || {
            let upstream = self.clone();
            let func = Arc::clone(&func);
            async move { upstream.run().await.map(|value| func(value)) }
        })
    }
}

impl<S, V> AsyncAgentMonad<S, Vec<V>>
where
    S: Default + Send + 'static,
    V: Send + 'static,
{
    /// Run `flows` concurrently and collect their values in input order
    ///
    /// The merged state is the last flow's state. See
    /// [`gather_with`](Self::gather_with) for the full contract.
    pub fn gather(flows: Vec<AsyncAgentMonad<S, V>>) -> Self {
        Self::fan_out(flows, None)
    }

    /// Run `flows` concurrently, merging their states with `merge_state`
    ///
    /// - No flows: fails with [`ErrorInfo::NoFlows`] and `S::default()`.
    /// - All flows are started together and all are awaited, even after one
    ///   has failed.
    /// - The first failure by input order (not completion order) is reported
    ///   with that flow's state and error.
    /// - Otherwise `merge_state` gets every state in input order and the
    ///   value is each flow's value in input order.
    pub fn gather_with<M>(flows: Vec<AsyncAgentMonad<S, V>>, merge_state: M) -> Self
    where
        M: Fn(&[S]) -> S + Send + Sync + 'static,
    {
        Self::fan_out(flows, Some(Arc::new(merge_state)))
    }

    fn fan_out(flows: Vec<AsyncAgentMonad<S, V>>, merge_state: Option<MergeFn<S>>) -> Self {
        let flows: Arc<[AsyncAgentMonad<S, V>]> = flows.into();
        Self::new(move || {
            let flows = Arc::clone(&flows);
            let merge_state = merge_state.clone();
            async move {
                if flows.is_empty() {
                    tracing::warn!("gather called without any flows");
                    return AgentMonad::failure(S::default(), ErrorInfo::NoFlows);
                }

                tracing::debug!("Fanning out {} flows", flows.len());
                let results = future::join_all(flows.iter().map(|flow| flow.run())).await;
                tracing::debug!("All {} flows completed", results.len());

                fan_in(results, merge_state.as_deref())
            }
        })
    }
}
