//! Fan-in of completed flows
//!
//! Shared by [`gather_sync`] and the async `AsyncAgentMonad::gather`:
//! - empty input fails with [`ErrorInfo::NoFlows`] and a default state
//! - the first failure in input order wins, with its own state and error
//! - otherwise the states are merged (or the last one is kept) and the
//!   values are collected in input order

use super::sync::{AgentMonad, Outcome};
use crate::core::ErrorInfo;

/// Collect already-resolved flows, keeping the last flow's state
pub fn gather_sync<S, V, I>(flows: I) -> AgentMonad<S, Vec<V>>
where
    S: Default,
    I: IntoIterator<Item = AgentMonad<S, V>>,
{
    fan_in(flows, None::<fn(&[S]) -> S>)
}

/// Collect already-resolved flows, combining their states with `merge_state`
///
/// `merge_state` receives every state in input order and is only called
/// when all flows succeeded.
pub fn gather_sync_with<S, V, I, M>(flows: I, merge_state: M) -> AgentMonad<S, Vec<V>>
where
    S: Default,
    I: IntoIterator<Item = AgentMonad<S, V>>,
    M: FnOnce(&[S]) -> S,
{
    fan_in(flows, Some(merge_state))
}

pub(crate) fn fan_in<S, V, I, M>(flows: I, merge_state: Option<M>) -> AgentMonad<S, Vec<V>>
where
    S: Default,
    I: IntoIterator<Item = AgentMonad<S, V>>,
    M: FnOnce(&[S]) -> S,
{
    let mut states = Vec::new();
    let mut values = Vec::new();

    for flow in flows {
        match flow.into_parts() {
            (state, Outcome::Success(value)) => {
                states.push(state);
                values.push(value);
            }
            (state, Outcome::Failure(error)) => {
                tracing::debug!("Gathered flow #{} failed: {}", states.len(), error);
                return AgentMonad::failure(state, error);
            }
        }
    }

    if states.is_empty() {
        tracing::warn!("gather called without any flows");
        return AgentMonad::failure(S::default(), ErrorInfo::NoFlows);
    }

    let final_state = match merge_state {
        Some(merge) => merge(&states),
        None => states.pop().unwrap_or_default(),
    };

    AgentMonad::success(final_state, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_fails() {
        let result = gather_sync(Vec::<AgentMonad<String, i32>>::new());

        assert!(!result.is_successful());
        assert_eq!(result.error_info(), Some(&ErrorInfo::NoFlows));
        assert_eq!(result.error_info().unwrap().to_string(), "No flows provided");
        assert_eq!(result.state(), "");
    }

    #[test]
    fn test_values_in_order_with_last_state() {
        let result = gather_sync(vec![
            AgentMonad::success("first".to_string(), 2),
            AgentMonad::success("second".to_string(), 3),
        ]);

        assert!(result.is_successful());
        assert_eq!(result.value(), &vec![2, 3]);
        assert_eq!(result.state(), "second");
    }

    #[test]
    fn test_first_failure_wins() {
        let result = gather_sync(vec![
            AgentMonad::success("ok".to_string(), 1),
            AgentMonad::failure("bad-1".to_string(), "first"),
            AgentMonad::failure("bad-2".to_string(), "second"),
        ]);

        assert_eq!(result.state(), "bad-1");
        assert_eq!(result.error_info(), Some(&ErrorInfo::message("first")));
    }

    #[test]
    fn test_merge_receives_states_in_order() {
        let result = gather_sync_with(
            vec![
                AgentMonad::success(vec!["a".to_string()], 1),
                AgentMonad::success(vec!["b".to_string()], 2),
                AgentMonad::success(vec!["c".to_string()], 3),
            ],
            |states: &[Vec<String>]| states.concat(),
        );

        assert_eq!(result.state(), &vec!["a", "b", "c"]);
        assert_eq!(result.value(), &vec![1, 2, 3]);
    }

    #[test]
    fn test_merge_not_called_on_failure() {
        let mut called = false;
        let result = gather_sync_with(
            vec![
                AgentMonad::success(1u32, "x"),
                AgentMonad::failure(2u32, "broken"),
            ],
            |states: &[u32]| {
                called = true;
                states.iter().sum()
            },
        );

        assert!(!called);
        assert_eq!(*result.state(), 2);
    }

    #[test]
    fn test_accepts_any_iterator() {
        let result = gather_sync((1..=3).map(|n| AgentMonad::success(n, n * 10)));
        assert_eq!(result.value(), &vec![10, 20, 30]);
        assert_eq!(*result.state(), 3);
    }
}
