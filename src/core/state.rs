//! Agent state types

use serde::{Deserialize, Serialize};

/// State threaded through every step of an agent flow
///
/// Steps never mutate the state they receive; they return a new one
/// (usually via [`AgentState::with_history`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    /// The task the agent is working on
    pub task: String,

    /// Audit trail of what each step did, oldest first
    #[serde(default)]
    pub history: Vec<String>,
}

impl AgentState {
    /// Create a state for a task with an empty history
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            history: Vec::new(),
        }
    }

    /// Return a copy of this state with `entry` appended to the history
    pub fn with_history(&self, entry: impl Into<String>) -> Self {
        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.extend(self.history.iter().cloned());
        history.push(entry.into());
        Self {
            task: self.task.clone(),
            history,
        }
    }

    /// Most recent history entry, if any
    pub fn last_entry(&self) -> Option<&str> {
        self.history.last().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_history_returns_new_state() {
        let state = AgentState::new("explain monads");
        let next = state.with_history("Plan: search");

        assert!(state.history.is_empty());
        assert_eq!(next.task, "explain monads");
        assert_eq!(next.history, vec!["Plan: search".to_string()]);
        assert_eq!(next.last_entry(), Some("Plan: search"));
    }

    #[test]
    fn test_deserialize_without_history() {
        let state: AgentState = serde_json::from_str(r#"{"task": "t"}"#).unwrap();
        assert_eq!(state, AgentState::new("t"));
    }
}
