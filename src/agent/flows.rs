//! Pre-built agent flows
//!
//! - `run_simple_agent` - plan → search → canned synthesis → format, synchronously
//! - `run_llm_agent` - the same chain with synthesis delegated to a chat model
//! - `run_parallel_research` - one plan → search flow per task, gathered

use std::sync::Arc;

use futures::future;

use super::steps::{
    execute_tool, format_output, plan_action, synthesize_answer, synthesize_answer_with,
};
use crate::core::AgentState;
use crate::llm::ChatProvider;
use crate::monad::{AgentMonad, AsyncAgentMonad};
use crate::tools::{default_registry, ToolRegistry};

/// Run the offline agent against the default registry
pub fn run_simple_agent(task: &str) -> AgentMonad<AgentState, String> {
    run_agent_with_registry(task, &default_registry())
}

/// Run the offline agent against `registry`
pub fn run_agent_with_registry(
    task: &str,
    registry: &ToolRegistry,
) -> AgentMonad<AgentState, String> {
    tracing::info!("Running agent for task: {}", task);

    AgentMonad::from_state(AgentState::new(task))
        .then(|state, _| plan_action(state, task))
        .then(|state, call| execute_tool(state, call, registry))
        .then(synthesize_answer)
        .then(format_output)
}

/// Build the agent chain with synthesis done by `provider`
///
/// Nothing runs until the returned monad is awaited with `run`.
pub fn run_llm_agent(
    task: &str,
    provider: Arc<dyn ChatProvider>,
    registry: Arc<ToolRegistry>,
) -> AsyncAgentMonad<AgentState, String> {
    AsyncAgentMonad::start(AgentState::new(task), task.to_string())
        .then(|state, task: String| future::ready(plan_action(state, &task)))
        .then(move |state, call| future::ready(execute_tool(state, call, &registry)))
        .then(move |state, output| {
            let provider = Arc::clone(&provider);
            async move { synthesize_answer_with(state, output, provider.as_ref()).await }
        })
        .then(|state, answer| future::ready(format_output(state, answer)))
}

/// Research several tasks concurrently
///
/// Each task gets its own plan → search flow. On success the value holds
/// every tool output in task order and the state is
/// [`merge_histories`] of the individual states.
pub fn run_parallel_research<I, T>(
    tasks: I,
    registry: Arc<ToolRegistry>,
) -> AsyncAgentMonad<AgentState, Vec<String>>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let flows = tasks
        .into_iter()
        .map(|task| research_flow(task.into(), Arc::clone(&registry)))
        .collect();

    AsyncAgentMonad::gather_with(flows, merge_histories)
}

fn research_flow(task: String, registry: Arc<ToolRegistry>) -> AsyncAgentMonad<AgentState, String> {
    AsyncAgentMonad::start(AgentState::new(&task), task)
        .then(|state, task: String| future::ready(plan_action(state, &task)))
        .then(move |state, call| future::ready(execute_tool(state, call, &registry)))
}

/// Merge gathered states: tasks joined with `"; "`, histories concatenated in order
pub fn merge_histories(states: &[AgentState]) -> AgentState {
    AgentState {
        task: states
            .iter()
            .map(|s| s.task.as_str())
            .collect::<Vec<_>>()
            .join("; "),
        history: states.iter().flat_map(|s| s.history.iter().cloned()).collect(),
    }
}
