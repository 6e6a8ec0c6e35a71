//! Agent steps
//!
//! Each step takes the current [`AgentState`] and value and returns a new
//! monad. Steps never mutate the state they are given; they record what they
//! did by returning a state with one more history entry.

use crate::core::{AgentState, ErrorInfo};
use crate::llm::{ChatMessage, ChatOptions, ChatProvider};
use crate::monad::AgentMonad;
use crate::tools::{ToolCall, ToolRegistry};

/// Identifier given to the call produced by [`plan_action`]
pub const PLANNED_TOOL_ID: &str = "tool-1";

const SYNTHESIS_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Decide which tool to call for `task`
pub fn plan_action(state: AgentState, task: &str) -> AgentMonad<AgentState, ToolCall> {
    let call = ToolCall::new(PLANNED_TOOL_ID, "search").with_argument("query", task);
    let next_state = state.with_history(format!(
        "Plan: call {} with query='{}'.",
        call.name, task
    ));
    AgentMonad::success(next_state, call)
}

/// Run the planned call through `registry`
///
/// The tool's output is recorded in the history whether or not it failed;
/// a failed tool fails the chain with the tool's message as error info.
pub fn execute_tool(
    state: AgentState,
    call: ToolCall,
    registry: &ToolRegistry,
) -> AgentMonad<AgentState, String> {
    let result = registry.run(&state, &call);
    let next_state = state.with_history(format!("Tool Result ({}): {}", call.name, result.content));

    if result.is_error {
        AgentMonad::failure(next_state, ErrorInfo::Message(result.content))
    } else {
        AgentMonad::success(next_state, result.content)
    }
}

/// Build the final answer from the tool output without calling a model
pub fn synthesize_answer(state: AgentState, tool_output: String) -> AgentMonad<AgentState, String> {
    let answer = format!(
        "Monadic Context Engineering structures agent workflows as composable steps \
         with built-in state threading, error short-circuiting, and optional parallelism. \
         Evidence: {}",
        tool_output
    );
    AgentMonad::success(state.with_history("Synthesized final answer."), answer)
}

/// Messages sent to the model by [`synthesize_answer_with`]
pub fn synthesis_messages(state: &AgentState, tool_output: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYNTHESIS_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Task: {}\n\nTool evidence:\n{}\n\nWrite the final answer in 3-6 sentences.",
            state.task, tool_output
        )),
    ]
}

/// Ask a chat model to write the final answer
///
/// A provider error fails the chain with the error as [`ErrorInfo::Source`]
/// and the state unchanged.
pub async fn synthesize_answer_with(
    state: AgentState,
    tool_output: String,
    provider: &dyn ChatProvider,
) -> AgentMonad<AgentState, String> {
    let messages = synthesis_messages(&state, &tool_output);

    match provider.chat(&messages, &ChatOptions::default()).await {
        Ok(answer) => {
            let next_state = state.with_history(format!(
                "Synthesized final answer with {}.",
                provider.provider_name()
            ));
            AgentMonad::success(next_state, answer)
        }
        Err(err) => {
            tracing::warn!("{} synthesis failed: {:#}", provider.provider_name(), err);
            AgentMonad::failure(state, err)
        }
    }
}

/// Wrap the answer for delivery
pub fn format_output(state: AgentState, answer: String) -> AgentMonad<AgentState, String> {
    let formatted = format!("Final Report:\n{}", answer);
    AgentMonad::success(state.with_history("Formatted response for delivery."), formatted)
}
