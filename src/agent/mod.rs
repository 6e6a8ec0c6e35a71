//! Agent steps and the flows built from them
//!
//! Steps are plain functions `(AgentState, V) -> AgentMonad<AgentState, R>`
//! chained with `then`; flows wire them together for a task.

pub mod flows;
pub mod steps;

pub use flows::{
    merge_histories, run_agent_with_registry, run_llm_agent, run_parallel_research,
    run_simple_agent,
};
pub use steps::{
    execute_tool, format_output, plan_action, synthesis_messages, synthesize_answer,
    synthesize_answer_with, PLANNED_TOOL_ID,
};
