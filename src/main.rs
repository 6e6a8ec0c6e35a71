use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use mce_agent::agent::{run_llm_agent, run_simple_agent};
use mce_agent::cli::Console;
use mce_agent::llm::OpenRouterClient;
use mce_agent::logging;
use mce_agent::tools::default_registry;

const DEFAULT_TASK: &str = "What is a Monad?";

const USAGE: &str = "Usage: mce-agent [--llm] [TASK...]

Runs plan -> search -> synthesize -> format for TASK and prints the transcript.

Options:
  --llm       Synthesize the answer with OpenRouter (needs OPENROUTER_API_KEY)
  -h, --help  Show this help";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let _log_guard = logging::init_logging()?;

    // Parse command line arguments
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    }
    let use_llm = args.iter().any(|a| a == "--llm");
    let words: Vec<&str> = args
        .iter()
        .filter(|a| !a.starts_with("--"))
        .map(|a| a.as_str())
        .collect();
    let task = if words.is_empty() {
        DEFAULT_TASK.to_string()
    } else {
        words.join(" ")
    };

    let console = Console::new();

    let flow = if use_llm {
        console.print_banner(&task, "OpenRouter");
        let provider = Arc::new(OpenRouterClient::from_env()?);
        run_llm_agent(&task, provider, Arc::new(default_registry()))
            .run()
            .await
    } else {
        console.print_banner(&task, "offline");
        run_simple_agent(&task)
    };

    console.print_flow(&flow);

    if flow.is_successful() {
        tracing::info!("Flow completed with {} steps", flow.state().history.len());
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
