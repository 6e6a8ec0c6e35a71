use colored::*;

use crate::core::AgentState;
use crate::monad::{AgentMonad, Outcome};

/// One line of a flow transcript, before any styling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptLine {
    /// The final value of a successful flow
    Answer(String),
    Blank,
    /// The `Execution history:` heading
    Heading(String),
    /// One `- entry` of the history
    History(String),
    /// `Flow failed: {error}`
    Failure(String),
}

impl TranscriptLine {
    pub fn text(&self) -> &str {
        match self {
            TranscriptLine::Answer(text)
            | TranscriptLine::Heading(text)
            | TranscriptLine::History(text)
            | TranscriptLine::Failure(text) => text,
            TranscriptLine::Blank => "",
        }
    }
}

/// Lay out a finished flow: the answer and history, or the failure
pub fn transcript_lines(flow: &AgentMonad<AgentState, String>) -> Vec<TranscriptLine> {
    match flow.outcome() {
        Outcome::Success(answer) => {
            let mut lines = vec![
                TranscriptLine::Answer(answer.clone()),
                TranscriptLine::Blank,
                TranscriptLine::Heading("Execution history:".to_string()),
            ];
            lines.extend(
                flow.state()
                    .history
                    .iter()
                    .map(|entry| TranscriptLine::History(format!("- {}", entry))),
            );
            lines
        }
        Outcome::Failure(error) => vec![TranscriptLine::Failure(format!("Flow failed: {}", error))],
    }
}

/// Render a finished flow as plain text, one line per [`TranscriptLine`]
pub fn render_transcript(flow: &AgentMonad<AgentState, String>) -> String {
    transcript_lines(flow)
        .iter()
        .map(|line| format!("{}\n", line.text()))
        .collect()
}

/// Console prints flow transcripts with colored formatting
pub struct Console {
    answer_color: Color,
    history_color: Color,
}

impl Console {
    /// Create a new Console with default colors
    pub fn new() -> Self {
        Self {
            answer_color: Color::Green,
            history_color: Color::BrightBlack,
        }
    }

    /// Print a welcome banner naming the task
    pub fn print_banner(&self, task: &str, mode: &str) {
        println!("{}", "=".repeat(60).bright_blue());
        println!("{}", format!("  MCE Agent ({})", mode).bright_blue().bold());
        println!("{}", "=".repeat(60).bright_blue());
        println!("{} {}", "Task:".cyan().bold(), task);
        println!();
    }

    /// Apply this console's colors to a transcript line
    pub fn style(&self, line: &TranscriptLine) -> String {
        match line {
            TranscriptLine::Answer(text) => text.color(self.answer_color).to_string(),
            TranscriptLine::Blank => String::new(),
            TranscriptLine::Heading(text) => text.bold().to_string(),
            TranscriptLine::History(text) => text.color(self.history_color).to_string(),
            TranscriptLine::Failure(text) => text.red().bold().to_string(),
        }
    }

    /// Print a finished flow; a failure goes to stderr
    pub fn print_flow(&self, flow: &AgentMonad<AgentState, String>) {
        for line in transcript_lines(flow) {
            match line {
                TranscriptLine::Failure(_) => eprintln!("{}", self.style(&line)),
                _ => println!("{}", self.style(&line)),
            }
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::run_simple_agent;

    #[test]
    fn test_render_success() {
        let flow = AgentMonad::success(
            AgentState::new("t").with_history("one").with_history("two"),
            "answer".to_string(),
        );
        assert_eq!(
            render_transcript(&flow),
            "answer\n\nExecution history:\n- one\n- two\n"
        );
    }

    #[test]
    fn test_render_failure() {
        let flow: AgentMonad<AgentState, String> =
            AgentMonad::failure(AgentState::new("t"), "Tool not found: search");
        assert_eq!(
            transcript_lines(&flow),
            vec![TranscriptLine::Failure("Flow failed: Tool not found: search".into())]
        );
        assert_eq!(render_transcript(&flow), "Flow failed: Tool not found: search\n");
    }

    #[test]
    fn test_render_simple_agent() {
        let transcript = render_transcript(&run_simple_agent("What is a Monad?"));
        assert!(transcript.starts_with("Final Report:\n"));
        assert!(transcript.contains("- Formatted response for delivery.\n"));
    }

    #[test]
    fn test_styled_lines_keep_their_text() {
        let console = Console::new();
        let flow = run_simple_agent("What is a Monad?");

        for line in transcript_lines(&flow) {
            assert!(console.style(&line).contains(line.text()));
        }

        let failed: AgentMonad<AgentState, String> =
            AgentMonad::failure(AgentState::new("t"), "boom");
        let styled = console.style(&transcript_lines(&failed)[0]);
        assert!(styled.contains("Flow failed: boom"));
        assert!(!styled.contains("Error:"));
    }
}
