//! Terminal output for the command-line entry point

pub mod console;

pub use console::{render_transcript, transcript_lines, Console, TranscriptLine};
