//! Presentation layer for ai-werewolf
//!
//! This crate contains CLI definitions, the event consumer loop and its
//! board snapshot, output formatters, and the tournament progress bar.

pub mod board;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use board::{BoardState, EventConsumer, LineSink, SeatView};
pub use cli::commands::{Cli, OutputFormat};
pub use output::{ConsoleFormatter, EventFormatter, JsonFormatter};
pub use progress::ProgressReporter;
