//! Presentation layer for cloudcorp
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive prompts.

pub mod cli;
pub mod output;
pub mod progress;
pub mod prompt;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, CompareArgs, DeployArgs, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use prompt::{PromptError, Prompter};
