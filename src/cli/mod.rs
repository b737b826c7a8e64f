//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, and the
//! application runners. This is the presentation boundary.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod history_cmd;
pub mod presenter;

// Re-export commonly used types
pub use app::{run_analysis, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{AnalyzeOptions, Cli, Commands, ConfigAction, QuestionSource};
pub use presenter::Presenter;
