//! # Command-Line Interface
//!
//! User-facing commands, prompts and output formatting.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `init` | Prompt for project characteristics and run the init pipeline |
//! | `local-check` | Lint and format-check staged files |
//!
//! ## Output
//!
//! Messages go through the leveled [`Output`] reporter. `--format json`
//! prints one JSON object per message. Debug messages need `--verbose` or
//! `NODE_ENV=development`.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod environment;
mod init;
mod local_check;
mod output;
mod prompt;

pub use app::{run, Cli, Commands};
pub use environment::RunEnvironment;
pub use init::InitArgs;
pub use output::{Level, Output, OutputFormat};
