//! Command-line front end.
//!
//! Provides:
//! - clap argument definitions
//! - The interactive prompt and one-shot mode

pub mod args;
pub mod shell;

pub use args::Args;
pub use shell::{parse_command, run_interactive, run_one_shot, Command, OneShotOptions};
