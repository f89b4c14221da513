//! CLI module
//!
//! Command-line interface for nearby search.
//!
//! # Commands
//!
//! - `search` - Run one paginated search and print every record
//! - `show-config` - Print the effective settings (API key redacted)

mod commands;
mod output;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, SearchArgs};
pub use output::{render, render_table};
pub use runner::Runner;
