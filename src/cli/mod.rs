//! CLI module
//!
//! Command-line interface for planning and collecting paged windows.
//!
//! # Commands
//!
//! - `plan` - Show the physical requests a logical window needs
//! - `fetch` - Collect a logical window from an endpoint

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, PagingArgs};
pub use runner::Runner;
