//! CLI module
//!
//! Command-line interface for the Turso Platform API.
//!
//! # Commands
//!
//! - `database`, `group`, `organization`, `member`, `invite` - resource management
//! - `api-token`, `database-token`, `group-token` - token management
//! - `location`, `audit-log`, `invoice` - read-only queries
//! - `watch` - poll a resource and emit change events

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
