//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the mindful binary.

mod commands;
mod companion;
mod context;
mod entry;
mod feed;
mod files;
mod settings;

pub use commands::{Cli, Commands};
pub use companion::{
    handle_chat_command, handle_friend_command, handle_task_command, handle_travel_command,
    plan, reflect,
};
pub use context::Context;
pub use entry::handle_entry_command;
pub use feed::handle_feed_command;
pub use settings::handle_config_command;

use mindful::{JsonError, MindfulResult};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Log filter from `RUST_LOG`-style directives, falling back to the
/// `--verbose` level when they are absent or do not parse.
#[cfg_attr(feature = "observability", allow(dead_code))]
pub fn log_filter(directives: Option<&str>, verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

/// Pretty-print a value as JSON on stdout.
fn print_json<T: Serialize + ?Sized>(value: &T) -> MindfulResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| JsonError::new(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
