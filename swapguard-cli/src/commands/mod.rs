//! CLI command implementations

pub mod check;
pub mod compare;
pub mod logs;
pub mod max;
pub mod quote;
pub mod sanitize;
pub mod status;
pub mod token;
pub mod validate;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use swapguard_core::{EntryPoint, LogEvent, LoggingService, SwapGuardContext};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let swapguard_dir = get_swapguard_dir().ok()?;
    std::fs::create_dir_all(&swapguard_dir).ok()?;
    match LoggingService::new(&swapguard_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")) {
        Ok(logger) => Some(logger),
        Err(e) => {
            log::debug!("Event log unavailable: {}", e);
            None
        }
    }
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Record a failed command in the event log
pub fn log_failure(command: &str, error: &anyhow::Error) {
    let details = format!("{:#}", error);
    let message = error.to_string();
    let details = (details != message).then_some(details.as_str());
    if let Some(logger) = get_logger() {
        let _ = logger.log_error(&format!("{}_failed", command), &message, details);
    }
}

/// Get the swapguard directory from environment or default
pub fn get_swapguard_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("SWAPGUARD_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".swapguard"))
}

/// Load the swapguard context from the settings directory
pub fn get_context() -> Result<SwapGuardContext> {
    let swapguard_dir = get_swapguard_dir()?;
    SwapGuardContext::new(&swapguard_dir).context("Failed to load swapguard settings")
}

/// Use the positional argument, or read it from piped stdin
pub fn arg_or_stdin(value: Option<String>, what: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .with_context(|| format!("Failed to read {} from stdin", what))?;
        return Ok(buffer.trim_end_matches(['\r', '\n']).to_string());
    }
    anyhow::bail!("No {} provided. Pass it as an argument or pipe it on stdin.", what);
}
