//! Logging initialization
//!
//! stdout carries the host bridge, so logs never go there.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Initialize logging based on debug flag
///
/// Without `--debug`, `info` and above go to stderr for the host to collect.
/// With `--debug`, everything down to `debug` goes to a temp file whose path is returned.
pub fn init_logging(debug: bool) -> Result<Option<PathBuf>> {
    if !debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter("info"))
            .with_ansi(false)
            .with_target(false)
            .init();
        return Ok(None);
    }

    // Named temp file that outlives the process, cleaned up by the OS
    let (file, path) = tempfile::Builder::new()
        .prefix("traceflow-plugin-")
        .suffix(".log")
        .tempfile()
        .context("Failed to create debug log file")?
        .keep()
        .context("Failed to persist debug log file")?;

    tracing_subscriber::fmt()
        .with_writer(file)
        .with_env_filter(env_filter("debug"))
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Ok(Some(path))
}

/// RUST_LOG wins over the default level
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
