//! Logging setup
//!
//! Logs go to `log_file` when configured, otherwise to stderr. `RUST_LOG`
//! wins over the `-v` count.

use std::fs::{File, OpenOptions};
use std::sync::Mutex;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use diario_core::Config;

/// Log level for a given number of `-v` flags
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level_for(verbosity);
        EnvFilter::new(format!("diario_core={},diario_cli={}", level, level))
    })
}

/// Where log lines are written
enum LogTarget {
    File(File),
    Stderr,
}

/// Resolve the configured log file, falling back to stderr if it can't be opened
fn log_target(config: &Config) -> LogTarget {
    let Some(ref path) = config.log_file else {
        return LogTarget::Stderr;
    };

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => LogTarget::File(file),
        Err(e) => {
            eprintln!(
                "Warning: Could not open log file {:?}: {}. Logging to stderr.",
                path, e
            );
            LogTarget::Stderr
        }
    }
}

/// Initialize the global subscriber
pub fn init(config: &Config, verbosity: u8) {
    let filter = env_filter(verbosity);

    match log_target(config) {
        LogTarget::File(file) => {
            // Ignore error if already initialized
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();

            debug!("Logging to {:?}", config.log_file);
        }
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
