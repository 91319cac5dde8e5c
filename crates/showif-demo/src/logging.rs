#![forbid(unsafe_code)]

//! Structured logging setup.
//!
//! Logs always go to stderr so stdout stays reserved for the screen. The
//! filter comes from `RUST_LOG` and defaults to `warn`.

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

use crate::error::{DemoError, Result};

const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(format: LogFormat) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|err| DemoError::Logging {
        message: err.to_string(),
    })
}
