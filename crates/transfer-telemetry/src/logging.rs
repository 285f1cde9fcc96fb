//! Structured logging via `tracing-subscriber`.
//!
//! Pretty output is used for development and JSON output for log shipping.
//! When a log file is configured the terminal is left untouched, which the
//! TUI relies on.

use std::fs::{File, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::{TelemetryConfig, TelemetryError};

/// Handle returned once logging is installed.
#[derive(Debug)]
pub struct StructuredLogger {
    json: bool,
    to_file: bool,
}

impl StructuredLogger {
    /// Whether records are emitted as JSON.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Whether records go to a file rather than stdout.
    pub fn is_file_backed(&self) -> bool {
        self.to_file
    }
}

/// Build the level filter, preferring `RUST_LOG` when it is set.
pub(crate) fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::Config(e.to_string()))
}

fn open_log_file(config: &TelemetryConfig) -> Result<Option<File>, TelemetryError> {
    let Some(path) = &config.log_file else {
        return Ok(None);
    };

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(Some)
        .map_err(|e| TelemetryError::LogFile(format!("{}: {}", path.display(), e)))
}

/// Install the global subscriber.
pub fn init_logging(config: &TelemetryConfig) -> Result<StructuredLogger, TelemetryError> {
    let env_filter = build_filter(config)?;
    let file = open_log_file(config)?;
    let to_file = file.is_some();

    type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;
    let layer: Option<BoxedLayer> = match (file, config.console_output) {
        (Some(file), _) => {
            let writer = Mutex::new(file);
            if config.json_logs {
                Some(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(writer)
                        .boxed(),
                )
            } else {
                Some(
                    fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(writer)
                        .boxed(),
                )
            }
        }
        (None, true) if config.json_logs => Some(
            fmt::layer()
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        ),
        (None, true) => Some(fmt::layer().with_target(true).with_ansi(true).boxed()),
        (None, false) => None,
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        to_file,
        "Logging initialized"
    );

    Ok(StructuredLogger {
        json: config.json_logs,
        to_file,
    })
}
