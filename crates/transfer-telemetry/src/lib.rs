//! # Transfer Telemetry
//!
//! Logging setup shared by the Cube Transfer binaries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use transfer_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env().with_log_file("transfer.log");
//! let _guard = init_telemetry(config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CT_SERVICE_NAME` | `cube-transfer` | Service name in the startup record |
//! | `CT_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` also honoured) |
//! | `CT_CONSOLE_OUTPUT` | `true` | Log to stdout when no file is set |
//! | `CT_JSON_LOGS` | `false` | Emit JSON records |
//! | `CT_LOG_FILE` | unset | Append records to this file |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{init_logging, StructuredLogger};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to open log file: {0}")]
    LogFile(String),

    #[error("Global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Initialize logging for the process.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let logger = init_logging(&config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name,
        logger,
    })
}

/// Guard that keeps telemetry active. Drop to log shutdown.
pub struct TelemetryGuard {
    service_name: String,
    logger: StructuredLogger,
}

impl TelemetryGuard {
    /// The installed logger's output settings.
    pub fn logger(&self) -> &StructuredLogger {
        &self.logger
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(
            service = %self.service_name,
            json_logs = self.logger.is_json(),
            to_file = self.logger.is_file_backed(),
            "Shutting down telemetry"
        );
    }
}

/// Convenience macro for creating a span tagged with the flow component.
///
/// ```rust,ignore
/// let _span = transfer_telemetry::flow_span!("dispatch", component = "controller");
/// ```
#[macro_export]
macro_rules! flow_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
