//! Telemetry configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Configuration for log output.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive such as `transfer_flow=debug,info`
    pub log_level: String,

    /// Whether to write logs at all when no file is configured
    pub console_output: bool,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Write logs to this file instead of stdout
    pub log_file: Option<PathBuf>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "cube-transfer".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            log_file: None,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CT_SERVICE_NAME`: Service name (default: cube-transfer)
    /// - `CT_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `CT_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `CT_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `CT_LOG_FILE`: Path of a log file (default: unset)
    pub fn from_env() -> Self {
        Self {
            service_name: env::var("CT_SERVICE_NAME")
                .unwrap_or_else(|_| "cube-transfer".to_string()),

            log_level: env::var("CT_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("CT_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: env::var("CT_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),

            log_file: env::var("CT_LOG_FILE").ok().map(PathBuf::from),
        }
    }

    /// Route logs to a file, typically because stdout belongs to a TUI.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Whether any log sink is active.
    pub fn has_output(&self) -> bool {
        self.log_file.is_some() || self.console_output
    }
}
