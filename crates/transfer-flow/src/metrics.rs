//! # Transfer Flow Metrics
//!
//! Prometheus metrics for the transfer flow.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! transfer-flow = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `transfer_screen_activations_total` - Counter of screen activations (by screen)
//! - `transfer_amount_warnings_total` - Counter of amount warnings raised (by kind)
//! - `transfer_auth_started_total` - Counter of authentication attempts started
//! - `transfer_auth_cancelled_total` - Counter of attempts cancelled by navigation
//! - `transfer_committed_total` - Counter of committed transfers
//! - `transfer_committed_amount_total` - Sum of committed amounts
//! - `transfer_shares_total` - Counter of shared receipts
//! - `transfer_faults_total` - Counter of unhandled runtime faults

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Screen activations, labeled by target screen
    pub static ref SCREEN_ACTIVATIONS: IntCounterVec = register_int_counter_vec!(
        "transfer_screen_activations_total",
        "Total number of screen activations",
        &["screen"]
    )
    .expect("Failed to create SCREEN_ACTIVATIONS metric");

    /// Amount warnings, labeled by kind
    pub static ref AMOUNT_WARNINGS: IntCounterVec = register_int_counter_vec!(
        "transfer_amount_warnings_total",
        "Total number of amount warnings raised",
        &["kind"]
    )
    .expect("Failed to create AMOUNT_WARNINGS metric");

    /// Authentication attempts started
    pub static ref AUTH_STARTED: IntCounter = register_int_counter!(
        "transfer_auth_started_total",
        "Total number of authentication attempts started"
    )
    .expect("Failed to create AUTH_STARTED metric");

    /// Authentication attempts cancelled
    pub static ref AUTH_CANCELLED: IntCounter = register_int_counter!(
        "transfer_auth_cancelled_total",
        "Total number of authentication attempts cancelled"
    )
    .expect("Failed to create AUTH_CANCELLED metric");

    /// Committed transfers
    pub static ref TRANSFERS_COMMITTED: IntCounter = register_int_counter!(
        "transfer_committed_total",
        "Total number of committed transfers"
    )
    .expect("Failed to create TRANSFERS_COMMITTED metric");

    /// Sum of committed amounts
    pub static ref AMOUNT_COMMITTED: IntCounter = register_int_counter!(
        "transfer_committed_amount_total",
        "Sum of committed transfer amounts"
    )
    .expect("Failed to create AMOUNT_COMMITTED metric");

    /// Shared receipts
    pub static ref SHARES: IntCounter = register_int_counter!(
        "transfer_shares_total",
        "Total number of receipts shared"
    )
    .expect("Failed to create SHARES metric");

    /// Unhandled faults
    pub static ref FAULTS: IntCounter = register_int_counter!(
        "transfer_faults_total",
        "Total number of unhandled runtime faults"
    )
    .expect("Failed to create FAULTS metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

#[cfg(feature = "metrics")]
pub fn record_screen_activation(screen: &str) {
    SCREEN_ACTIVATIONS.with_label_values(&[screen]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_amount_warning(kind: &str) {
    AMOUNT_WARNINGS.with_label_values(&[kind]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_auth_started() {
    AUTH_STARTED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_auth_cancelled() {
    AUTH_CANCELLED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_transfer_committed(amount: u64) {
    TRANSFERS_COMMITTED.inc();
    AMOUNT_COMMITTED.inc_by(amount);
}

#[cfg(feature = "metrics")]
pub fn record_share() {
    SHARES.inc();
}

#[cfg(feature = "metrics")]
pub fn record_fault() {
    FAULTS.inc();
}

/// Render all registered metrics in the Prometheus text format.
#[cfg(feature = "metrics")]
pub fn render() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if encoder.encode(&prometheus::gather(), &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_screen_activation(_screen: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_amount_warning(_kind: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_auth_started() {}

#[cfg(not(feature = "metrics"))]
pub fn record_auth_cancelled() {}

#[cfg(not(feature = "metrics"))]
pub fn record_transfer_committed(_amount: u64) {}

#[cfg(not(feature = "metrics"))]
pub fn record_share() {}

#[cfg(not(feature = "metrics"))]
pub fn record_fault() {}

#[cfg(not(feature = "metrics"))]
pub fn render() -> String {
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_never_panics() {
        record_screen_activation("amount");
        record_amount_warning("limit_exceeded");
        record_auth_started();
        record_auth_cancelled();
        record_transfer_committed(500);
        record_share();
        record_fault();
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn test_render_contains_counters() {
        record_transfer_committed(1);
        assert!(render().contains("transfer_committed_total"));
    }
}
