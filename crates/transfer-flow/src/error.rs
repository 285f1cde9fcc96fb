//! Error types for the transfer flow

use thiserror::Error;

use crate::domain::{Amount, AmountWarning, ScreenId};

/// Transfer flow errors
///
/// Amount warnings are not errors: they live in the verdict and only block
/// entering the auth screen, which is reported as [`FlowError::AmountNotAllowed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Screen identifier did not name a known screen
    #[error("Unknown screen id: {raw:?}")]
    InvalidScreenId { raw: String },

    /// Screen requires a selected recipient
    #[error("No recipient selected (required to enter {screen})")]
    NoRecipientSelected { screen: ScreenId },

    /// Amount failed validation, progression refused
    #[error("Amount {amount} not allowed: {}", warning_text(.warning))]
    AmountNotAllowed {
        amount: Amount,
        warning: Option<AmountWarning>,
    },

    /// Keypad input was not a decimal digit
    #[error("Invalid digit input: {input:?}")]
    InvalidDigit { input: char },

    /// Share requested before any transfer completed
    #[error("No completed transfer to share")]
    NoCompletedTransfer,

    /// Commit fired with no transfer frozen by an auth attempt
    #[error("No pending transfer to commit")]
    NoPendingTransfer,

    /// Share collaborator reported a failure
    #[error("Share failed: {reason}")]
    ShareFailed { reason: String },

    /// Recipient directory could not be loaded
    #[error("Recipient directory error: {reason}")]
    Directory { reason: String },

    /// Configuration value rejected
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Command handler panicked
    #[error("Command handler fault: {reason}")]
    Fault { reason: String },

    /// Runtime loop is no longer accepting commands
    #[error("Transfer flow runtime stopped")]
    RuntimeStopped,
}

fn warning_text(warning: &Option<AmountWarning>) -> String {
    match warning {
        Some(w) => w.to_string(),
        None => "amount must be greater than zero".to_string(),
    }
}

impl FlowError {
    /// Whether the error signals caller misuse rather than a runtime fault.
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            FlowError::InvalidScreenId { .. }
                | FlowError::NoRecipientSelected { .. }
                | FlowError::AmountNotAllowed { .. }
                | FlowError::InvalidDigit { .. }
                | FlowError::NoCompletedTransfer
        )
    }
}

/// Result type for transfer flow operations
pub type FlowResult<T> = Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_not_allowed_message() {
        let err = FlowError::AmountNotAllowed {
            amount: 60_000,
            warning: Some(AmountWarning::LimitExceeded { limit: 50_000 }),
        };
        assert_eq!(
            err.to_string(),
            "Amount 60000 not allowed: Single transfer limit is NT$50,000"
        );

        let zero = FlowError::AmountNotAllowed {
            amount: 0,
            warning: None,
        };
        assert!(zero.to_string().ends_with("greater than zero"));
    }

    #[test]
    fn test_misuse_classification() {
        assert!(FlowError::NoCompletedTransfer.is_misuse());
        assert!(FlowError::InvalidDigit { input: 'x' }.is_misuse());
        assert!(!FlowError::NoPendingTransfer.is_misuse());
        assert!(!FlowError::Fault {
            reason: "boom".into()
        }
        .is_misuse());
        assert!(!FlowError::RuntimeStopped.is_misuse());
    }
}
