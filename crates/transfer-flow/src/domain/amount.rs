//! Amount validation and display formatting
//!
//! `validate` is the single authority on whether an amount may progress to
//! authentication. Warning precedence: the single-transfer limit is checked
//! before the available balance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole currency units.
pub type Amount = u64;

/// Display prefix for amounts on the auth and success screens.
pub const CURRENCY_PREFIX: &str = "NT$";

/// Why an amount is not allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountWarning {
    /// Amount is above the single-transfer limit
    LimitExceeded { limit: Amount },
    /// Amount is above the available balance
    InsufficientBalance,
}

impl AmountWarning {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AmountWarning::LimitExceeded { .. } => "limit_exceeded",
            AmountWarning::InsufficientBalance => "insufficient_balance",
        }
    }
}

impl fmt::Display for AmountWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountWarning::LimitExceeded { limit } => {
                write!(f, "Single transfer limit is {}", format_currency(*limit))
            }
            AmountWarning::InsufficientBalance => write!(f, "Insufficient balance"),
        }
    }
}

/// Validity verdict for an amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AmountVerdict {
    pub allowed: bool,
    pub warning: Option<AmountWarning>,
}

/// Transfer limits applied by the validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountLimits {
    /// Maximum amount in a single transfer
    pub max_single_transfer: Amount,
    /// Balance available on the source account
    pub available_balance: Amount,
}

impl Default for AmountLimits {
    fn default() -> Self {
        Self {
            max_single_transfer: 50_000,
            available_balance: 168_520,
        }
    }
}

impl AmountLimits {
    pub fn validate(&self, amount: Amount) -> AmountVerdict {
        validate(amount, self.max_single_transfer, self.available_balance)
    }
}

/// Validate an amount against the single-transfer limit and the balance.
///
/// `allowed` holds iff `0 < amount <= min(max_single_transfer, available_balance)`.
pub fn validate(
    amount: Amount,
    max_single_transfer: Amount,
    available_balance: Amount,
) -> AmountVerdict {
    let allowed = amount > 0 && amount <= max_single_transfer && amount <= available_balance;

    let warning = if amount > max_single_transfer {
        Some(AmountWarning::LimitExceeded {
            limit: max_single_transfer,
        })
    } else if amount > available_balance {
        Some(AmountWarning::InsufficientBalance)
    } else {
        None
    };

    AmountVerdict { allowed, warning }
}

/// Format with thousands separators: `168520` -> `"168,520"`.
pub fn format_grouped(amount: Amount) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Grouped amount with the currency prefix: `"NT$50,000"`.
pub fn format_currency(amount: Amount) -> String {
    format!("{}{}", CURRENCY_PREFIX, format_grouped(amount))
}
