//! Transfer state - the single source of truth for an in-progress transfer
//!
//! INVARIANT: `amount` only changes through `append_digit`, `delete_digit`,
//! `add_quick_amount` or `reset`, and every such change recomputes the verdict.

use tracing::debug;

use super::amount::{Amount, AmountLimits, AmountVerdict};
use super::recipient::Recipient;
use crate::error::{FlowError, FlowResult};

/// Read-only copy of what is being transferred.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferSnapshot {
    pub recipient: Option<Recipient>,
    pub amount: Amount,
    pub memo: String,
}

#[derive(Debug, Clone)]
pub struct TransferState {
    amount: Amount,
    recipient: Option<Recipient>,
    memo: String,
    limits: AmountLimits,
    verdict: AmountVerdict,
}

impl TransferState {
    pub fn new(limits: AmountLimits) -> Self {
        Self {
            amount: 0,
            recipient: None,
            memo: String::new(),
            limits,
            verdict: limits.validate(0),
        }
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn recipient(&self) -> Option<&Recipient> {
        self.recipient.as_ref()
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    pub fn limits(&self) -> AmountLimits {
        self.limits
    }

    /// Verdict for the current amount.
    pub fn verdict(&self) -> AmountVerdict {
        self.verdict
    }

    pub fn snapshot(&self) -> TransferSnapshot {
        TransferSnapshot {
            recipient: self.recipient.clone(),
            amount: self.amount,
            memo: self.memo.clone(),
        }
    }

    /// Append a keypad digit as the new least-significant digit.
    ///
    /// No upper bound is applied here; the verdict reports violations.
    pub fn append_digit(&mut self, input: char) -> FlowResult<AmountVerdict> {
        let digit = input
            .to_digit(10)
            .ok_or(FlowError::InvalidDigit { input })? as Amount;

        self.amount = if self.amount == 0 {
            digit
        } else {
            self.amount.saturating_mul(10).saturating_add(digit)
        };
        Ok(self.revalidate())
    }

    /// Drop the least-significant digit. Stays at zero once there.
    pub fn delete_digit(&mut self) -> AmountVerdict {
        self.amount /= 10;
        self.revalidate()
    }

    /// Add a quick-amount chip value.
    pub fn add_quick_amount(&mut self, delta: Amount) -> AmountVerdict {
        self.amount = self.amount.saturating_add(delta);
        self.revalidate()
    }

    /// Replace the recipient. Amount and memo are untouched.
    pub fn select_recipient(&mut self, recipient: Recipient) {
        debug!(name = %recipient.name, bank = %recipient.bank, "Recipient selected");
        self.recipient = Some(recipient);
    }

    pub fn set_memo(&mut self, text: impl Into<String>) {
        self.memo = text.into();
    }

    pub fn reset(&mut self) {
        self.amount = 0;
        self.recipient = None;
        self.memo.clear();
        self.revalidate();
    }

    fn revalidate(&mut self) -> AmountVerdict {
        self.verdict = self.limits.validate(self.amount);
        debug!(
            amount = self.amount,
            allowed = self.verdict.allowed,
            warning = ?self.verdict.warning,
            "Amount revalidated"
        );
        self.verdict
    }
}

impl Default for TransferState {
    fn default() -> Self {
        Self::new(AmountLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AmountWarning;

    fn type_digits(state: &mut TransferState, digits: &str) {
        for d in digits.chars() {
            state.append_digit(d).unwrap();
        }
    }

    #[test]
    fn test_initial_state() {
        let state = TransferState::default();
        assert_eq!(state.amount(), 0);
        assert!(state.recipient().is_none());
        assert_eq!(state.memo(), "");
        assert!(!state.verdict().allowed);
    }

    #[test]
    fn test_append_builds_decimal_number() {
        let mut state = TransferState::default();
        type_digits(&mut state, "500");
        assert_eq!(state.amount(), 500);
        assert!(state.verdict().allowed);
    }

    #[test]
    fn test_leading_zero_is_replaced() {
        let mut state = TransferState::default();
        type_digits(&mut state, "0007");
        assert_eq!(state.amount(), 7);
    }

    #[test]
    fn test_non_digit_rejected_without_change() {
        let mut state = TransferState::default();
        type_digits(&mut state, "12");
        for bad in ['a', '.', '-', ' ', '٣'] {
            let err = state.append_digit(bad).unwrap_err();
            assert_eq!(err, FlowError::InvalidDigit { input: bad });
        }
        assert_eq!(state.amount(), 12);
    }

    #[test]
    fn test_delete_floors_at_zero() {
        let mut state = TransferState::default();
        type_digits(&mut state, "123");
        assert!(state.delete_digit().allowed);
        assert_eq!(state.amount(), 12);
        state.delete_digit();
        state.delete_digit();
        assert_eq!(state.amount(), 0);
        state.delete_digit();
        state.delete_digit();
        assert_eq!(state.amount(), 0);
        assert!(!state.verdict().allowed);
    }

    #[test]
    fn test_digit_sequences_keep_integer_invariant() {
        let mut state = TransferState::default();
        let script = "9x9x<<<1<<0<8877<<<<<<<<";
        let mut expected: u64 = 0;
        for step in script.chars() {
            match step {
                '<' => {
                    state.delete_digit();
                    expected /= 10;
                }
                'x' => {
                    assert!(state.append_digit('x').is_err());
                }
                d => {
                    state.append_digit(d).unwrap();
                    expected = expected * 10 + d.to_digit(10).unwrap() as u64;
                }
            }
            assert_eq!(state.amount(), expected);
        }
        assert_eq!(state.amount(), 0);
    }

    #[test]
    fn test_append_saturates() {
        let mut state = TransferState::default();
        type_digits(&mut state, "99999999999999999999999");
        assert_eq!(state.amount(), u64::MAX);
        assert_eq!(
            state.verdict().warning,
            Some(AmountWarning::LimitExceeded { limit: 50_000 })
        );
    }

    #[test]
    fn test_quick_amount_has_no_clamp() {
        let mut state = TransferState::default();
        state.add_quick_amount(30_000);
        assert!(state.verdict().allowed);
        let verdict = state.add_quick_amount(30_000);
        assert_eq!(state.amount(), 60_000);
        assert!(!verdict.allowed);
        assert_eq!(
            verdict.warning,
            Some(AmountWarning::LimitExceeded { limit: 50_000 })
        );
    }

    #[test]
    fn test_select_recipient_keeps_amount_and_memo() {
        let mut state = TransferState::default();
        type_digits(&mut state, "42");
        state.set_memo("rent");
        state.select_recipient(Recipient::new("Alice", "ABC", "123"));
        state.select_recipient(Recipient::new("Bob", "XYZ", "456"));

        assert_eq!(state.amount(), 42);
        assert_eq!(state.memo(), "rent");
        assert_eq!(state.recipient().map(|r| r.name.as_str()), Some("Bob"));
    }

    #[test]
    fn test_set_memo_verbatim() {
        let mut state = TransferState::default();
        let long = "  x ".repeat(10_000);
        state.set_memo(long.clone());
        assert_eq!(state.memo(), long);
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut state = TransferState::new(AmountLimits {
            max_single_transfer: 10,
            available_balance: 10,
        });
        type_digits(&mut state, "77");
        state.set_memo("dinner");
        state.select_recipient(Recipient::new("Alice", "ABC", "123"));
        assert!(state.verdict().warning.is_some());

        state.reset();
        assert_eq!(state.amount(), 0);
        assert!(state.recipient().is_none());
        assert_eq!(state.memo(), "");
        assert_eq!(state.verdict(), AmountVerdict::default());
    }
}
