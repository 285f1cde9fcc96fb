//! Post-commit transaction receipt

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::amount::{format_currency, Amount};
use super::recipient::Recipient;

/// Snapshot taken when a transfer commits. Consumed by the share collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub reference: Uuid,
    pub recipient: Recipient,
    pub amount: Amount,
    pub memo: String,
    pub completed_at: DateTime<Local>,
}

impl TransferReceipt {
    pub fn new(
        recipient: Recipient,
        amount: Amount,
        memo: String,
        completed_at: DateTime<Local>,
    ) -> Self {
        Self {
            reference: Uuid::new_v4(),
            recipient,
            amount,
            memo,
            completed_at,
        }
    }

    /// Multi-line text handed to share/copy.
    pub fn summary_text(&self) -> String {
        let mut text = format!(
            "Transfer successful!\nRecipient: {}\nAmount: {}\nTime: {}",
            self.recipient.name,
            format_currency(self.amount),
            self.completed_at.format("%Y-%m-%d %H:%M:%S"),
        );
        if !self.memo.is_empty() {
            text.push_str("\nMemo: ");
            text.push_str(&self.memo);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, 9, 5, 0).unwrap()
    }

    #[test]
    fn test_summary_text() {
        let receipt = TransferReceipt::new(
            Recipient::new("Alice", "ABC", "123"),
            12_500,
            String::new(),
            at(),
        );
        assert_eq!(
            receipt.summary_text(),
            "Transfer successful!\nRecipient: Alice\nAmount: NT$12,500\nTime: 2026-03-14 09:05:00"
        );
    }

    #[test]
    fn test_summary_includes_memo() {
        let receipt = TransferReceipt::new(
            Recipient::new("Bob", "XYZ", "9"),
            1,
            "lunch".into(),
            at(),
        );
        assert!(receipt.summary_text().ends_with("\nMemo: lunch"));
    }

    #[test]
    fn test_references_are_unique() {
        let a = TransferReceipt::new(Recipient::new("A", "B", "1"), 1, String::new(), at());
        let b = TransferReceipt::new(Recipient::new("A", "B", "1"), 1, String::new(), at());
        assert_ne!(a.reference, b.reference);
    }
}
