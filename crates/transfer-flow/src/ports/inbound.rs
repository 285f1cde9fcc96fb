//! Driving Ports (API - Inbound)
//!
//! The only way to change transfer state from outside the runtime.

use async_trait::async_trait;

use crate::domain::{
    Amount, AmountVerdict, AuthPhase, Recipient, ScreenId, TransferReceipt, TransferSnapshot,
    ViewModel,
};
use crate::error::FlowResult;

/// Read-only status of the flow at one point in time.
#[derive(Clone, Debug)]
pub struct FlowStatus {
    pub active_screen: ScreenId,
    pub transfer: TransferSnapshot,
    pub verdict: AmountVerdict,
    pub auth_phase: AuthPhase,
    pub last_receipt: Option<TransferReceipt>,
    pub view: ViewModel,
}

/// Primary transfer flow API.
///
/// Each call is processed as one command by the runtime; the result
/// reports misuse such as an unknown screen or a missing recipient.
#[async_trait]
pub trait TransferFlowApi: Send + Sync {
    /// Navigate to a screen, running its entry effects
    async fn activate(&self, screen: ScreenId) -> FlowResult<()>;

    /// Navigate by textual id (`"amount"` or `"amount-screen"`)
    async fn activate_by_name(&self, raw: &str) -> FlowResult<()> {
        let screen: ScreenId = raw.parse()?;
        self.activate(screen).await
    }

    /// Choose a recipient and continue to amount entry
    async fn select_recipient(&self, recipient: Recipient) -> FlowResult<()>;

    async fn append_digit(&self, digit: char) -> FlowResult<()>;

    async fn delete_digit(&self) -> FlowResult<()>;

    async fn add_quick_amount(&self, delta: Amount) -> FlowResult<()>;

    async fn set_memo(&self, text: String) -> FlowResult<()>;

    /// Share the last completed transfer
    async fn share(&self) -> FlowResult<()>;

    async fn status(&self) -> FlowResult<FlowStatus>;
}
