//! Commands accepted by the transfer flow
//!
//! Every external event (user input, timer firing, clock tick) is one
//! [`FlowCommand`]; the controller processes them one at a time.

use crate::domain::{Amount, AuthTimer, Recipient, ScreenId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowCommand {
    /// Navigate to a screen
    Activate(ScreenId),
    /// Choose a recipient from the list and continue to amount entry
    SelectRecipient(Recipient),
    /// Keypad digit
    AppendDigit(char),
    /// Keypad backspace
    DeleteDigit,
    /// Quick-amount chip
    AddQuickAmount(Amount),
    /// Memo text changed
    SetMemo(String),
    /// Share the last completed transfer
    Share,
    /// Periodic wall-clock refresh
    ClockTick,
    /// Scheduled authentication step elapsed
    AuthTimerElapsed(AuthTimer),
    /// Toast display time elapsed
    ToastExpired { generation: u64 },
}

impl FlowCommand {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            FlowCommand::Activate(_) => "activate",
            FlowCommand::SelectRecipient(_) => "select_recipient",
            FlowCommand::AppendDigit(_) => "append_digit",
            FlowCommand::DeleteDigit => "delete_digit",
            FlowCommand::AddQuickAmount(_) => "add_quick_amount",
            FlowCommand::SetMemo(_) => "set_memo",
            FlowCommand::Share => "share",
            FlowCommand::ClockTick => "clock_tick",
            FlowCommand::AuthTimerElapsed(_) => "auth_timer",
            FlowCommand::ToastExpired { .. } => "toast_expired",
        }
    }

    /// Whether the command originates from a timer rather than the user.
    pub fn is_scheduled(&self) -> bool {
        matches!(
            self,
            FlowCommand::ClockTick
                | FlowCommand::AuthTimerElapsed(_)
                | FlowCommand::ToastExpired { .. }
        )
    }
}
