//! Display fields published to the rendering layer
//!
//! The view model is write-only from the core's perspective: the controller
//! updates it during entry effects and mutations, then publishes a clone.

use serde::{Deserialize, Serialize};

use super::amount::{format_currency, format_grouped, Amount, AmountLimits, AmountVerdict};
use super::auth::AuthPhase;
use super::recipient::Recipient;
use super::screen::ScreenId;

/// Recipient fields as shown on a screen.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientCard {
    pub name: String,
    pub account_line: String,
    pub avatar: String,
}

impl From<&Recipient> for RecipientCard {
    fn from(recipient: &Recipient) -> Self {
        Self {
            name: recipient.name.clone(),
            account_line: recipient.account_line(),
            avatar: recipient.avatar(),
        }
    }
}

/// Snapshot shown on the auth and success screens.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSummaryView {
    pub recipient: Option<RecipientCard>,
    pub amount: Amount,
    /// `"NT$500"`
    pub amount_text: String,
}

impl TransferSummaryView {
    pub fn new(recipient: Option<&Recipient>, amount: Amount) -> Self {
        Self {
            recipient: recipient.map(RecipientCard::from),
            amount,
            amount_text: format_currency(amount),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthView {
    pub phase: AuthPhase,
    pub summary: Option<TransferSummaryView>,
}

/// Amount-entry fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountView {
    pub amount: Amount,
    /// `"168,520"`
    pub amount_text: String,
    pub next_enabled: bool,
    pub warning: Option<String>,
    pub available_balance_text: String,
    pub max_single_text: String,
}

impl AmountView {
    pub fn new(amount: Amount, verdict: AmountVerdict, limits: AmountLimits) -> Self {
        Self {
            amount,
            amount_text: format_grouped(amount),
            next_enabled: verdict.allowed,
            warning: verdict.warning.map(|w| w.to_string()),
            available_balance_text: format_currency(limits.available_balance),
            max_single_text: format_currency(limits.max_single_transfer),
        }
    }
}

/// Everything the display layer renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    pub active_screen: ScreenId,
    /// `"HH:MM"`, shown on every screen
    pub clock_text: String,
    pub amount: AmountView,
    pub memo: String,
    /// Recipient card on the amount screen
    pub selected: Option<RecipientCard>,
    pub auth: AuthView,
    pub success: Option<TransferSummaryView>,
    pub toast: Option<String>,
}

impl ViewModel {
    pub fn new(limits: AmountLimits, clock_text: String) -> Self {
        Self {
            active_screen: ScreenId::Home,
            clock_text,
            amount: AmountView::new(0, limits.validate(0), limits),
            memo: String::new(),
            selected: None,
            auth: AuthView::default(),
            success: None,
            toast: None,
        }
    }
}
