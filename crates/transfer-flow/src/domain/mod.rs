//! Domain layer - pure transfer flow logic

pub mod amount;
pub mod auth;
pub mod config;
pub mod receipt;
pub mod recipient;
pub mod screen;
pub mod transfer_state;
pub mod view;

pub use amount::{
    format_currency, format_grouped, validate, Amount, AmountLimits, AmountVerdict,
    AmountWarning, CURRENCY_PREFIX,
};
pub use auth::{AuthPhase, AuthSequencer, AuthStage, AuthStep, AuthTimer, AuthTiming};
pub use config::TransferConfig;
pub use receipt::TransferReceipt;
pub use recipient::{Recipient, RecipientDirectory};
pub use screen::ScreenId;
pub use transfer_state::{TransferSnapshot, TransferState};
pub use view::{AmountView, AuthView, RecipientCard, TransferSummaryView, ViewModel};
