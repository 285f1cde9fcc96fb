//! # transfer-flow
//!
//! Bank-transfer flow for the Cube Transfer client: recipient selection,
//! keypad amount entry with limit and balance checks, a simulated
//! biometric authentication and a success receipt.
//!
//! ## Overview
//!
//! This crate provides:
//! - **Amount validation**: single-transfer limit and available balance
//! - **Transfer state**: amount, recipient and memo of the transfer in progress
//! - **Screen controller**: navigation with per-screen entry effects
//! - **Auth sequencer**: two timed phases, cancelled when the user leaves
//! - **Runtime**: one inbox for user input, timers and the clock ticker
//!
//! ## Architecture
//!
//! ```text
//! UI ──FlowHandle──→ FlowRuntime ──dispatch──→ TransferFlowService
//!                        ↑                          │
//!                        │                          ├── DisplaySink  (ViewModel)
//!                        └──── TaskScheduler ←──────┼── ShareTarget  (receipt text)
//!                               (auth, toast)       └── Clock        (status bar)
//! ```
//!
//! ## Screens
//!
//! | Screen | Entry effect | Back |
//! |--------|--------------|------|
//! | home | reset transfer, cancel auth | - |
//! | recipient | - | home |
//! | amount | show selected recipient | recipient |
//! | auth | snapshot transfer, start auth | amount |
//! | success | show committed transfer | home |
//!
//! ## Example
//!
//! ```rust,ignore
//! use transfer_flow::{FlowRuntime, ScreenId, TransferConfig, TransferFlowApi};
//!
//! let (handle, runtime) = FlowRuntime::build(config, display, clipboard, clock)?;
//! tokio::spawn(runtime.run(shutdown_rx));
//!
//! handle.select_recipient(alice).await?;
//! handle.append_digit('5').await?;
//! handle.activate(ScreenId::Auth).await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;

pub use domain::{
    format_currency, format_grouped, validate, Amount, AmountLimits, AmountVerdict,
    AmountWarning, AuthPhase, AuthSequencer, Recipient, RecipientDirectory, ScreenId,
    TransferConfig, TransferReceipt, TransferSnapshot, TransferState, ViewModel,
};
pub use error::{FlowError, FlowResult};
pub use events::FlowCommand;
pub use ports::{FlowStatus, TransferFlowApi};
pub use service::{FlowHandle, FlowPorts, FlowRuntime, TransferFlowService};
