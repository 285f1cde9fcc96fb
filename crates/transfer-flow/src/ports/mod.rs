//! Hexagonal ports

pub mod inbound;
pub mod outbound;

pub use inbound::{FlowStatus, TransferFlowApi};
pub use outbound::{Clock, DisplaySink, ShareTarget, TaskHandle, TaskScheduler};
