//! Service layer - screen controller and its runtime

pub mod controller;
pub mod runtime;

pub use controller::{FlowPorts, TransferFlowService, FAULT_TOAST, SHARE_TOAST};
pub use runtime::{FlowEnvelope, FlowHandle, FlowInbox, FlowRuntime};
