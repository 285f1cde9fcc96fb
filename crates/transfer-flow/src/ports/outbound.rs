//! Driven Ports (SPI - Outbound Dependencies)
//!
//! Collaborators the flow calls out to: rendering, sharing, time and
//! scheduling. None of them feed state back into the core except through
//! scheduled commands.

use chrono::{DateTime, Local};
use std::time::Duration;

use crate::domain::ViewModel;
use crate::error::FlowResult;
use crate::events::FlowCommand;

/// Receives the full view model after every processed command.
pub trait DisplaySink: Send + Sync {
    fn publish(&self, view: &ViewModel);
}

/// Performs share-or-copy of a finished transfer summary.
pub trait ShareTarget: Send + Sync {
    fn share(&self, summary: &str) -> FlowResult<()>;
}

/// Wall-clock source.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Handle to a scheduled command. Cancelling an already-fired task is a no-op.
pub trait TaskHandle: Send {
    fn cancel(&self);
}

/// Delivers a command back to the flow after a delay.
pub trait TaskScheduler: Send + Sync {
    fn schedule(&self, delay: Duration, command: FlowCommand) -> Box<dyn TaskHandle>;
}
