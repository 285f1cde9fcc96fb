//! Transfer Flow Runtime
//!
//! Owns the [`TransferFlowService`] and drains a single inbox, so commands
//! from the UI, scheduled timers and the clock ticker never interleave.
//!
//! ```text
//! FlowHandle ──┐
//! timers ──────┼──→ inbox ──→ FlowRuntime::run ──→ dispatch ──→ DisplaySink
//! clock tick ──┘                    │
//!                                   └── faults ──→ generic toast
//! ```
//!
//! Unhandled errors and panics inside a dispatch are logged and turned into
//! the generic fault toast; they never stop the loop.

use async_trait::async_trait;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use super::controller::{FlowPorts, TransferFlowService};
use crate::adapters::TokioScheduler;
use crate::domain::{Amount, Recipient, ScreenId, TransferConfig};
use crate::error::{FlowError, FlowResult};
use crate::events::FlowCommand;
use crate::ports::{Clock, DisplaySink, FlowStatus, ShareTarget, TransferFlowApi};

/// One message in the runtime inbox.
#[derive(Debug)]
pub enum FlowEnvelope {
    Command {
        command: FlowCommand,
        reply: Option<oneshot::Sender<FlowResult<()>>>,
    },
    Status(oneshot::Sender<FlowStatus>),
}

impl FlowEnvelope {
    pub fn command(&self) -> Option<&FlowCommand> {
        match self {
            FlowEnvelope::Command { command, .. } => Some(command),
            FlowEnvelope::Status(_) => None,
        }
    }
}

pub type FlowInbox = mpsc::UnboundedReceiver<FlowEnvelope>;

/// Cloneable sender side of the runtime inbox.
#[derive(Clone, Debug)]
pub struct FlowHandle {
    sender: mpsc::UnboundedSender<FlowEnvelope>,
}

impl FlowHandle {
    pub fn channel() -> (Self, FlowInbox) {
        let (sender, inbox) = mpsc::unbounded_channel();
        (Self { sender }, inbox)
    }

    /// Queue a command without waiting for its result.
    ///
    /// Errors from the command are reported to the user as a toast.
    pub fn submit(&self, command: FlowCommand) -> FlowResult<()> {
        self.sender
            .send(FlowEnvelope::Command {
                command,
                reply: None,
            })
            .map_err(|_| FlowError::RuntimeStopped)
    }

    /// Queue a command and wait until the runtime has processed it.
    pub async fn execute(&self, command: FlowCommand) -> FlowResult<()> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(FlowEnvelope::Command {
                command,
                reply: Some(reply),
            })
            .map_err(|_| FlowError::RuntimeStopped)?;
        response.await.map_err(|_| FlowError::RuntimeStopped)?
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

#[async_trait]
impl TransferFlowApi for FlowHandle {
    async fn activate(&self, screen: ScreenId) -> FlowResult<()> {
        self.execute(FlowCommand::Activate(screen)).await
    }

    async fn select_recipient(&self, recipient: Recipient) -> FlowResult<()> {
        self.execute(FlowCommand::SelectRecipient(recipient)).await
    }

    async fn append_digit(&self, digit: char) -> FlowResult<()> {
        self.execute(FlowCommand::AppendDigit(digit)).await
    }

    async fn delete_digit(&self) -> FlowResult<()> {
        self.execute(FlowCommand::DeleteDigit).await
    }

    async fn add_quick_amount(&self, delta: Amount) -> FlowResult<()> {
        self.execute(FlowCommand::AddQuickAmount(delta)).await
    }

    async fn set_memo(&self, text: String) -> FlowResult<()> {
        self.execute(FlowCommand::SetMemo(text)).await
    }

    async fn share(&self) -> FlowResult<()> {
        self.execute(FlowCommand::Share).await
    }

    async fn status(&self) -> FlowResult<FlowStatus> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(FlowEnvelope::Status(reply))
            .map_err(|_| FlowError::RuntimeStopped)?;
        response.await.map_err(|_| FlowError::RuntimeStopped)
    }
}

pub struct FlowRuntime {
    service: TransferFlowService,
    inbox: FlowInbox,
}

impl FlowRuntime {
    pub fn new(service: TransferFlowService, inbox: FlowInbox) -> Self {
        Self { service, inbox }
    }

    /// Wire a runtime whose timers run on tokio.
    pub fn build(
        config: TransferConfig,
        display: Arc<dyn DisplaySink>,
        share: Arc<dyn ShareTarget>,
        clock: Arc<dyn Clock>,
    ) -> FlowResult<(FlowHandle, Self)> {
        config.validate()?;
        let (handle, inbox) = FlowHandle::channel();
        let ports = FlowPorts {
            display,
            share,
            clock,
            scheduler: Arc::new(TokioScheduler::new(handle.clone())),
        };
        let service = TransferFlowService::new(config, ports);
        Ok((handle, Self::new(service, inbox)))
    }

    /// Process commands until `shutdown` changes or its sender drops.
    ///
    /// The loop also ends once every [`FlowHandle`] is gone. Runtimes from
    /// [`FlowRuntime::build`] never reach that point on their own, because
    /// their [`TokioScheduler`] keeps a handle for posting timers; a runtime
    /// assembled with [`FlowRuntime::new`] around a scheduler that holds no
    /// handle stops as soon as its callers drop theirs.
    ///
    /// Returns the service so callers can inspect the final state.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> TransferFlowService {
        let period = self.service.config().clock_refresh;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            screen = %self.service.active_screen(),
            clock_refresh_secs = period.as_secs(),
            "Transfer flow runtime started"
        );
        self.service.publish();

        loop {
            tokio::select! {
                biased;
                _ = shutdown.changed() => {
                    info!("Shutdown signal received");
                    break;
                }
                envelope = self.inbox.recv() => match envelope {
                    Some(envelope) => self.handle(envelope),
                    None => break,
                },
                _ = ticker.tick() => self.handle(FlowEnvelope::Command {
                    command: FlowCommand::ClockTick,
                    reply: None,
                }),
            }
        }

        info!("Transfer flow runtime stopped");
        self.service
    }

    fn handle(&mut self, envelope: FlowEnvelope) {
        match envelope {
            FlowEnvelope::Command { command, reply } => {
                let name = command.name();
                let result = self.process(command);
                if let Err(err) = &result {
                    if reply.is_none() || !err.is_misuse() {
                        error!(command = name, error = %err, "Command failed");
                        self.service.report_fault(err);
                    } else {
                        debug!(command = name, error = %err, "Command rejected");
                    }
                }
                if let Some(reply) = reply {
                    // Caller may have stopped waiting
                    let _ = reply.send(result);
                }
            }
            FlowEnvelope::Status(reply) => {
                let _ = reply.send(self.service.status());
            }
        }
    }

    fn process(&mut self, command: FlowCommand) -> FlowResult<()> {
        let service = &mut self.service;
        match catch_unwind(AssertUnwindSafe(|| service.dispatch(command))) {
            Ok(result) => result,
            Err(payload) => Err(FlowError::Fault {
                reason: panic_message(payload.as_ref()),
            }),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic in command handler".to_string()
    }
}
