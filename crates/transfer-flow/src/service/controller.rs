//! Transfer Flow Service - screen controller and command dispatch
//!
//! Owns the transfer state, the active screen, the auth sequencer and the
//! view model. [`TransferFlowService::dispatch`] is the single mutation
//! entry point; every call ends with one view publication.
//!
//! ```text
//! [HOME] ──quick transfer──→ [RECIPIENT] ──select──→ [AMOUNT] ──next (allowed)──→ [AUTH]
//!    ↑                                                                               │
//!    │                                                   verify + commit timers      │
//!    └──────────────── done ──────────────── [SUCCESS] ←─────────────────────────────┘
//! ```
//!
//! Entry effects:
//! - HOME: reset transfer state, clear warning and auth view, cancel auth
//! - AMOUNT: re-sync the selected recipient card
//! - AUTH: snapshot recipient + amount, start the sequencer
//! - SUCCESS: snapshot the committed (or current) transfer
//!
//! Leaving AUTH cancels the pending timers. The only exception is the
//! commit step itself activating SUCCESS.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{
    AmountView, AuthPhase, AuthSequencer, AuthStep, AuthTimer, Recipient, RecipientCard,
    ScreenId, TransferConfig, TransferReceipt, TransferSnapshot, TransferState,
    TransferSummaryView, ViewModel,
};
use crate::error::{FlowError, FlowResult};
use crate::events::FlowCommand;
use crate::metrics;
use crate::ports::{Clock, DisplaySink, FlowStatus, ShareTarget, TaskHandle, TaskScheduler};

/// Toast shown after a receipt was shared.
pub const SHARE_TOAST: &str = "Transaction details copied to clipboard";

/// Toast shown for any unhandled fault.
pub const FAULT_TOAST: &str = "Something went wrong. Please try again later.";

/// Collaborators the controller calls out to.
#[derive(Clone)]
pub struct FlowPorts {
    pub display: Arc<dyn DisplaySink>,
    pub share: Arc<dyn ShareTarget>,
    pub clock: Arc<dyn Clock>,
    pub scheduler: Arc<dyn TaskScheduler>,
}

pub struct TransferFlowService {
    config: TransferConfig,
    state: TransferState,
    active: ScreenId,
    auth: AuthSequencer,
    auth_task: Option<Box<dyn TaskHandle>>,
    /// Transfer frozen at auth entry; committed on success
    pending: Option<TransferSnapshot>,
    /// Set only while the commit step activates the success screen
    committing: bool,
    last_receipt: Option<TransferReceipt>,
    toast_generation: u64,
    toast_task: Option<Box<dyn TaskHandle>>,
    view: ViewModel,
    ports: FlowPorts,
}

impl TransferFlowService {
    pub fn new(config: TransferConfig, ports: FlowPorts) -> Self {
        let clock_text = format_clock(ports.clock.as_ref());
        Self {
            state: TransferState::new(config.limits),
            active: ScreenId::Home,
            auth: AuthSequencer::new(config.auth),
            auth_task: None,
            pending: None,
            committing: false,
            last_receipt: None,
            toast_generation: 0,
            toast_task: None,
            view: ViewModel::new(config.limits, clock_text),
            ports,
            config,
        }
    }

    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    pub fn state(&self) -> &TransferState {
        &self.state
    }

    pub fn active_screen(&self) -> ScreenId {
        self.active
    }

    pub fn auth_phase(&self) -> AuthPhase {
        self.auth.phase()
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn last_receipt(&self) -> Option<&TransferReceipt> {
        self.last_receipt.as_ref()
    }

    pub fn status(&self) -> FlowStatus {
        FlowStatus {
            active_screen: self.active,
            transfer: self.state.snapshot(),
            verdict: self.state.verdict(),
            auth_phase: self.auth.phase(),
            last_receipt: self.last_receipt.clone(),
            view: self.view.clone(),
        }
    }

    /// Push the current view to the display layer.
    pub fn publish(&self) {
        self.ports.display.publish(&self.view);
    }

    /// Process one command, then publish the view.
    pub fn dispatch(&mut self, command: FlowCommand) -> FlowResult<()> {
        if !command.is_scheduled() {
            debug!(command = command.name(), screen = %self.active, "Dispatching command");
        }

        let result = match command {
            FlowCommand::Activate(screen) => self.activate(screen),
            FlowCommand::SelectRecipient(recipient) => self.select_recipient(recipient),
            FlowCommand::AppendDigit(digit) => self.state.append_digit(digit).map(|_| ()),
            FlowCommand::DeleteDigit => {
                self.state.delete_digit();
                Ok(())
            }
            FlowCommand::AddQuickAmount(delta) => {
                self.state.add_quick_amount(delta);
                Ok(())
            }
            FlowCommand::SetMemo(text) => {
                self.state.set_memo(text);
                self.view.memo = self.state.memo().to_string();
                Ok(())
            }
            FlowCommand::Share => self.share(),
            FlowCommand::ClockTick => {
                self.refresh_clock();
                Ok(())
            }
            FlowCommand::AuthTimerElapsed(timer) => self.on_auth_timer(timer),
            FlowCommand::ToastExpired { generation } => {
                self.on_toast_expired(generation);
                Ok(())
            }
        };

        self.sync_amount_view();
        self.publish();
        result
    }

    /// Surface an unhandled fault as the generic toast.
    pub fn report_fault(&mut self, error: &FlowError) {
        warn!(error = %error, screen = %self.active, "Reporting fault to user");
        metrics::record_fault();
        self.show_toast(FAULT_TOAST);
        self.publish();
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    fn activate(&mut self, target: ScreenId) -> FlowResult<()> {
        self.check_entry_guard(target)?;

        let previous = self.active;
        if previous == ScreenId::Auth && !self.committing {
            self.cancel_auth("left auth screen");
        }

        self.active = target;
        self.view.active_screen = target;
        self.refresh_clock();

        match target {
            ScreenId::Home => self.enter_home(),
            ScreenId::Recipient => {}
            ScreenId::Amount => self.sync_selected_card(),
            ScreenId::Auth => self.enter_auth()?,
            ScreenId::Success => self.enter_success(),
        }

        metrics::record_screen_activation(target.as_str());
        info!(from = %previous, to = %target, "Screen activated");
        Ok(())
    }

    fn check_entry_guard(&self, target: ScreenId) -> FlowResult<()> {
        match target {
            ScreenId::Auth => {
                if self.state.recipient().is_none() {
                    warn!(screen = %target, "Entry refused: no recipient selected");
                    return Err(FlowError::NoRecipientSelected { screen: target });
                }
                let verdict = self.state.verdict();
                if !verdict.allowed {
                    warn!(
                        amount = self.state.amount(),
                        warning = ?verdict.warning,
                        "Entry refused: amount not allowed"
                    );
                    return Err(FlowError::AmountNotAllowed {
                        amount: self.state.amount(),
                        warning: verdict.warning,
                    });
                }
                Ok(())
            }
            ScreenId::Success => {
                let has_recipient = self
                    .pending
                    .as_ref()
                    .and_then(|p| p.recipient.as_ref())
                    .or(self.state.recipient())
                    .is_some();
                if has_recipient {
                    Ok(())
                } else {
                    Err(FlowError::NoRecipientSelected { screen: target })
                }
            }
            _ => Ok(()),
        }
    }

    fn enter_home(&mut self) {
        self.cancel_auth("returned home");
        self.state.reset();
        self.view.memo.clear();
        self.view.selected = None;
        self.view.auth = Default::default();
    }

    /// Idempotent: reads the recipient, never writes the state.
    fn sync_selected_card(&mut self) {
        if let Some(recipient) = self.state.recipient() {
            self.view.selected = Some(RecipientCard::from(recipient));
        }
    }

    fn enter_auth(&mut self) -> FlowResult<()> {
        let snapshot = self.state.snapshot();
        self.view.auth.summary = Some(TransferSummaryView::new(
            snapshot.recipient.as_ref(),
            snapshot.amount,
        ));
        self.pending = Some(snapshot);

        if let Some(task) = self.auth_task.take() {
            task.cancel();
        }
        let step = self.auth.start();
        metrics::record_auth_started();
        info!(generation = self.auth.generation(), "Authentication started");
        self.apply_auth_step(step)
    }

    fn enter_success(&mut self) {
        let summary = match self.pending.take() {
            Some(snapshot) => {
                TransferSummaryView::new(snapshot.recipient.as_ref(), snapshot.amount)
            }
            None => TransferSummaryView::new(self.state.recipient(), self.state.amount()),
        };
        self.view.success = Some(summary);
    }

    fn select_recipient(&mut self, recipient: Recipient) -> FlowResult<()> {
        self.state.select_recipient(recipient);
        self.activate(ScreenId::Amount)
    }

    // =========================================================================
    // AUTHENTICATION
    // =========================================================================

    fn on_auth_timer(&mut self, timer: AuthTimer) -> FlowResult<()> {
        let step = self.auth.on_timer(timer);
        if step == AuthStep::Ignored {
            debug!(
                generation = timer.generation,
                stage = ?timer.stage,
                current = self.auth.generation(),
                "Stale auth timer ignored"
            );
            return Ok(());
        }
        self.auth_task = None;
        self.apply_auth_step(step)
    }

    fn apply_auth_step(&mut self, step: AuthStep) -> FlowResult<()> {
        self.view.auth.phase = self.auth.phase();
        match step {
            AuthStep::Schedule { timer, delay } => {
                debug!(stage = ?timer.stage, ?delay, "Auth step scheduled");
                self.auth_task = Some(
                    self.ports
                        .scheduler
                        .schedule(delay, FlowCommand::AuthTimerElapsed(timer)),
                );
                Ok(())
            }
            AuthStep::Commit => self.commit(),
            AuthStep::Ignored => Ok(()),
        }
    }

    fn cancel_auth(&mut self, reason: &str) {
        if let Some(task) = self.auth_task.take() {
            task.cancel();
        }
        self.pending = None;
        if self.auth.cancel() {
            metrics::record_auth_cancelled();
            warn!(reason, "Authentication cancelled");
        }
        self.view.auth.phase = self.auth.phase();
    }

    fn commit(&mut self) -> FlowResult<()> {
        let snapshot = self.pending.clone().ok_or(FlowError::NoPendingTransfer)?;
        let recipient = snapshot
            .recipient
            .clone()
            .ok_or(FlowError::NoRecipientSelected {
                screen: ScreenId::Success,
            })?;
        let verdict = self.state.limits().validate(snapshot.amount);
        if !verdict.allowed {
            warn!(amount = snapshot.amount, "Commit refused: amount not allowed");
            self.pending = None;
            return Err(FlowError::AmountNotAllowed {
                amount: snapshot.amount,
                warning: verdict.warning,
            });
        }

        let receipt = TransferReceipt::new(
            recipient,
            snapshot.amount,
            snapshot.memo.clone(),
            self.ports.clock.now(),
        );
        metrics::record_transfer_committed(receipt.amount);
        info!(
            reference = %receipt.reference,
            recipient = %receipt.recipient.name,
            amount = receipt.amount,
            "Transfer committed"
        );
        self.last_receipt = Some(receipt);

        self.committing = true;
        let entered = self.activate(ScreenId::Success);
        self.committing = false;
        entered?;

        // Completed transfers start the next one from scratch
        self.state.reset();
        self.view.memo.clear();
        self.view.selected = None;
        Ok(())
    }

    // =========================================================================
    // SHARE, TOAST, CLOCK
    // =========================================================================

    fn share(&mut self) -> FlowResult<()> {
        let receipt = self
            .last_receipt
            .as_ref()
            .ok_or(FlowError::NoCompletedTransfer)?;
        self.ports.share.share(&receipt.summary_text())?;
        metrics::record_share();
        info!(reference = %receipt.reference, "Receipt shared");
        self.show_toast(SHARE_TOAST);
        Ok(())
    }

    fn show_toast(&mut self, message: &str) {
        if let Some(task) = self.toast_task.take() {
            task.cancel();
        }
        self.toast_generation += 1;
        self.view.toast = Some(message.to_string());
        self.toast_task = Some(self.ports.scheduler.schedule(
            self.config.toast_duration,
            FlowCommand::ToastExpired {
                generation: self.toast_generation,
            },
        ));
    }

    fn on_toast_expired(&mut self, generation: u64) {
        if generation == self.toast_generation {
            self.view.toast = None;
            self.toast_task = None;
        }
    }

    fn refresh_clock(&mut self) {
        self.view.clock_text = format_clock(self.ports.clock.as_ref());
    }

    /// Mirror the amount, verdict and warning into the view.
    fn sync_amount_view(&mut self) {
        let verdict = self.state.verdict();
        let next = AmountView::new(self.state.amount(), verdict, self.state.limits());
        if next.warning.is_some() && next.warning != self.view.amount.warning {
            if let Some(warning) = verdict.warning {
                metrics::record_amount_warning(warning.kind());
                debug!(amount = self.state.amount(), %warning, "Amount warning raised");
            }
        }
        self.view.amount = next;
    }
}

fn format_clock(clock: &dyn Clock) -> String {
    clock.now().format("%H:%M").to_string()
}
