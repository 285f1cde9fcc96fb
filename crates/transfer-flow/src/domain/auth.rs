//! Simulated authentication sequencer
//!
//! State Machine:
//! ```text
//! [IDLE] ──start──→ [IN_PROGRESS] ──verify timer──→ [SUCCEEDED] ──commit timer──→ commit
//!    ↑                    │                              │
//!    └────── cancel ──────┴──────────────────────────────┘
//! ```
//!
//! The sequencer never sleeps. Each step that needs a delay is returned as
//! [`AuthStep::Schedule`], and the caller feeds the timer back through
//! [`AuthSequencer::on_timer`]. Every `start` and `cancel` bumps the
//! generation, so a timer from an earlier attempt is ignored.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Authentication phase shown on the auth screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuthPhase {
    /// Waiting for biometric
    #[default]
    Idle,
    /// Verifying
    InProgress,
    /// Verified, about to commit
    Succeeded,
}

/// Which delay a timer belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthStage {
    Verify,
    Commit,
}

/// A timer scheduled by the sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AuthTimer {
    pub generation: u64,
    pub stage: AuthStage,
}

/// Delays between phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTiming {
    pub verify_delay: Duration,
    pub commit_delay: Duration,
}

impl Default for AuthTiming {
    fn default() -> Self {
        Self {
            verify_delay: Duration::from_millis(2_000),
            commit_delay: Duration::from_millis(1_500),
        }
    }
}

/// What the caller must do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStep {
    /// Deliver `timer` back after `delay`
    Schedule { timer: AuthTimer, delay: Duration },
    /// Authentication finished, commit the transfer
    Commit,
    /// Stale or out-of-order timer, nothing to do
    Ignored,
}

#[derive(Debug)]
pub struct AuthSequencer {
    phase: AuthPhase,
    generation: u64,
    timing: AuthTiming,
}

impl AuthSequencer {
    pub fn new(timing: AuthTiming) -> Self {
        Self {
            phase: AuthPhase::Idle,
            generation: 0,
            timing,
        }
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether an attempt is underway.
    pub fn is_active(&self) -> bool {
        self.phase != AuthPhase::Idle
    }

    /// Begin a new attempt, superseding any earlier one.
    pub fn start(&mut self) -> AuthStep {
        self.generation += 1;
        self.phase = AuthPhase::InProgress;
        AuthStep::Schedule {
            timer: AuthTimer {
                generation: self.generation,
                stage: AuthStage::Verify,
            },
            delay: self.timing.verify_delay,
        }
    }

    /// Advance on a timer firing.
    pub fn on_timer(&mut self, timer: AuthTimer) -> AuthStep {
        if timer.generation != self.generation {
            return AuthStep::Ignored;
        }

        match (self.phase, timer.stage) {
            (AuthPhase::InProgress, AuthStage::Verify) => {
                self.phase = AuthPhase::Succeeded;
                AuthStep::Schedule {
                    timer: AuthTimer {
                        generation: self.generation,
                        stage: AuthStage::Commit,
                    },
                    delay: self.timing.commit_delay,
                }
            }
            (AuthPhase::Succeeded, AuthStage::Commit) => {
                self.phase = AuthPhase::Idle;
                AuthStep::Commit
            }
            _ => AuthStep::Ignored,
        }
    }

    /// Abandon the current attempt. Returns whether one was active.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        self.generation += 1;
        self.phase = AuthPhase::Idle;
        was_active
    }
}

impl Default for AuthSequencer {
    fn default() -> Self {
        Self::new(AuthTiming::default())
    }
}
