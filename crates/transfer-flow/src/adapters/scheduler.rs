//! Scheduler adapters
//!
//! `TokioScheduler` posts the command back to the runtime after a real
//! (or paused-test) tokio sleep. `ManualScheduler` keeps a virtual timeline
//! that callers advance by hand, so the controller can be stepped without a
//! runtime.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::AbortHandle;
use tracing::trace;

use crate::events::FlowCommand;
use crate::ports::{TaskHandle, TaskScheduler};
use crate::service::FlowHandle;

/// Spawns one tokio task per scheduled command.
#[derive(Clone)]
pub struct TokioScheduler {
    handle: FlowHandle,
}

impl TokioScheduler {
    pub fn new(handle: FlowHandle) -> Self {
        Self { handle }
    }
}

struct TokioTask(AbortHandle);

impl TaskHandle for TokioTask {
    fn cancel(&self) {
        self.0.abort();
    }
}

impl TaskScheduler for TokioScheduler {
    /// Must be called from within a tokio runtime.
    fn schedule(&self, delay: Duration, command: FlowCommand) -> Box<dyn TaskHandle> {
        let handle = self.handle.clone();
        trace!(command = command.name(), ?delay, "Scheduling command");
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Runtime gone means nobody is waiting for the command
            let _ = handle.submit(command);
        });
        Box::new(TokioTask(task.abort_handle()))
    }
}

/// A command waiting on the manual timeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledCommand {
    pub id: u64,
    pub due: Duration,
    pub command: FlowCommand,
}

#[derive(Debug, Default)]
struct ManualTimeline {
    now: Duration,
    next_id: u64,
    pending: Vec<ScheduledCommand>,
    cancelled: u64,
}

/// Deterministic scheduler driven by [`ManualScheduler::advance`].
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    timeline: Arc<Mutex<ManualTimeline>>,
}

struct ManualTask {
    id: u64,
    timeline: Arc<Mutex<ManualTimeline>>,
}

impl TaskHandle for ManualTask {
    fn cancel(&self) {
        let mut timeline = self.timeline.lock();
        let before = timeline.pending.len();
        timeline.pending.retain(|task| task.id != self.id);
        if timeline.pending.len() < before {
            timeline.cancelled += 1;
        }
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move virtual time forward and return the commands that fell due,
    /// earliest first.
    pub fn advance(&self, by: Duration) -> Vec<FlowCommand> {
        let mut timeline = self.timeline.lock();
        timeline.now += by;
        let now = timeline.now;

        let mut due: Vec<ScheduledCommand> = Vec::new();
        timeline.pending.retain(|task| {
            if task.due <= now {
                due.push(task.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|task| (task.due, task.id));
        due.into_iter().map(|task| task.command).collect()
    }

    /// Commands still waiting, in scheduling order.
    pub fn pending(&self) -> Vec<ScheduledCommand> {
        self.timeline.lock().pending.clone()
    }

    /// Tasks cancelled before they fell due.
    pub fn cancelled(&self) -> u64 {
        self.timeline.lock().cancelled
    }

    pub fn now(&self) -> Duration {
        self.timeline.lock().now
    }
}

impl TaskScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, command: FlowCommand) -> Box<dyn TaskHandle> {
        let mut timeline = self.timeline.lock();
        timeline.next_id += 1;
        let id = timeline.next_id;
        let due = timeline.now + delay;
        timeline.pending.push(ScheduledCommand { id, due, command });

        Box::new(ManualTask {
            id,
            timeline: Arc::clone(&self.timeline),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_advance_returns_due_in_order() {
        let scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_millis(300), FlowCommand::ClockTick);
        scheduler.schedule(Duration::from_millis(100), FlowCommand::DeleteDigit);

        assert!(scheduler.advance(Duration::from_millis(50)).is_empty());
        assert_eq!(
            scheduler.advance(Duration::from_millis(50)),
            vec![FlowCommand::DeleteDigit]
        );
        assert_eq!(scheduler.pending().len(), 1);
        assert_eq!(
            scheduler.advance(Duration::from_secs(1)),
            vec![FlowCommand::ClockTick]
        );
        assert_eq!(scheduler.now(), Duration::from_millis(1_100));
    }

    #[test]
    fn test_manual_cancel_removes_task() {
        let scheduler = ManualScheduler::new();
        let handle = scheduler.schedule(Duration::from_millis(10), FlowCommand::ClockTick);
        handle.cancel();
        handle.cancel();

        assert_eq!(scheduler.cancelled(), 1);
        assert!(scheduler.advance(Duration::from_secs(1)).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_delivers_and_cancels() {
        let (handle, mut inbox) = FlowHandle::channel();
        let scheduler = TokioScheduler::new(handle);

        let _kept = scheduler.schedule(Duration::from_millis(100), FlowCommand::ClockTick);
        let dropped = scheduler.schedule(Duration::from_millis(50), FlowCommand::DeleteDigit);
        dropped.cancel();

        tokio::time::sleep(Duration::from_millis(200)).await;
        let delivered = inbox.try_recv().expect("clock tick delivered");
        assert_eq!(delivered.command(), Some(&FlowCommand::ClockTick));
        assert!(inbox.try_recv().is_err());
    }
}
