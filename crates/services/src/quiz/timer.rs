//! Cancellable scheduled tasks.
//!
//! A [`Scheduler`] turns "call me later" requests into [`TimerFired`] values
//! that are fed back to the quiz controller one at a time. Each request yields
//! a [`TaskHandle`]; the controller keeps the handle of the task it currently
//! cares about and drops any fired value whose task id does not match, so a
//! cancelled task can never act even if its event was already queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// What a scheduled task is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// One-second countdown step.
    Tick,
    /// Hide the answer feedback message.
    FeedbackExpired,
}

/// A scheduled task reporting that it is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub task: TaskId,
    pub kind: TimerKind,
}

/// Handle to a scheduled task. Clones share the cancellation flag.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle {
    #[must_use]
    pub fn new(id: TaskId) -> Self {
        Self {
            id,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Stop the task from firing again. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

pub trait Scheduler {
    /// Fire `kind` every `period` until cancelled.
    fn schedule_repeating(&mut self, period: Duration, kind: TimerKind) -> TaskHandle;

    /// Fire `kind` once after `delay` unless cancelled first.
    fn schedule_once(&mut self, delay: Duration, kind: TimerKind) -> TaskHandle;
}

struct ScheduledTask {
    handle: TaskHandle,
    kind: TimerKind,
    due: Duration,
    period: Option<Duration>,
}

/// Virtual-time scheduler. Nothing fires until the clock is advanced.
#[derive(Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    tasks: Vec<ScheduledTask>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since the scheduler was created.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks that may still fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| !task.handle.is_cancelled())
            .count()
    }

    /// Pop the earliest task due at or before `until`, moving the clock to its due time.
    ///
    /// Ties fire in scheduling order. Repeating tasks are re-armed one period later.
    pub fn next_due(&mut self, until: Duration) -> Option<TimerFired> {
        self.tasks.retain(|task| !task.handle.is_cancelled());

        let (position, _) = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= until)
            .min_by_key(|(_, task)| (task.due, task.handle.id()))?;

        let fired = {
            let task = &mut self.tasks[position];
            self.now = self.now.max(task.due);
            let fired = TimerFired {
                task: task.handle.id(),
                kind: task.kind,
            };
            if let Some(period) = task.period {
                task.due += period;
            }
            fired
        };

        if self.tasks[position].period.is_none() {
            self.tasks.remove(position);
        }
        Some(fired)
    }

    /// Move the clock forward to `until` without firing anything.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Advance the clock by `by`, returning everything that fired in due order.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerFired> {
        let until = self.now + by;
        let mut fired = Vec::new();
        while let Some(event) = self.next_due(until) {
            fired.push(event);
        }
        self.settle(until);
        fired
    }

    fn push(&mut self, due_in: Duration, period: Option<Duration>, kind: TimerKind) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle::new(TaskId::new(self.next_id));
        self.tasks.push(ScheduledTask {
            handle: handle.clone(),
            kind,
            due: self.now + due_in,
            period,
        });
        handle
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, period: Duration, kind: TimerKind) -> TaskHandle {
        // A zero period would re-arm at the same instant forever.
        let period = period.max(Duration::from_millis(1));
        self.push(period, Some(period), kind)
    }

    fn schedule_once(&mut self, delay: Duration, kind: TimerKind) -> TaskHandle {
        self.push(delay, None, kind)
    }
}
