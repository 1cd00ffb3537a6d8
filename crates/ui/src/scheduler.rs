use std::time::Duration;

use services::{Scheduler, TaskHandle, TaskId, TimerFired, TimerKind};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::time::{Instant, MissedTickBehavior};

/// Scheduler backed by tokio timers.
///
/// Every scheduled task runs on its own tokio task and reports back through a
/// single channel, so the owner of the receiver sees timer events one at a
/// time, in the order they fired. Must be used from inside a tokio runtime.
pub struct TokioScheduler {
    next_id: u64,
    events: UnboundedSender<TimerFired>,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its timers report to.
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<TimerFired>) {
        let (events, receiver) = unbounded_channel();
        (Self { next_id: 0, events }, receiver)
    }

    fn next_handle(&mut self) -> TaskHandle {
        self.next_id += 1;
        TaskHandle::new(TaskId::new(self.next_id))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, period: Duration, kind: TimerKind) -> TaskHandle {
        let handle = self.next_handle();
        let task = handle.clone();
        let events = self.events.clone();
        let period = period.max(Duration::from_millis(1));

        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if task.is_cancelled() {
                    break;
                }
                let fired = TimerFired {
                    task: task.id(),
                    kind,
                };
                if events.send(fired).is_err() {
                    break;
                }
            }
        });

        handle
    }

    fn schedule_once(&mut self, delay: Duration, kind: TimerKind) -> TaskHandle {
        let handle = self.next_handle();
        let task = handle.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if task.is_cancelled() {
                return;
            }
            // Receiver gone means the view was torn down.
            let _ = events.send(TimerFired {
                task: task.id(),
                kind,
            });
        });

        handle
    }
}
