//! Cancellable repeating timers.
//!
//! A [`Scheduler`] only produces [`TimerEvent`]s; whoever owns the session
//! receives them and applies them one at a time. Every event carries the epoch
//! of the session that scheduled it, so events still queued after a restart can
//! be recognised and dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Advances the simulation one step
    Tick,
    /// Advances the elapsed-time display by one second
    Clock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub kind: TimerKind,
    pub epoch: u64,
}

/// Handle to a repeating task. Cancelling is idempotent, and dropping the
/// handle cancels the task.
pub struct TaskHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TaskHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

pub trait Scheduler {
    /// Deliver `event` every `period`, first delivery one period from now
    fn schedule_repeating(&mut self, period: Duration, event: TimerEvent) -> TaskHandle;
}

/// Spawns one tokio task per timer, delivering events over an mpsc channel.
///
/// Must be used from within a tokio runtime.
pub struct TokioScheduler {
    tx: UnboundedSender<TimerEvent>,
}

impl TokioScheduler {
    pub fn new() -> (Self, UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, period: Duration, event: TimerEvent) -> TaskHandle {
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + period, period);
            // A late tick is delivered late, never doubled up
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                timer.tick().await;
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        let abort = task.abort_handle();
        TaskHandle::new(move || abort.abort())
    }
}

/// A timer registered with a [`ManualScheduler`]
#[derive(Debug, Clone)]
pub struct ManualTimer {
    pub period: Duration,
    pub event: TimerEvent,
    active: Arc<AtomicBool>,
}

impl ManualTimer {
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Records timers instead of running them. Callers drive time by feeding
/// events to the session themselves.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    timers: Vec<ManualTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every timer ever scheduled, in order
    pub fn timers(&self) -> &[ManualTimer] {
        &self.timers
    }

    /// Events of the timers that have not been cancelled
    pub fn active_events(&self) -> Vec<TimerEvent> {
        self.timers
            .iter()
            .filter(|timer| timer.is_active())
            .map(|timer| timer.event)
            .collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, period: Duration, event: TimerEvent) -> TaskHandle {
        let active = Arc::new(AtomicBool::new(true));
        self.timers.push(ManualTimer {
            period,
            event,
            active: Arc::clone(&active),
        });
        TaskHandle::new(move || active.store(false, Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(epoch: u64) -> TimerEvent {
        TimerEvent {
            kind: TimerKind::Tick,
            epoch,
        }
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut scheduler = ManualScheduler::new();
        let mut handle = scheduler.schedule_repeating(Duration::from_millis(300), tick(1));

        assert!(handle.is_active());
        handle.cancel();
        handle.cancel();
        assert!(!handle.is_active());
        assert!(scheduler.active_events().is_empty());
    }

    #[test]
    fn test_drop_cancels() {
        let mut scheduler = ManualScheduler::new();
        {
            let _handle = scheduler.schedule_repeating(Duration::from_millis(300), tick(1));
            assert_eq!(scheduler.active_events(), vec![tick(1)]);
        }
        assert!(scheduler.active_events().is_empty());
        assert_eq!(scheduler.timers().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_delivers_until_cancelled() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let mut handle = scheduler.schedule_repeating(Duration::from_millis(300), tick(4));

        assert_eq!(rx.recv().await, Some(tick(4)));
        assert_eq!(rx.recv().await, Some(tick(4)));

        handle.cancel();
        tokio::time::sleep(Duration::from_secs(2)).await;
        // Anything already queued is drained; nothing new arrives afterwards
        while rx.try_recv().is_ok() {}
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }
}
