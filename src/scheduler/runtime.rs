use super::{Scheduler, TimerHandle};
use std::{collections::HashMap, time::Duration};
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    task::JoinHandle,
    time::Instant,
};

/// Scheduler backed by tokio timers.
///
/// Every timer is a spawned task that sleeps and then reports its handle on the
/// channel returned by [`TokioScheduler::new`]. Must be used inside a tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    origin: Instant,
    next_handle: u64,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    fired_tx: UnboundedSender<TimerHandle>,
}

impl TokioScheduler {
    pub fn new() -> (Self, UnboundedReceiver<TimerHandle>) {
        let (fired_tx, fired_rx) = unbounded_channel();
        (
            Self {
                origin: Instant::now(),
                next_handle: 0,
                tasks: HashMap::new(),
                fired_tx,
            },
            fired_rx,
        )
    }

    /// Number of timer tasks not yet cancelled or reaped
    pub fn pending(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> Duration {
        Instant::now().saturating_duration_since(self.origin)
    }

    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle::from_raw(self.next_handle);

        // Reap finished tasks so the table does not grow with fired timers
        self.tasks.retain(|_, task| !task.is_finished());

        let tx = self.fired_tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(handle).is_err() {
                tracing::trace!("timer {handle} fired after the queue went away");
            }
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
