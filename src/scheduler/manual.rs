use super::{Scheduler, TimerHandle};
use std::{
    collections::{BTreeSet, HashMap},
    time::Duration,
};

/// Deterministic scheduler driven by hand, used to test timing without real delays
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_handle: u64,
    /// Ordered by deadline, ties broken by scheduling order
    queue: BTreeSet<(Duration, TimerHandle)>,
    deadlines: HashMap<TimerHandle, Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to its deadline.
    ///
    /// When nothing is due the clock moves to `until` and `None` is returned.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerHandle> {
        match self.queue.first().copied() {
            Some((deadline, handle)) if deadline <= until => {
                self.queue.remove(&(deadline, handle));
                self.deadlines.remove(&handle);
                self.now = self.now.max(deadline);
                Some(handle)
            }
            _ => {
                self.now = self.now.max(until);
                None
            }
        }
    }

    /// Number of timers still waiting to fire
    pub fn pending(&self) -> usize {
        self.deadlines.len()
    }

    pub fn deadline(&self, handle: TimerHandle) -> Option<Duration> {
        self.deadlines.get(&handle).copied()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle)
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle::from_raw(self.next_handle);
        let deadline = self.now + delay;
        self.queue.insert((deadline, handle));
        self.deadlines.insert(handle, deadline);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(deadline) = self.deadlines.remove(&handle) {
            self.queue.remove(&(deadline, handle));
        }
    }
}
