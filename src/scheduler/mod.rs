//! Clock and timer capability injected into the toast queue.
//!
//! The queue never sleeps or spawns on its own; it asks a [`Scheduler`] for
//! the current time and for deferred wake-ups, and gets told which
//! [`TimerHandle`] fired through [`ToastQueue::fire`](crate::state::ToastQueue::fire).

mod manual;
mod runtime;

pub use self::manual::ManualScheduler;
pub use self::runtime::TokioScheduler;

use std::{fmt, time::Duration};

/// Opaque handle of a scheduled timer. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

pub trait Scheduler {
    /// Monotonic time since the scheduler's origin
    fn now(&self) -> Duration;

    /// Arrange for `handle` to be delivered back after `delay`
    fn schedule(&mut self, delay: Duration) -> TimerHandle;

    /// Cancel a pending timer. Unknown or already fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}
