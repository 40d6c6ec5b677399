//! Deduplicating, capacity-bounded toast notification queue.
//!
//! [`ToastQueue`] is a plain state machine: callers add and remove toasts,
//! an injected [`Scheduler`] supplies the clock and dismiss timers, and the
//! rendering side reads [`ToastQueue::visible`]. [`subscriptions::toasts`]
//! runs a queue on a tokio task and publishes visible snapshots.

pub mod constants;
pub mod logging;
pub mod scheduler;
pub mod state;
pub mod subscriptions;

pub use scheduler::{ManualScheduler, Scheduler, TimerHandle, TokioScheduler};
pub use state::{AddOutcome, ToastQueue};
pub use subscriptions::toasts::{ToastHandle, spawn};
pub use toast_queue_config::{ConfigUpdate, ToastsConfig};
pub use toast_queue_util::{IdGenerator, SequentialIds, ToastId, ToastKind, ToastRecord};
