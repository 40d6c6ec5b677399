pub mod id;
pub mod kind;

pub use id::{IdGenerator, SequentialIds, ToastId};
pub use kind::ToastKind;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single toast notification
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToastRecord {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    /// Logical creation time, measured from the scheduler's origin
    pub created_at: Duration,
}

impl ToastRecord {
    pub fn new(id: ToastId, message: impl Into<String>, kind: ToastKind, created_at: Duration) -> Self {
        Self {
            id,
            message: message.into(),
            kind,
            created_at,
        }
    }

    /// Whether this toast carries the same content as `message`/`kind`
    pub fn same_content(&self, message: &str, kind: ToastKind) -> bool {
        self.kind == kind && self.message == message
    }

    /// Whether `now` still falls inside the deduplication window opened at creation
    pub fn within_window(&self, now: Duration, window: Duration) -> bool {
        now.saturating_sub(self.created_at) < window
    }

    /// Time elapsed since creation
    pub fn age(&self, now: Duration) -> Duration {
        now.saturating_sub(self.created_at)
    }
}
