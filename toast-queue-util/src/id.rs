use serde::{Deserialize, Serialize};
use std::{fmt, num::NonZeroU64};

/// Opaque identifier of a toast, stable for the toast's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(NonZeroU64);

impl ToastId {
    pub const fn new(raw: NonZeroU64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Source of fresh toast ids.
///
/// Ids only need to be unique for the lifetime of the process.
pub trait IdGenerator {
    fn next_id(&mut self) -> ToastId;
}

/// Hands out 1, 2, 3, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: NonZeroU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self {
            next: NonZeroU64::MIN,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ToastId {
        let id = ToastId(self.next);
        // Wrapping past u64::MAX would take centuries of toasts; start over at 1
        self.next = self.next.checked_add(1).unwrap_or(NonZeroU64::MIN);
        id
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> ToastId,
{
    fn next_id(&mut self) -> ToastId {
        self()
    }
}
