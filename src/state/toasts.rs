use crate::constants::INITIAL_VISIBLE_CAPACITY;
use crate::scheduler::{ManualScheduler, Scheduler, TimerHandle};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use toast_queue_config::{ConfigUpdate, MIN_VISIBLE, ToastsConfig};
use toast_queue_util::{IdGenerator, SequentialIds, ToastId, ToastKind, ToastRecord};

/// What `add_toast` did with a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Admitted straight to the visible set, countdown started
    Shown(ToastId),
    /// Parked in the backlog until a slot frees up
    Queued(ToastId),
    /// Matched a recent identical toast, no new record created
    Refreshed(ToastId),
    /// The queue has been shut down
    Ignored,
}

impl AddOutcome {
    pub fn id(self) -> Option<ToastId> {
        match self {
            Self::Shown(id) | Self::Queued(id) | Self::Refreshed(id) => Some(id),
            Self::Ignored => None,
        }
    }
}

/// Visible toasts plus a FIFO backlog, with deduplication and auto-dismiss timers.
///
/// Every visible toast owns exactly one live timer in `timers`; admission and
/// scheduling happen in the same call, so observers never see one without the
/// other. Queued toasts have no timer until they are promoted.
pub struct ToastQueue<S: Scheduler, G: IdGenerator = SequentialIds> {
    visible: Vec<ToastRecord>,
    backlog: VecDeque<ToastRecord>,
    timers: HashMap<ToastId, TimerHandle>,
    max_visible: u32,
    deduplication_enabled: bool,
    dedup_window: Duration,
    dismiss_delay: Duration,
    /// Bumped whenever `visible` changes
    revision: u64,
    shut_down: bool,
    scheduler: S,
    ids: G,
}

impl<S: Scheduler> ToastQueue<S> {
    pub fn new(config: &ToastsConfig, scheduler: S) -> Self {
        Self::with_ids(config, scheduler, SequentialIds::new())
    }
}

impl<S: Scheduler, G: IdGenerator> ToastQueue<S, G> {
    /// Build a queue with a custom id source. The generator must not repeat ids.
    pub fn with_ids(config: &ToastsConfig, scheduler: S, ids: G) -> Self {
        Self {
            visible: Vec::with_capacity(INITIAL_VISIBLE_CAPACITY),
            backlog: VecDeque::new(),
            timers: HashMap::new(),
            max_visible: config.max_visible.max(MIN_VISIBLE),
            deduplication_enabled: config.deduplication_enabled,
            dedup_window: config.dedup_window(),
            dismiss_delay: config.dismiss_delay(),
            revision: 0,
            shut_down: false,
            scheduler,
            ids,
        }
    }

    /// Show a toast, queue it, or refresh an identical recent one
    pub fn add_toast(&mut self, message: impl Into<String>, kind: ToastKind) -> AddOutcome {
        if self.shut_down {
            tracing::warn!("Toast queue is shut down, dropping toast");
            return AddOutcome::Ignored;
        }

        let message = message.into();
        let now = self.scheduler.now();

        if self.deduplication_enabled {
            if let Some(id) = self.find_duplicate(&message, kind, now) {
                if self.timers.contains_key(&id) {
                    tracing::debug!("Refreshing dismiss timer of duplicate {id}");
                    self.schedule_dismiss(id);
                } else {
                    tracing::debug!("Duplicate of queued {id} absorbed");
                }
                return AddOutcome::Refreshed(id);
            }
        }

        let record = ToastRecord::new(self.ids.next_id(), message, kind, now);
        let id = record.id;
        debug_assert!(!self.contains(id), "id generator repeated {id}");

        if self.has_free_slot() {
            tracing::debug!("Showing {id} ({kind})");
            self.admit(record);
            AddOutcome::Shown(id)
        } else {
            tracing::debug!(
                "Queueing {id} ({kind}), {} already waiting",
                self.backlog.len()
            );
            self.backlog.push_back(record);
            AddOutcome::Queued(id)
        }
    }

    /// Remove a toast by ID, cancelling its timer and promoting from the backlog
    ///
    /// Returns the removed toast if found
    pub fn remove_toast(&mut self, id: ToastId) -> Option<ToastRecord> {
        if self.shut_down {
            return None;
        }

        if let Some(handle) = self.timers.remove(&id) {
            self.scheduler.cancel(handle);
        }

        let removed = if let Some(pos) = self.visible.iter().position(|t| t.id == id) {
            self.revision += 1;
            Some(self.visible.remove(pos))
        } else {
            self.backlog
                .iter()
                .position(|t| t.id == id)
                .and_then(|pos| self.backlog.remove(pos))
        };

        if removed.is_some() {
            self.promote();
        }
        removed
    }

    /// Handle a fired timer. Handles that are no longer live are ignored.
    ///
    /// Returns whether a toast was dismissed
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.shut_down {
            tracing::trace!("Ignoring {handle} after shutdown");
            return false;
        }

        let Some(id) = self
            .timers
            .iter()
            .find_map(|(id, live)| (*live == handle).then_some(*id))
        else {
            tracing::trace!("Ignoring stale {handle}");
            return false;
        };

        tracing::debug!("Auto-dismissing {id}");
        self.remove_toast(id).is_some()
    }

    /// Apply a runtime settings change.
    ///
    /// Shrinking `max_visible` never evicts; it only holds back promotion.
    pub fn configure(&mut self, update: ConfigUpdate) {
        if self.shut_down {
            return;
        }

        if let Some(max_visible) = update.max_visible {
            let clamped = max_visible.max(MIN_VISIBLE);
            if clamped != max_visible {
                tracing::warn!("max_visible {max_visible} is below {MIN_VISIBLE}, using {clamped}");
            }
            self.max_visible = clamped;
        }
        if let Some(enabled) = update.deduplication_enabled {
            self.deduplication_enabled = enabled;
        }
        self.promote();
    }

    /// Cancel every live timer. The queue ignores all later events.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        for (_, handle) in self.timers.drain() {
            self.scheduler.cancel(handle);
        }
        self.shut_down = true;
        tracing::debug!("Toast queue shut down");
    }

    /// Visible toasts in display order
    pub fn visible(&self) -> &[ToastRecord] {
        &self.visible
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    pub fn is_visible(&self, id: ToastId) -> bool {
        self.visible.iter().any(|t| t.id == id)
    }

    pub fn is_queued(&self, id: ToastId) -> bool {
        self.backlog.iter().any(|t| t.id == id)
    }

    pub fn max_visible(&self) -> u32 {
        self.max_visible
    }

    pub fn deduplication_enabled(&self) -> bool {
        self.deduplication_enabled
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Number of live dismiss timers
    pub fn live_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn timer_for(&self, id: ToastId) -> Option<TimerHandle> {
        self.timers.get(&id).copied()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn contains(&self, id: ToastId) -> bool {
        self.is_visible(id) || self.is_queued(id)
    }

    fn has_free_slot(&self) -> bool {
        self.visible.len() < self.max_visible as usize
    }

    fn find_duplicate(&self, message: &str, kind: ToastKind, now: Duration) -> Option<ToastId> {
        self.visible
            .iter()
            .chain(self.backlog.iter())
            .find(|t| t.same_content(message, kind) && t.within_window(now, self.dedup_window))
            .map(|t| t.id)
    }

    fn admit(&mut self, record: ToastRecord) {
        self.schedule_dismiss(record.id);
        self.visible.push(record);
        self.revision += 1;
    }

    /// (Re)start the countdown for a visible toast from now
    fn schedule_dismiss(&mut self, id: ToastId) {
        if let Some(previous) = self.timers.remove(&id) {
            self.scheduler.cancel(previous);
        }
        let handle = self.scheduler.schedule(self.dismiss_delay);
        self.timers.insert(id, handle);
    }

    /// Move the longest-waiting backlog entries into free slots
    fn promote(&mut self) {
        while self.has_free_slot() {
            let Some(record) = self.backlog.pop_front() else {
                break;
            };
            tracing::debug!(
                "Promoting {} after waiting {:?}",
                record.id,
                record.age(self.scheduler.now())
            );
            self.admit(record);
        }
    }
}

impl<G: IdGenerator> ToastQueue<ManualScheduler, G> {
    /// Move the manual clock forward, firing due timers one at a time in deadline order
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some(handle) = self.scheduler.pop_due(until) {
            self.fire(handle);
        }
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }
}

impl<S: Scheduler, G: IdGenerator> Drop for ToastQueue<S, G> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<S: Scheduler + std::fmt::Debug, G: IdGenerator> std::fmt::Debug for ToastQueue<S, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastQueue")
            .field("visible", &self.visible)
            .field("backlog", &self.backlog)
            .field("timers", &self.timers)
            .field("max_visible", &self.max_visible)
            .field("deduplication_enabled", &self.deduplication_enabled)
            .field("shut_down", &self.shut_down)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn queue() -> ToastQueue<ManualScheduler> {
        ToastQueue::new(&ToastsConfig::default(), ManualScheduler::new())
    }

    #[test]
    fn test_add_shows_and_schedules() {
        let mut q = queue();
        let outcome = q.add_toast("Saved", ToastKind::Success);

        let AddOutcome::Shown(id) = outcome else {
            panic!("expected Shown, got {outcome:?}");
        };
        assert_eq!(q.visible().len(), 1);
        let handle = q.timer_for(id).unwrap();
        assert_eq!(q.scheduler().deadline(handle), Some(ms(3200)));
        assert_eq!(q.revision(), 1);
    }

    #[test]
    fn test_refresh_reschedules_from_now() {
        let mut q = queue();
        let id = q.add_toast("Saved", ToastKind::Success).id().unwrap();
        let first = q.timer_for(id).unwrap();

        q.advance(ms(1000));
        assert_eq!(q.add_toast("Saved", ToastKind::Success), AddOutcome::Refreshed(id));

        let second = q.timer_for(id).unwrap();
        assert_ne!(first, second);
        assert!(!q.scheduler().is_pending(first));
        assert_eq!(q.scheduler().deadline(second), Some(ms(4200)));
        assert_eq!(q.scheduler().pending(), 1);
        // Refresh does not touch the visible sequence
        assert_eq!(q.revision(), 1);
    }

    #[test]
    fn test_different_kind_is_not_a_duplicate() {
        let mut q = queue();
        q.add_toast("Done", ToastKind::Success);
        assert!(matches!(q.add_toast("Done", ToastKind::Info), AddOutcome::Shown(_)));
        assert_eq!(q.visible().len(), 2);
    }

    #[test]
    fn test_window_measured_from_creation() {
        let mut q = queue();
        let id = q.add_toast("Ping", ToastKind::Info).id().unwrap();

        q.advance(ms(2000));
        assert_eq!(q.add_toast("Ping", ToastKind::Info), AddOutcome::Refreshed(id));

        // Still visible thanks to the refresh, but the window has closed
        q.advance(ms(1000));
        assert!(q.is_visible(id));
        assert!(matches!(q.add_toast("Ping", ToastKind::Info), AddOutcome::Shown(_)));
    }

    #[test]
    fn test_duplicate_of_queued_toast_is_absorbed() {
        let mut q = queue();
        for i in 0..3 {
            q.add_toast(format!("Toast {i}"), ToastKind::Info);
        }
        let queued = q.add_toast("Late", ToastKind::Error).id().unwrap();
        assert!(q.is_queued(queued));

        assert_eq!(q.add_toast("Late", ToastKind::Error), AddOutcome::Refreshed(queued));
        assert_eq!(q.backlog_len(), 1);
        assert_eq!(q.timer_for(queued), None);
        assert_eq!(q.live_timers(), 3);
    }

    #[test]
    fn test_fire_with_stale_handle_is_ignored() {
        let mut q = queue();
        let id = q.add_toast("A", ToastKind::Info).id().unwrap();
        let stale = q.timer_for(id).unwrap();
        q.add_toast("A", ToastKind::Info);

        assert!(!q.fire(stale));
        assert!(q.is_visible(id));
    }

    #[test]
    fn test_remove_queued_toast() {
        let mut q = queue();
        for i in 0..4 {
            q.add_toast(format!("Toast {i}"), ToastKind::Info);
        }
        let queued = q.add_toast("Queued", ToastKind::Info).id().unwrap();

        let removed = q.remove_toast(queued).unwrap();
        assert_eq!(removed.message, "Queued");
        assert_eq!(q.backlog_len(), 1);
        assert_eq!(q.visible().len(), 3);
    }

    #[test]
    fn test_configure_clamps_to_one() {
        let mut q = queue();
        q.configure(ConfigUpdate::max_visible(0));
        assert_eq!(q.max_visible(), 1);
    }

    #[test]
    fn test_add_after_shutdown_is_ignored() {
        let mut q = queue();
        q.shutdown();
        assert_eq!(q.add_toast("x", ToastKind::Info), AddOutcome::Ignored);
        assert!(q.visible().is_empty());
        assert_eq!(AddOutcome::Ignored.id(), None);
    }

    #[test]
    fn test_custom_id_generator() {
        let mut next = 0u64;
        let ids = move || {
            next += 2;
            ToastId::new(std::num::NonZeroU64::new(next).unwrap())
        };
        let mut q = ToastQueue::with_ids(&ToastsConfig::default(), ManualScheduler::new(), ids);

        assert_eq!(q.add_toast("a", ToastKind::Info).id().map(ToastId::get), Some(2));
        assert_eq!(q.add_toast("b", ToastKind::Info).id().map(ToastId::get), Some(4));
    }
}
