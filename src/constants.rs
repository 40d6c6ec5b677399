// Constants module for toast-queue
// Centralizes magic numbers for better maintainability

use std::time::Duration;

// ============================================================================
// Toast Timing Constants
// ============================================================================

/// Identical toasts created within this window refresh the existing one
pub const DEDUP_WINDOW: Duration = Duration::from_millis(3000);

/// Time a toast stays on screen before it starts leaving
pub const AUTO_DISMISS_DURATION: Duration = Duration::from_millis(3000);

/// Exit transition that must finish before the slot is reclaimed
pub const EXIT_ANIMATION_DURATION: Duration = Duration::from_millis(200);

// ============================================================================
// Toast Queue Constants
// ============================================================================

/// Default number of toasts visible at once
pub const DEFAULT_MAX_VISIBLE: u32 = 3;

/// Initial capacity for the visible toasts vector
pub(crate) const INITIAL_VISIBLE_CAPACITY: usize = 10;

// ============================================================================
// Channel and Buffer Constants
// ============================================================================

/// Buffer size for the toast service input channel
pub(crate) const CHANNEL_BUFFER_SIZE: usize = 100;

#[cfg(test)]
mod tests {
    use super::*;
    use toast_queue_config::ToastsConfig;

    #[test]
    fn test_config_defaults_match_constants() {
        let config = ToastsConfig::default();
        assert_eq!(config.dedup_window(), DEDUP_WINDOW);
        assert_eq!(
            config.dismiss_delay(),
            AUTO_DISMISS_DURATION + EXIT_ANIMATION_DURATION
        );
        assert_eq!(config.max_visible, DEFAULT_MAX_VISIBLE);
    }
}
