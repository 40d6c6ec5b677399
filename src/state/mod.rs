mod toasts;

pub use toasts::{AddOutcome, ToastQueue};
