use serde::{Deserialize, Serialize};

use crate::timers::TimerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
}

/// The single banner at the top of the screen. The latest notification wins
/// and owns its own dismissal lease.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationBanner {
    current: Option<Notification>,
    lease: Option<TimerId>,
}

impl NotificationBanner {
    #[must_use]
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn lease(&self) -> Option<TimerId> {
        self.lease
    }

    /// Replaces whatever is showing. Returns the superseded dismissal lease.
    pub fn show(&mut self, notification: Notification, lease: TimerId) -> Option<TimerId> {
        self.current = Some(notification);
        self.lease.replace(lease)
    }

    /// Auto-dismiss path. Only the lease that belongs to the current
    /// notification clears it.
    pub fn expire(&mut self, lease: TimerId) -> bool {
        if self.lease != Some(lease) {
            return false;
        }
        self.lease = None;
        self.current.take().is_some()
    }

    /// Manual dismissal. A no-op once the banner is already clear.
    pub fn dismiss(&mut self) -> Option<TimerId> {
        self.current.take()?;
        self.lease.take()
    }
}
