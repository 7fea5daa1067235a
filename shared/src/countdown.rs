use serde::{Deserialize, Serialize};

use crate::timers::TimerId;
use crate::CANCEL_WINDOW_SECS;

/// Period during which a user-submitted request may be withdrawn.
///
/// Invariant: `0 <= remaining_secs <= total_secs`. The window owns at most one
/// countdown lease; it is handed back on expiry and on `stop`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelWindow {
    remaining_secs: u32,
    total_secs: u32,
    active: bool,
    lease: Option<TimerId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running { remaining_secs: u32 },
    Expired { lease: Option<TimerId> },
    Inactive,
}

impl Default for CancelWindow {
    fn default() -> Self {
        Self::new(CANCEL_WINDOW_SECS)
    }
}

impl CancelWindow {
    #[must_use]
    pub const fn new(total_secs: u32) -> Self {
        Self {
            remaining_secs: total_secs,
            total_secs,
            active: false,
            lease: None,
        }
    }

    #[must_use]
    pub const fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub const fn total_secs(&self) -> u32 {
        self.total_secs
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn lease(&self) -> Option<TimerId> {
        self.lease
    }

    /// Resets to the full window and takes ownership of `lease`. Returns the
    /// previous lease, which the caller must release.
    pub fn start(&mut self, lease: TimerId) -> Option<TimerId> {
        self.remaining_secs = self.total_secs;
        self.active = true;
        self.lease.replace(lease)
    }

    pub fn tick(&mut self) -> Tick {
        if !self.active {
            return Tick::Inactive;
        }
        if self.remaining_secs <= 1 {
            self.remaining_secs = 0;
            self.active = false;
            return Tick::Expired {
                lease: self.lease.take(),
            };
        }
        self.remaining_secs -= 1;
        Tick::Running {
            remaining_secs: self.remaining_secs,
        }
    }

    /// Closes the window and resets it to full length for the next request.
    pub fn stop(&mut self) -> Option<TimerId> {
        self.remaining_secs = self.total_secs;
        self.active = false;
        self.lease.take()
    }
}

/// `m:ss`, as shown next to the cancel button.
#[must_use]
pub fn format_time_left(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_window_is_inactive_and_full() {
        let window = CancelWindow::default();
        assert_eq!(window.remaining_secs(), 300);
        assert!(!window.is_active());
        assert_eq!(window.lease(), None);
    }

    #[test]
    fn test_start_resets_and_returns_previous_lease() {
        let mut window = CancelWindow::new(10);
        assert_eq!(window.start(TimerId(1)), None);
        window.tick();
        window.tick();
        assert_eq!(window.remaining_secs(), 8);

        assert_eq!(window.start(TimerId(2)), Some(TimerId(1)));
        assert_eq!(window.remaining_secs(), 10);
        assert_eq!(window.lease(), Some(TimerId(2)));
    }

    #[test]
    fn test_expiry_hands_back_lease() {
        let mut window = CancelWindow::new(2);
        window.start(TimerId(7));
        assert_eq!(window.tick(), Tick::Running { remaining_secs: 1 });
        assert_eq!(window.tick(), Tick::Expired { lease: Some(TimerId(7)) });
        assert_eq!(window.remaining_secs(), 0);
        assert!(!window.is_active());
        assert_eq!(window.tick(), Tick::Inactive);
        assert_eq!(window.remaining_secs(), 0);
    }

    #[test]
    fn test_stop_resets_to_full() {
        let mut window = CancelWindow::new(300);
        window.start(TimerId(3));
        window.tick();
        assert_eq!(window.stop(), Some(TimerId(3)));
        assert_eq!(window.remaining_secs(), 300);
        assert!(!window.is_active());
        assert_eq!(window.stop(), None);
    }

    #[test]
    fn test_format_time_left() {
        assert_eq!(format_time_left(300), "5:00");
        assert_eq!(format_time_left(299), "4:59");
        assert_eq!(format_time_left(61), "1:01");
        assert_eq!(format_time_left(9), "0:09");
        assert_eq!(format_time_left(0), "0:00");
    }

    proptest! {
        #[test]
        fn countdown_decreases_by_one_until_zero(ticks in 0u32..400) {
            let mut window = CancelWindow::new(300);
            window.start(TimerId(1));
            let mut previous = window.remaining_secs();

            for _ in 0..ticks {
                let was_active = window.is_active();
                window.tick();
                let now = window.remaining_secs();

                prop_assert!(now <= 300);
                if was_active {
                    prop_assert_eq!(now, previous - 1);
                } else {
                    prop_assert_eq!(now, 0);
                }
                prop_assert_eq!(window.is_active(), now > 0);
                previous = now;
            }

            prop_assert_eq!(window.remaining_secs(), 300u32.saturating_sub(ticks));
        }
    }
}
