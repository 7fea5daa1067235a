use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Handle for one scheduled callback. Ids are never reused within a session,
/// so a late `TimerFired` for a released lease cannot be mistaken for a live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerPurpose {
    Countdown,
    NotificationDismiss,
    BotReply { text: String },
}

impl TimerPurpose {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Countdown => "countdown",
            Self::NotificationDismiss => "notification_dismiss",
            Self::BotReply { .. } => "bot_reply",
        }
    }
}

/// Live timer leases owned by the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timers {
    next_id: u64,
    live: BTreeMap<TimerId, TimerPurpose>,
}

impl Timers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&mut self, purpose: TimerPurpose) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.live.insert(id, purpose);
        id
    }

    pub fn release(&mut self, id: TimerId) -> Option<TimerPurpose> {
        self.live.remove(&id)
    }

    /// Drops every lease, returning the ids so the caller can cancel them.
    pub fn release_all(&mut self) -> Vec<TimerId> {
        std::mem::take(&mut self.live).into_keys().collect()
    }

    #[must_use]
    pub fn get(&self, id: TimerId) -> Option<&TimerPurpose> {
        self.live.get(&id)
    }

    #[must_use]
    pub fn is_live(&self, id: TimerId) -> bool {
        self.live.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn count(&self, purpose: &TimerPurpose) -> usize {
        self.live
            .values()
            .filter(|p| std::mem::discriminant(*p) == std::mem::discriminant(purpose))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_assigns_fresh_ids() {
        let mut timers = Timers::new();
        let a = timers.acquire(TimerPurpose::Countdown);
        let b = timers.acquire(TimerPurpose::NotificationDismiss);
        assert_ne!(a, b);
        assert_eq!(timers.len(), 2);
        assert_eq!(timers.get(a), Some(&TimerPurpose::Countdown));
    }

    #[test]
    fn test_released_ids_are_not_reused() {
        let mut timers = Timers::new();
        let a = timers.acquire(TimerPurpose::Countdown);
        assert_eq!(timers.release(a), Some(TimerPurpose::Countdown));
        let b = timers.acquire(TimerPurpose::Countdown);
        assert_ne!(a, b);
        assert!(!timers.is_live(a));
        assert!(timers.is_live(b));
    }

    #[test]
    fn test_release_twice_is_harmless() {
        let mut timers = Timers::new();
        let a = timers.acquire(TimerPurpose::NotificationDismiss);
        assert!(timers.release(a).is_some());
        assert!(timers.release(a).is_none());
    }

    #[test]
    fn test_release_all() {
        let mut timers = Timers::new();
        let a = timers.acquire(TimerPurpose::Countdown);
        let b = timers.acquire(TimerPurpose::BotReply { text: "hi".into() });
        assert_eq!(timers.release_all(), vec![a, b]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_count_by_purpose() {
        let mut timers = Timers::new();
        timers.acquire(TimerPurpose::BotReply { text: "a".into() });
        timers.acquire(TimerPurpose::BotReply { text: "b".into() });
        timers.acquire(TimerPurpose::Countdown);
        assert_eq!(timers.count(&TimerPurpose::BotReply { text: String::new() }), 2);
        assert_eq!(timers.count(&TimerPurpose::Countdown), 1);
        assert_eq!(timers.count(&TimerPurpose::NotificationDismiss), 0);
    }
}
