use serde::{Deserialize, Serialize};

use crate::{
    BOT_REPLY_DELAY_MS, CANCEL_WINDOW_SECS, COUNTDOWN_TICK_MS, DEFAULT_REQUESTER_NAME,
    NOTIFICATION_DURATION_MS,
};

/// Durations and identity used by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub cancel_window_secs: u32,
    pub countdown_tick_ms: u64,
    pub bot_reply_delay_ms: u64,
    pub notification_duration_ms: u64,
    pub requester_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cancel_window_secs: CANCEL_WINDOW_SECS,
            countdown_tick_ms: COUNTDOWN_TICK_MS,
            bot_reply_delay_ms: BOT_REPLY_DELAY_MS,
            notification_duration_ms: NOTIFICATION_DURATION_MS,
            requester_name: DEFAULT_REQUESTER_NAME.to_string(),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_requester(mut self, name: impl Into<String>) -> Self {
        self.requester_name = name.into();
        self
    }

    #[must_use]
    pub fn with_cancel_window_secs(mut self, secs: u32) -> Self {
        self.cancel_window_secs = secs;
        self
    }
}
