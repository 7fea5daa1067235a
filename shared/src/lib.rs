// lib.rs - Emergency request screen core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod capabilities;
pub mod command;
pub mod config;
pub mod countdown;
pub mod event;
pub mod model;
pub mod notification;
pub mod session;
pub mod timers;
pub mod transcript;
pub mod view;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use command::Command;
pub use config::SessionConfig;
pub use countdown::CancelWindow;
pub use crux_core::App as CruxApp;
pub use event::Event;
pub use model::{
    AdminSession, CancelPrompt, ChatMessage, Issue, Model, Request, RequestId, Role, RoleState,
    Screen, Sender, SessionPhase, UserSession,
};
pub use notification::{Notification, NotificationBanner};
pub use session::Inputs;
pub use timers::{TimerId, TimerPurpose, Timers};
pub use transcript::Transcript;
pub use view::{ViewModel, ViewState};

pub const CANCEL_WINDOW_SECS: u32 = 300;
pub const COUNTDOWN_TICK_MS: u64 = 1000;
pub const BOT_REPLY_DELAY_MS: u64 = 1000;
pub const NOTIFICATION_DURATION_MS: u64 = 20_000;
pub const DEFAULT_REQUESTER_NAME: &str = "John Doe";
pub const ADMIN_ROLE_PARAM: &str = "admin";

/// Reasons an event is ignored. Never shown to the user; the reducer logs
/// them and leaves the model untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session is not active")]
    NotActive,
    #[error("session already started")]
    AlreadyStarted,
    #[error("an issue is already selected ({0})")]
    IssueAlreadySelected(Issue),
    #[error("no request is active")]
    NoActiveRequest,
    #[error("cancel window has closed")]
    CancelWindowClosed,
    #[error("no request matches {0}")]
    NoMatchingRequest(Issue),
    #[error("no cancellation is awaiting confirmation")]
    NoPendingConfirmation,
    #[error("message is empty")]
    EmptyMessage,
    #[error("no notification is showing")]
    NoNotification,
    #[error("{0} is not a live timer")]
    StaleTimer(TimerId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown issue label: {0:?}")]
pub struct IssueParseError(pub String);

pub type SessionResult<T> = Result<T, SessionError>;

#[must_use]
pub fn get_current_time_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnixTimeMs(pub u64);

impl UnixTimeMs {
    #[must_use]
    pub fn now() -> Self {
        Self(get_current_time_ms())
    }

    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn add_millis(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    #[must_use]
    pub fn is_after(self, other: Self) -> bool {
        self.0 > other.0
    }

    /// Wall-clock `HH:MM:SS` (UTC) for message timestamps.
    #[must_use]
    pub fn clock_label(self) -> String {
        let secs_of_day = (self.0 / 1000) % 86_400;
        format!(
            "{:02}:{:02}:{:02}",
            secs_of_day / 3600,
            (secs_of_day % 3600) / 60,
            secs_of_day % 60
        )
    }
}
