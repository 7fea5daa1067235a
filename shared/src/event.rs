use serde::{Deserialize, Serialize};

use crate::model::Issue;
use crate::timers::TimerId;

/// Everything the shell (or a capability) can tell the core. Both roles share
/// this one type; the session dispatches by role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Event {
    #[default]
    Noop,

    SessionStarted {
        /// Raw routing parameter, e.g. `"admin"`.
        role: String,
        requester: Option<String>,
    },
    SessionEnded,

    IssueSelected {
        issue: Issue,
    },
    CancelRequested {
        /// Issue of the tapped list entry. Only the admin view uses it.
        target: Option<Issue>,
    },
    CancelConfirmed,
    CancelDeclined,

    DraftChanged {
        text: String,
    },
    SendMessage,

    DismissNotification,

    // Capability callbacks
    #[serde(skip)]
    TimerFired {
        id: TimerId,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::SessionStarted { .. } => "session_started",
            Self::SessionEnded => "session_ended",
            Self::IssueSelected { .. } => "issue_selected",
            Self::CancelRequested { .. } => "cancel_requested",
            Self::CancelConfirmed => "cancel_confirmed",
            Self::CancelDeclined => "cancel_declined",
            Self::DraftChanged { .. } => "draft_changed",
            Self::SendMessage => "send_message",
            Self::DismissNotification => "dismiss_notification",
            Self::TimerFired { .. } => "timer_fired",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::IssueSelected { .. }
                | Self::CancelRequested { .. }
                | Self::CancelConfirmed
                | Self::CancelDeclined
                | Self::DraftChanged { .. }
                | Self::SendMessage
                | Self::DismissNotification
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_default() {
        assert_eq!(Event::default(), Event::Noop);
    }

    #[test]
    fn test_event_name() {
        assert_eq!(Event::SendMessage.name(), "send_message");
        assert_eq!(
            Event::IssueSelected { issue: Issue::Medical }.name(),
            "issue_selected"
        );
        assert_eq!(Event::TimerFired { id: TimerId(1) }.name(), "timer_fired");
    }

    #[test]
    fn test_event_is_user_initiated() {
        assert!(Event::SendMessage.is_user_initiated());
        assert!(Event::CancelRequested { target: None }.is_user_initiated());
        assert!(!Event::TimerFired { id: TimerId(1) }.is_user_initiated());
        assert!(!Event::SessionEnded.is_user_initiated());
        assert!(!Event::Noop.is_user_initiated());
    }

    #[test]
    fn test_shell_events_deserialize() {
        let event: Event =
            serde_json::from_str(r#"{"IssueSelected":{"issue":"Vehicle Breakdown"}}"#).unwrap();
        assert_eq!(
            event,
            Event::IssueSelected {
                issue: Issue::VehicleBreakdown
            }
        );
    }
}
