use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::countdown::CancelWindow;
use crate::notification::NotificationBanner;
use crate::timers::Timers;
use crate::transcript::Transcript;
use crate::{IssueParseError, UnixTimeMs, ADMIN_ROLE_PARAM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    /// Routing parameter: `"admin"` selects the admin view, anything else is a
    /// regular user.
    #[must_use]
    pub fn from_route_param(param: &str) -> Self {
        if param == ADMIN_ROLE_PARAM {
            Self::Admin
        } else {
            Self::User
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Issue {
    #[serde(rename = "Vehicle Breakdown")]
    VehicleBreakdown,
    #[serde(rename = "Accident/Fire")]
    AccidentFire,
    #[serde(rename = "Medical")]
    Medical,
}

impl Issue {
    pub const ALL: [Self; 3] = [Self::VehicleBreakdown, Self::AccidentFire, Self::Medical];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VehicleBreakdown => "Vehicle Breakdown",
            Self::AccidentFire => "Accident/Fire",
            Self::Medical => "Medical",
        }
    }

    /// Icon hint for the issue button.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::VehicleBreakdown => "car-outline",
            Self::AccidentFire => "flame-outline",
            Self::Medical => "medkit-outline",
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Issue {
    type Err = IssueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|issue| issue.label() == s.trim())
            .ok_or_else(|| IssueParseError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub sent_at: UnixTimeMs,
}

impl ChatMessage {
    #[must_use]
    pub fn time_label(&self) -> String {
        self.sent_at.clock_label()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl RequestId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub issue: Issue,
    pub requested_at: UnixTimeMs,
    pub requester_name: String,
}

impl Request {
    #[must_use]
    pub fn new(
        id: RequestId,
        issue: Issue,
        requester_name: impl Into<String>,
        requested_at: UnixTimeMs,
    ) -> Self {
        Self {
            id,
            issue,
            requested_at,
            requester_name: requester_name.into(),
        }
    }
}

/// The yes/no question shown before a cancellation goes through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelPrompt {
    pub issue: Issue,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    /// `Some` exactly while an issue is selected; the request it generated.
    pub pending: Option<Request>,
    pub cancel_window: CancelWindow,
}

impl UserSession {
    #[must_use]
    pub fn with_window_secs(secs: u32) -> Self {
        Self {
            pending: None,
            cancel_window: CancelWindow::new(secs),
        }
    }

    #[must_use]
    pub fn selected_issue(&self) -> Option<Issue> {
        self.pending.as_ref().map(|r| r.issue)
    }

    #[must_use]
    pub const fn request_generated(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    pub requests: Vec<Request>,
    pub selected_issue: Option<Issue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleState {
    User(UserSession),
    Admin(AdminSession),
}

impl Default for RoleState {
    fn default() -> Self {
        Self::User(UserSession::default())
    }
}

impl RoleState {
    #[must_use]
    pub fn for_role(role: Role, config: &SessionConfig) -> Self {
        match role {
            Role::Admin => Self::Admin(AdminSession::default()),
            Role::User => Self::User(UserSession::with_window_secs(config.cancel_window_secs)),
        }
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::User(_) => Role::User,
            Self::Admin(_) => Role::Admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    NotStarted,
    Active,
    Ended,
}

/// State every role shares: the thread, the input box, the banner, the
/// confirmation prompt and the timer leases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    pub transcript: Transcript,
    pub draft: String,
    pub notification: NotificationBanner,
    pub prompt: Option<CancelPrompt>,
    pub timers: Timers,
    pub config: SessionConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub phase: SessionPhase,
    pub role: RoleState,
    pub screen: Screen,
}

impl Model {
    /// An already started session, as if `SessionStarted` had been handled.
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self::with_config(role, SessionConfig::default())
    }

    #[must_use]
    pub fn with_config(role: Role, config: SessionConfig) -> Self {
        Self {
            phase: SessionPhase::Active,
            role: RoleState::for_role(role, &config),
            screen: Screen {
                config,
                ..Screen::default()
            },
        }
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role.role()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    #[must_use]
    pub fn selected_issue(&self) -> Option<Issue> {
        match &self.role {
            RoleState::User(user) => user.selected_issue(),
            RoleState::Admin(admin) => admin.selected_issue,
        }
    }

    #[must_use]
    pub fn request_generated(&self) -> bool {
        matches!(&self.role, RoleState::User(user) if user.request_generated())
    }

    #[must_use]
    pub fn can_cancel_request(&self) -> bool {
        matches!(&self.role, RoleState::User(user) if user.cancel_window.is_active())
    }

    #[must_use]
    pub fn cancel_window(&self) -> Option<&CancelWindow> {
        match &self.role {
            RoleState::User(user) => Some(&user.cancel_window),
            RoleState::Admin(_) => None,
        }
    }

    #[must_use]
    pub fn requests(&self) -> &[Request] {
        match &self.role {
            RoleState::Admin(admin) => &admin.requests,
            RoleState::User(_) => &[],
        }
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.screen.transcript
    }

    #[must_use]
    pub fn notification_text(&self) -> Option<&str> {
        self.screen.notification.current().map(|n| n.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod role_tests {
        use super::*;

        #[test]
        fn test_role_from_route_param() {
            assert_eq!(Role::from_route_param("admin"), Role::Admin);
            assert_eq!(Role::from_route_param("user"), Role::User);
            assert_eq!(Role::from_route_param("Admin"), Role::User);
            assert_eq!(Role::from_route_param(""), Role::User);
        }
    }

    mod issue_tests {
        use super::*;

        #[test]
        fn test_issue_labels_round_trip_through_from_str() {
            for issue in Issue::ALL {
                assert_eq!(issue.label().parse::<Issue>(), Ok(issue));
            }
        }

        #[test]
        fn test_issue_from_str_rejects_unknown() {
            assert_eq!(
                "Flood".parse::<Issue>(),
                Err(IssueParseError("Flood".into()))
            );
        }

        #[test]
        fn test_issue_serializes_as_label() {
            let json = serde_json::to_string(&Issue::AccidentFire).unwrap();
            assert_eq!(json, "\"Accident/Fire\"");
        }

        #[test]
        fn test_issue_icons() {
            assert_eq!(Issue::VehicleBreakdown.icon(), "car-outline");
            assert_eq!(Issue::AccidentFire.icon(), "flame-outline");
            assert_eq!(Issue::Medical.icon(), "medkit-outline");
        }
    }

    mod model_tests {
        use super::*;

        #[test]
        fn test_model_default_is_not_started() {
            let model = Model::default();
            assert_eq!(model.phase, SessionPhase::NotStarted);
            assert_eq!(model.role(), Role::User);
        }

        #[test]
        fn test_new_user_model() {
            let model = Model::new(Role::User);
            assert!(model.is_active());
            assert_eq!(model.selected_issue(), None);
            assert!(!model.request_generated());
            assert!(!model.can_cancel_request());
            assert_eq!(model.cancel_window().map(CancelWindow::remaining_secs), Some(300));
            assert!(model.requests().is_empty());
        }

        #[test]
        fn test_new_admin_model_has_no_cancel_window() {
            let model = Model::new(Role::Admin);
            assert_eq!(model.role(), Role::Admin);
            assert!(model.cancel_window().is_none());
        }

        #[test]
        fn test_generated_request_ids_are_unique() {
            assert_ne!(RequestId::generate(), RequestId::generate());
        }

        #[test]
        fn test_request_keeps_given_id() {
            let id = RequestId("req-1".into());
            let request = Request::new(id.clone(), Issue::Medical, "A", UnixTimeMs(1));
            assert_eq!(request.id, id);
            assert_eq!(request.requester_name, "A");
        }
    }
}
