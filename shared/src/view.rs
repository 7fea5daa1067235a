use serde::{Deserialize, Serialize};

use crate::countdown::format_time_left;
use crate::model::{
    AdminSession, CancelPrompt, ChatMessage, Issue, Model, Request, Role, RoleState, Sender,
    SessionPhase, UserSession,
};

pub const CANCEL_PROMPT_TITLE: &str = "Cancel Request";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessageView {
    pub sender: Sender,
    pub text: String,
    pub time: String,
}

impl From<&ChatMessage> for ChatMessageView {
    fn from(m: &ChatMessage) -> Self {
        Self {
            sender: m.sender,
            text: m.text.clone(),
            time: m.time_label(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueChoice {
    pub issue: Issue,
    pub label: String,
    pub icon: String,
}

impl From<Issue> for IssueChoice {
    fn from(issue: Issue) -> Self {
        Self {
            issue,
            label: issue.label().to_string(),
            icon: issue.icon().to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CancelView {
    pub remaining_secs: u32,
    pub time_left: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestView {
    pub id: String,
    pub issue: Issue,
    pub requester_name: String,
    pub time: String,
    /// `"<issue> - <requester> - <time>"`
    pub summary: String,
}

impl From<&Request> for RequestView {
    fn from(r: &Request) -> Self {
        let time = r.requested_at.clock_label();
        Self {
            id: r.id.to_string(),
            issue: r.issue,
            requester_name: r.requester_name.clone(),
            summary: format!("{} - {} - {}", r.issue, r.requester_name, time),
            time,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptView {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub decline_label: String,
}

impl From<&CancelPrompt> for PromptView {
    fn from(p: &CancelPrompt) -> Self {
        Self {
            title: CANCEL_PROMPT_TITLE.to_string(),
            message: p.message.clone(),
            confirm_label: "Yes".to_string(),
            decline_label: "No".to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewState {
    Starting,
    User {
        transcript: Vec<ChatMessageView>,
        /// Empty once an issue is selected.
        issue_choices: Vec<IssueChoice>,
        draft: String,
        input_enabled: bool,
        cancel: Option<CancelView>,
    },
    Admin {
        requests: Vec<RequestView>,
    },
    Ended,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub role: Role,
    pub notification: Option<String>,
    pub prompt: Option<PromptView>,
    pub state: ViewState,
}

impl ViewModel {
    #[must_use]
    pub fn from_model(model: &Model) -> Self {
        let state = match (model.phase, &model.role) {
            (SessionPhase::NotStarted, _) => ViewState::Starting,
            (SessionPhase::Ended, _) => ViewState::Ended,
            (SessionPhase::Active, RoleState::User(user)) => user_view(model, user),
            (SessionPhase::Active, RoleState::Admin(admin)) => admin_view(admin),
        };

        Self {
            role: model.role(),
            notification: model.notification_text().map(str::to_string),
            prompt: model.screen.prompt.as_ref().map(PromptView::from),
            state,
        }
    }
}

fn user_view(model: &Model, user: &UserSession) -> ViewState {
    let issue_choices = if user.selected_issue().is_some() {
        Vec::new()
    } else {
        Issue::ALL.into_iter().map(IssueChoice::from).collect()
    };

    let cancel = user.cancel_window.is_active().then(|| CancelView {
        remaining_secs: user.cancel_window.remaining_secs(),
        time_left: format_time_left(user.cancel_window.remaining_secs()),
    });

    ViewState::User {
        transcript: model.transcript().iter().map(ChatMessageView::from).collect(),
        issue_choices,
        draft: model.screen.draft.clone(),
        input_enabled: user.request_generated(),
        cancel,
    }
}

fn admin_view(admin: &AdminSession) -> ViewState {
    ViewState::Admin {
        requests: admin.requests.iter().map(RequestView::from).collect(),
    }
}
