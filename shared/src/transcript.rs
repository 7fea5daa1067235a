use serde::{Deserialize, Serialize};

use crate::model::{ChatMessage, Issue, Sender};
use crate::UnixTimeMs;

/// Ordered chat thread for one session. Append-only apart from `reset`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript(Vec<ChatMessage>);

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sender: Sender, text: impl Into<String>, sent_at: UnixTimeMs) {
        self.0.push(ChatMessage {
            sender,
            text: text.into(),
            sent_at,
        });
    }

    pub fn push_user(&mut self, text: impl Into<String>, sent_at: UnixTimeMs) {
        self.push(Sender::User, text, sent_at);
    }

    pub fn push_bot(&mut self, text: impl Into<String>, sent_at: UnixTimeMs) {
        self.push(Sender::Bot, text, sent_at);
    }

    pub fn reset(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.0.iter()
    }
}

// Fixed wording of the simulated conversation.

#[must_use]
pub fn alert_text(issue: Issue, requester: &str) -> String {
    format!("{issue} alert generated by {requester}. {requester} needs assistance.")
}

#[must_use]
pub fn bot_acknowledgement(issue: Issue) -> String {
    format!("We have received your message regarding {issue}. We will assist you shortly.")
}

#[must_use]
pub fn cancellation_text(issue: Issue) -> String {
    format!("Request for {issue} cancelled.")
}

pub const CANCELLATION_CONFIRMED: &str = "Request cancelled successfully.";

#[must_use]
pub fn request_generated_notice(issue: Issue) -> String {
    format!("{issue} EMS request generated.")
}

#[must_use]
pub fn cancel_prompt_text(issue: Issue) -> String {
    format!("Are you sure you want to cancel the request for {issue}?")
}
