//! The session state machine.
//!
//! `reduce` is the only entry point: it applies one event to the model and
//! returns the side effects the shell has to carry out. Everything it needs
//! from the outside world arrives in [`Inputs`], so the same model, event and
//! inputs always give the same result. Role-specific
//! behaviour lives behind [`RoleHandler`], implemented once for the user view
//! and once for the admin view.

use tracing::{debug, info, instrument};

use crate::command::Command;
use crate::countdown::Tick;
use crate::event::Event;
use crate::model::{
    AdminSession, CancelPrompt, Issue, Model, Request, RequestId, Role, RoleState, Screen,
    SessionPhase, UserSession,
};
use crate::notification::Notification;
use crate::timers::{TimerId, TimerPurpose};
use crate::transcript::{
    alert_text, bot_acknowledgement, cancel_prompt_text, cancellation_text,
    request_generated_notice, CANCELLATION_CONFIRMED,
};
use crate::{SessionError, SessionResult, UnixTimeMs};

/// Wall clock and id source for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub now: UnixTimeMs,
    /// Used only if the event lists a new request.
    pub request_id: RequestId,
}

impl Inputs {
    #[must_use]
    pub fn new(now: UnixTimeMs, request_id: RequestId) -> Self {
        Self { now, request_id }
    }
}

/// Applies `event` with the clock and id in `inputs`.
///
/// An ignored event leaves the model untouched and yields no commands. Any
/// accepted event ends with a single `Command::Render`.
#[instrument(
    skip_all,
    fields(
        event = event.name(),
        user_initiated = event.is_user_initiated(),
        role = model.role().as_str()
    )
)]
pub fn reduce(model: &mut Model, event: Event, inputs: Inputs) -> Vec<Command> {
    if event == Event::Noop {
        return Vec::new();
    }

    let mut commands = Vec::new();
    match apply(model, event, inputs, &mut commands) {
        Ok(()) => {
            commands.push(Command::Render);
            commands
        }
        Err(reason) => {
            debug!(%reason, "event ignored");
            Vec::new()
        }
    }
}

fn apply(
    model: &mut Model,
    event: Event,
    inputs: Inputs,
    commands: &mut Vec<Command>,
) -> SessionResult<()> {
    let Inputs { now, request_id } = inputs;
    let event = match event {
        Event::SessionStarted { role, requester } => return start(model, &role, requester),
        other => other,
    };
    if !model.is_active() {
        return Err(SessionError::NotActive);
    }

    let Model { phase, role, screen } = model;

    match event {
        Event::Noop | Event::SessionStarted { .. } => Ok(()),

        Event::SessionEnded => {
            end(role, screen, commands);
            *phase = SessionPhase::Ended;
            info!("session ended");
            Ok(())
        }

        Event::IssueSelected { issue } => {
            let requester = screen.config.requester_name.clone();
            let request = Request::new(request_id, issue, requester, now);
            handler(role).select_issue(screen, request, commands)
        }

        Event::CancelRequested { target } => {
            let issue = handler(role).cancel_target(target)?;
            screen.prompt = Some(CancelPrompt {
                issue,
                message: cancel_prompt_text(issue),
            });
            Ok(())
        }

        Event::CancelConfirmed => {
            let prompt = screen.prompt.take().ok_or(SessionError::NoPendingConfirmation)?;
            // The prompt is gone either way; a rejected confirmation only closes it.
            if let Err(reason) = handler(role).confirm_cancel(screen, prompt.issue, now, commands) {
                debug!(%reason, "cancellation not applied");
            }
            Ok(())
        }

        Event::CancelDeclined => {
            screen.prompt.take().ok_or(SessionError::NoPendingConfirmation)?;
            Ok(())
        }

        Event::DraftChanged { text } => {
            screen.draft = text;
            Ok(())
        }

        Event::SendMessage => {
            if screen.draft.trim().is_empty() {
                return Err(SessionError::EmptyMessage);
            }
            let text = std::mem::take(&mut screen.draft);
            screen.transcript.push_user(text, now);
            if let Some(issue) = handler(role).reply_issue() {
                screen.schedule_bot_reply(bot_acknowledgement(issue), commands);
            }
            Ok(())
        }

        Event::DismissNotification => {
            if screen.notification.current().is_none() {
                return Err(SessionError::NoNotification);
            }
            if let Some(lease) = screen.notification.dismiss() {
                screen.release_timer(lease, commands);
            }
            Ok(())
        }

        Event::TimerFired { id } => timer_fired(role, screen, id, now, commands),
    }
}

fn start(model: &mut Model, role_param: &str, requester: Option<String>) -> SessionResult<()> {
    if model.phase != SessionPhase::NotStarted {
        return Err(SessionError::AlreadyStarted);
    }
    if let Some(name) = requester.filter(|n| !n.trim().is_empty()) {
        model.screen.config.requester_name = name;
    }
    let role = Role::from_route_param(role_param);
    model.role = RoleState::for_role(role, &model.screen.config);
    model.phase = SessionPhase::Active;
    info!(role = role.as_str(), "session started");
    Ok(())
}

/// Teardown: every outstanding lease is cancelled so no callback can land on
/// a dead session.
fn end(role: &mut RoleState, screen: &mut Screen, commands: &mut Vec<Command>) {
    if let RoleState::User(user) = role {
        user.cancel_window.stop();
    }
    screen.notification.dismiss();
    screen.prompt = None;
    for id in screen.timers.release_all() {
        commands.push(Command::CancelTimer { id });
    }
}

fn timer_fired(
    role: &mut RoleState,
    screen: &mut Screen,
    id: TimerId,
    now: UnixTimeMs,
    commands: &mut Vec<Command>,
) -> SessionResult<()> {
    let purpose = screen
        .timers
        .get(id)
        .cloned()
        .ok_or(SessionError::StaleTimer(id))?;
    debug!(%id, purpose = purpose.name(), "timer fired");

    match purpose {
        TimerPurpose::Countdown => {
            let RoleState::User(user) = role else {
                screen.timers.release(id);
                return Ok(());
            };
            match user.cancel_window.tick() {
                Tick::Running { .. } => {
                    commands.push(Command::StartTimer {
                        id,
                        after_ms: screen.config.countdown_tick_ms,
                    });
                }
                Tick::Expired { lease } => {
                    screen.timers.release(lease.unwrap_or(id));
                    info!("cancel window expired");
                }
                Tick::Inactive => {
                    screen.timers.release(id);
                }
            }
        }
        TimerPurpose::NotificationDismiss => {
            screen.timers.release(id);
            screen.notification.expire(id);
        }
        TimerPurpose::BotReply { text } => {
            screen.timers.release(id);
            screen.transcript.push_bot(text, now);
        }
    }
    Ok(())
}

fn handler(role: &mut RoleState) -> &mut dyn RoleHandler {
    match role {
        RoleState::User(user) => user,
        RoleState::Admin(admin) => admin,
    }
}

impl Screen {
    /// Shows `text` in the banner and the platform toast. Any earlier
    /// dismissal schedule is cancelled; the new one gets the full duration.
    fn show_notification(&mut self, text: String, commands: &mut Vec<Command>) {
        let after_ms = self.config.notification_duration_ms;
        let lease = self.timers.acquire(TimerPurpose::NotificationDismiss);
        let notification = Notification { text: text.clone() };
        if let Some(previous) = self.notification.show(notification, lease) {
            self.release_timer(previous, commands);
        }
        commands.push(Command::Toast { message: text });
        commands.push(Command::StartTimer { id: lease, after_ms });
    }

    fn schedule_bot_reply(&mut self, text: String, commands: &mut Vec<Command>) {
        let id = self.timers.acquire(TimerPurpose::BotReply { text });
        commands.push(Command::StartTimer {
            id,
            after_ms: self.config.bot_reply_delay_ms,
        });
    }

    fn release_timer(&mut self, id: TimerId, commands: &mut Vec<Command>) {
        if self.timers.release(id).is_some() {
            commands.push(Command::CancelTimer { id });
        }
    }
}

/// Behaviour that differs between the user and the admin view.
///
/// Implementations validate before mutating: an `Err` means nothing changed.
pub trait RoleHandler {
    /// `request` is already stamped with the requester, time and id.
    fn select_issue(
        &mut self,
        screen: &mut Screen,
        request: Request,
        commands: &mut Vec<Command>,
    ) -> SessionResult<()>;

    /// Which issue a cancellation prompt should be raised for.
    fn cancel_target(&self, requested: Option<Issue>) -> SessionResult<Issue>;

    fn confirm_cancel(
        &mut self,
        screen: &mut Screen,
        issue: Issue,
        now: UnixTimeMs,
        commands: &mut Vec<Command>,
    ) -> SessionResult<()>;

    /// Issue the bot should answer about when the user types a message.
    fn reply_issue(&self) -> Option<Issue>;
}

impl RoleHandler for UserSession {
    fn select_issue(
        &mut self,
        screen: &mut Screen,
        request: Request,
        commands: &mut Vec<Command>,
    ) -> SessionResult<()> {
        if let Some(current) = self.selected_issue() {
            return Err(SessionError::IssueAlreadySelected(current));
        }

        let (issue, now) = (request.issue, request.requested_at);
        screen
            .transcript
            .push_user(alert_text(issue, &request.requester_name), now);
        self.pending = Some(request);

        let lease = screen.timers.acquire(TimerPurpose::Countdown);
        if let Some(previous) = self.cancel_window.start(lease) {
            screen.release_timer(previous, commands);
        }
        commands.push(Command::StartTimer {
            id: lease,
            after_ms: screen.config.countdown_tick_ms,
        });

        screen.show_notification(request_generated_notice(issue), commands);
        screen.schedule_bot_reply(bot_acknowledgement(issue), commands);

        info!(%issue, "emergency request generated");
        Ok(())
    }

    fn cancel_target(&self, _requested: Option<Issue>) -> SessionResult<Issue> {
        let issue = self.selected_issue().ok_or(SessionError::NoActiveRequest)?;
        if !self.cancel_window.is_active() {
            return Err(SessionError::CancelWindowClosed);
        }
        Ok(issue)
    }

    fn confirm_cancel(
        &mut self,
        screen: &mut Screen,
        issue: Issue,
        now: UnixTimeMs,
        commands: &mut Vec<Command>,
    ) -> SessionResult<()> {
        if self.pending.is_none() {
            return Err(SessionError::NoActiveRequest);
        }

        screen.transcript.push_user(cancellation_text(issue), now);
        screen.transcript.push_bot(CANCELLATION_CONFIRMED, now);
        self.pending = None;
        if let Some(lease) = self.cancel_window.stop() {
            screen.release_timer(lease, commands);
        }
        screen.show_notification(CANCELLATION_CONFIRMED.to_string(), commands);

        info!(%issue, "emergency request cancelled");
        Ok(())
    }

    fn reply_issue(&self) -> Option<Issue> {
        self.selected_issue()
    }
}

impl RoleHandler for AdminSession {
    fn select_issue(
        &mut self,
        screen: &mut Screen,
        request: Request,
        commands: &mut Vec<Command>,
    ) -> SessionResult<()> {
        let issue = request.issue;
        screen
            .transcript
            .push_user(alert_text(issue, &request.requester_name), request.requested_at);
        self.requests.push(request);
        self.selected_issue = Some(issue);
        screen.schedule_bot_reply(bot_acknowledgement(issue), commands);

        info!(%issue, pending = self.requests.len(), "incoming request listed");
        Ok(())
    }

    fn cancel_target(&self, requested: Option<Issue>) -> SessionResult<Issue> {
        let issue = requested
            .or(self.selected_issue)
            .ok_or(SessionError::NoActiveRequest)?;
        if !self.requests.iter().any(|r| r.issue == issue) {
            return Err(SessionError::NoMatchingRequest(issue));
        }
        Ok(issue)
    }

    /// Removes every listed request for `issue`. Entries carry no requester
    /// identity for cancellation, so equal issues from different people go
    /// together.
    fn confirm_cancel(
        &mut self,
        screen: &mut Screen,
        issue: Issue,
        now: UnixTimeMs,
        _commands: &mut Vec<Command>,
    ) -> SessionResult<()> {
        let before = self.requests.len();
        if !self.requests.iter().any(|r| r.issue == issue) {
            return Err(SessionError::NoMatchingRequest(issue));
        }
        self.requests.retain(|r| r.issue != issue);

        screen.transcript.push_user(cancellation_text(issue), now);
        screen.transcript.push_bot(CANCELLATION_CONFIRMED, now);

        info!(%issue, removed = before - self.requests.len(), "listed request cancelled");
        Ok(())
    }

    fn reply_issue(&self) -> Option<Issue> {
        None
    }
}
