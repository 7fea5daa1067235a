use crux_core::testing::AppTester;
use shared::view::ViewState;
use shared::{App, Effect, Event, Issue, Model, Role, TimerPurpose};

fn admin(app: &AppTester<App, Effect>) -> Model {
    let mut model = Model::default();
    app.update(
        Event::SessionStarted {
            role: "admin".into(),
            requester: Some("Jane Roe".into()),
        },
        &mut model,
    );
    model
}

#[test]
fn incoming_request_listed_and_cancelled() {
    let app = AppTester::<App, Effect>::default();
    let mut model = admin(&app);
    assert_eq!(model.role(), Role::Admin);

    let update = app.update(Event::IssueSelected { issue: Issue::AccidentFire }, &mut model);
    assert!(update.effects.iter().any(|e| matches!(e, Effect::Render(_))));
    assert!(!update.effects.iter().any(|e| matches!(e, Effect::Toast(_))));
    assert_eq!(model.screen.timers.count(&TimerPurpose::Countdown), 0);

    assert_eq!(model.requests().len(), 1);
    assert_eq!(model.requests()[0].issue, Issue::AccidentFire);
    assert_eq!(model.requests()[0].requester_name, "Jane Roe");

    let ViewState::Admin { requests } = app.view(&model).state else {
        panic!("expected admin view");
    };
    assert_eq!(requests.len(), 1);
    assert!(requests[0].summary.starts_with("Accident/Fire - Jane Roe - "));

    app.update(
        Event::CancelRequested {
            target: Some(Issue::AccidentFire),
        },
        &mut model,
    );
    app.update(Event::CancelConfirmed, &mut model);
    assert!(model.requests().is_empty());
}

#[test]
fn declined_cancel_keeps_the_entry() {
    let app = AppTester::<App, Effect>::default();
    let mut model = admin(&app);
    app.update(Event::IssueSelected { issue: Issue::Medical }, &mut model);

    app.update(
        Event::CancelRequested {
            target: Some(Issue::Medical),
        },
        &mut model,
    );
    app.update(Event::CancelDeclined, &mut model);

    assert_eq!(model.requests().len(), 1);
    assert!(app.view(&model).prompt.is_none());
}

#[test]
fn same_issue_from_two_requests_is_cancelled_together() {
    let app = AppTester::<App, Effect>::default();
    let mut model = admin(&app);
    app.update(Event::IssueSelected { issue: Issue::VehicleBreakdown }, &mut model);
    app.update(Event::IssueSelected { issue: Issue::VehicleBreakdown }, &mut model);
    app.update(Event::IssueSelected { issue: Issue::Medical }, &mut model);
    assert_eq!(model.requests().len(), 3);

    app.update(
        Event::CancelRequested {
            target: Some(Issue::VehicleBreakdown),
        },
        &mut model,
    );
    app.update(Event::CancelConfirmed, &mut model);

    assert_eq!(model.requests().len(), 1);
    assert_eq!(model.requests()[0].issue, Issue::Medical);
}
