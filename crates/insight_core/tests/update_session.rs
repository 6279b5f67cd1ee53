use std::sync::Once;

use insight_core::{update, AppState, Effect, JobStatus, Msg, SessionState, Severity};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn sample_status(in_progress: bool) -> JobStatus {
    JobStatus {
        in_progress,
        raw_count: 10,
        analyzed_count: 8,
        issue_count: 3,
        analysis_count: 1,
        last_run_at: Some("2026-08-01T10:00:00Z".to_string()),
        upstreams: Default::default(),
        sources_covered: vec!["webdev".to_string()],
    }
}

#[test]
fn initial_session_is_loading() {
    init_logging();
    let state = AppState::new();
    assert_eq!(state.session(), SessionState::Loading);
}

#[test]
fn successful_probe_authenticates_and_starts_polling() {
    init_logging();
    let state = AppState::new();
    let (mut state, effects) = update(state, Msg::SessionProbed { authenticated: true });

    assert_eq!(state.session(), SessionState::Authenticated);
    assert!(state.consume_dirty());
    assert_eq!(
        effects,
        vec![
            Effect::StartPolling,
            Effect::FetchIssues {
                subjects: Vec::new()
            },
            Effect::FetchRecommendations {
                subjects: Vec::new()
            },
        ]
    );
}

#[test]
fn failed_probe_lands_unauthenticated_without_effects() {
    init_logging();
    let state = AppState::new();
    let (mut state, effects) = update(state, Msg::SessionProbed { authenticated: false });

    assert_eq!(state.session(), SessionState::Unauthenticated);
    assert!(state.consume_dirty());
    assert!(effects.is_empty());
}

#[test]
fn login_authenticates_like_a_probe() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::SessionProbed { authenticated: false });
    let (state, effects) = update(state, Msg::LoginSucceeded);

    assert_eq!(state.session(), SessionState::Authenticated);
    assert!(effects.contains(&Effect::StartPolling));
}

#[test]
fn login_failure_surfaces_an_error_banner() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = update(
        state,
        Msg::LoginFailed {
            message: "Invalid credentials".to_string(),
        },
    );

    let notification = state.notification().expect("banner");
    assert_eq!(notification.severity, Severity::Error);
    assert_eq!(notification.message, "Invalid credentials");
    assert_eq!(effects.len(), 1);
}

#[test]
fn logout_always_clears_local_state() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::SessionProbed { authenticated: true });
    let (state, _) = update(state, Msg::StatusUpdated(sample_status(true)));
    let (state, _) = update(state, Msg::JobCompleted);
    assert!(state.notification().is_some());

    let (state, effects) = update(state, Msg::LogoutRequested);

    assert_eq!(state.session(), SessionState::Unauthenticated);
    assert!(state.status().is_none());
    assert!(state.notification().is_none());
    assert_eq!(
        effects,
        vec![Effect::EndSession, Effect::StopPolling, Effect::CancelDismiss]
    );
}

#[test]
fn logout_while_unauthenticated_is_still_safe() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::SessionProbed { authenticated: false });
    let (state, effects) = update(state, Msg::LogoutRequested);

    assert_eq!(state.session(), SessionState::Unauthenticated);
    assert!(effects.contains(&Effect::EndSession));
}
