use std::sync::Once;

use insight_core::{update, AppState, Effect, Msg, Severity};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

#[test]
fn show_replaces_the_previous_banner() {
    init_logging();
    let mut state = AppState::new();

    let first = state.show_notification("A", Severity::Info, 1_000);
    assert_eq!(
        first,
        Effect::ScheduleDismiss {
            id: 1,
            ttl_ms: 1_000
        }
    );

    let second = state.show_notification("B", Severity::Error, 2_000);
    assert_eq!(
        second,
        Effect::ScheduleDismiss {
            id: 2,
            ttl_ms: 2_000
        }
    );

    let banner = state.notification().expect("banner");
    assert_eq!(banner.message, "B");
    assert_eq!(banner.severity, Severity::Error);
}

#[test]
fn zero_ttl_persists_and_cancels_the_old_timer() {
    init_logging();
    let mut state = AppState::new();
    state.show_notification("A", Severity::Info, 1_000);

    // The replacement wants the old timer gone, not rescheduled.
    let effect = state.show_notification("B", Severity::Error, 0);
    assert_eq!(effect, Effect::CancelDismiss);

    // A's timer fires anyway (it raced the cancellation): ignored, B stays.
    let (state, effects) = update(state, Msg::DismissExpired { id: 1 });
    assert!(effects.is_empty());
    assert_eq!(state.notification().expect("banner").message, "B");
}

#[test]
fn matching_expiry_clears_the_banner() {
    init_logging();
    let mut state = AppState::new();
    let effect = state.show_notification("gone soon", Severity::Success, 500);
    let Effect::ScheduleDismiss { id, .. } = effect else {
        panic!("expected a dismissal timer");
    };

    let (state, effects) = update(state, Msg::DismissExpired { id });
    assert!(state.notification().is_none());
    assert!(effects.is_empty());
}

#[test]
fn explicit_dismiss_clears_and_cancels() {
    init_logging();
    let mut state = AppState::new();
    state.show_notification("stuck", Severity::Error, 0);

    let (state, effects) = update(state, Msg::DismissRequested);
    assert!(state.notification().is_none());
    assert_eq!(effects, vec![Effect::CancelDismiss]);
}

#[test]
fn expiry_for_an_unknown_id_is_a_noop() {
    init_logging();
    let state = AppState::new();
    let (mut state, effects) = update(state, Msg::DismissExpired { id: 99 });
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn notification_ids_are_monotonic() {
    init_logging();
    let mut state = AppState::new();
    let a = state.show_notification("a", Severity::Info, 100);
    let b = state.show_notification("b", Severity::Info, 100);
    let (Effect::ScheduleDismiss { id: id_a, .. }, Effect::ScheduleDismiss { id: id_b, .. }) =
        (a, b)
    else {
        panic!("expected dismissal timers");
    };
    assert!(id_b > id_a);
}
