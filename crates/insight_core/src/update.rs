use crate::effect::Effect;
use crate::model::{JobRequest, SessionState, Severity, JOB_LIMIT_MAX};
use crate::msg::Msg;
use crate::state::{AppState, JOB_ACCEPTED_TTL_MS, NOTIFICATION_TTL_MS, RAW_ISSUE_LIMIT};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SessionProbed { authenticated } => {
            if authenticated {
                state.set_session(SessionState::Authenticated);
                start_session_effects(&mut state)
            } else {
                state.set_session(SessionState::Unauthenticated);
                Vec::new()
            }
        }
        Msg::LoginSucceeded => {
            state.set_session(SessionState::Authenticated);
            start_session_effects(&mut state)
        }
        Msg::LoginFailed { message } => {
            vec![state.show_notification(message, Severity::Error, NOTIFICATION_TTL_MS)]
        }
        Msg::RegisterSucceeded => vec![state.show_notification(
            "Account created, you can now log in",
            Severity::Success,
            NOTIFICATION_TTL_MS,
        )],
        Msg::RegisterFailed { message } => {
            vec![state.show_notification(message, Severity::Error, NOTIFICATION_TTL_MS)]
        }
        Msg::LogoutRequested => {
            // Local state always clears, whatever the backend says.
            state.set_session(SessionState::Unauthenticated);
            state.clear_collections();
            state.clear_status();
            state.clear_notification();
            vec![Effect::EndSession, Effect::StopPolling, Effect::CancelDismiss]
        }
        Msg::StatusUpdated(status) => {
            state.set_status(status);
            Vec::new()
        }
        Msg::JobCompleted => {
            let dismiss = state.show_notification(
                "Collection job completed",
                Severity::Success,
                NOTIFICATION_TTL_MS,
            );
            state.begin_collection_refresh();
            vec![
                dismiss,
                Effect::FetchIssues {
                    subjects: Vec::new(),
                },
                Effect::FetchRecommendations {
                    subjects: state.job_request().subjects.clone(),
                },
            ]
        }
        Msg::RestoreJobRequest(request) => {
            state.set_job_request(request);
            Vec::new()
        }
        Msg::JobRequestEdited(edit) => {
            if state.apply_form_edit(edit) {
                vec![Effect::PersistJobRequest(state.job_request().clone())]
            } else {
                Vec::new()
            }
        }
        Msg::JobSubmitted => match validate(state.job_request()) {
            Ok(()) => vec![Effect::TriggerJob(state.job_request().clone())],
            Err(message) => {
                vec![state.show_notification(message, Severity::Error, NOTIFICATION_TTL_MS)]
            }
        },
        Msg::JobAccepted {
            subjects,
            sources,
            limit,
            window,
        } => {
            let message = format!(
                "Collection started: subjects {}; sources {}; limit {limit}; window {window}",
                subjects.join(", "),
                sources.join(", "),
            );
            let dismiss = state.show_notification(message, Severity::Info, JOB_ACCEPTED_TTL_MS);
            vec![dismiss, Effect::RearmPolling]
        }
        Msg::JobRejected { message } => {
            vec![state.show_notification(message, Severity::Error, NOTIFICATION_TTL_MS)]
        }
        Msg::IssuesLoaded(groups) => {
            state.set_issues(groups);
            Vec::new()
        }
        Msg::IssuesFailed { message } => {
            state.issues_load_failed();
            vec![state.show_notification(message, Severity::Error, NOTIFICATION_TTL_MS)]
        }
        Msg::RecommendationsLoaded(groups) => {
            state.set_recommendations(groups);
            Vec::new()
        }
        Msg::RecommendationsFailed { message } => {
            state.recommendations_load_failed();
            vec![state.show_notification(message, Severity::Error, NOTIFICATION_TTL_MS)]
        }
        Msg::RawIssuesRequested { subject } => {
            state.begin_raw_refresh();
            vec![Effect::FetchRawIssues {
                subject,
                limit: RAW_ISSUE_LIMIT,
            }]
        }
        Msg::RawIssuesLoaded(issues) => {
            state.set_raw_issues(issues);
            Vec::new()
        }
        Msg::RawIssuesFailed { message } => {
            state.raw_issues_load_failed();
            vec![state.show_notification(message, Severity::Error, NOTIFICATION_TTL_MS)]
        }
        Msg::IssueSpecChanged(change) => {
            state.apply_issue_spec(change);
            Vec::new()
        }
        Msg::RecommendationSpecChanged(change) => {
            state.apply_recommendation_spec(change);
            Vec::new()
        }
        Msg::DismissRequested => {
            state.clear_notification();
            vec![Effect::CancelDismiss]
        }
        Msg::DismissExpired { id } => {
            state.expire_notification(id);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn start_session_effects(state: &mut AppState) -> Vec<Effect> {
    state.begin_collection_refresh();
    vec![
        Effect::StartPolling,
        Effect::FetchIssues {
            subjects: Vec::new(),
        },
        Effect::FetchRecommendations {
            subjects: state.job_request().subjects.clone(),
        },
    ]
}

fn validate(request: &JobRequest) -> Result<(), String> {
    if request.subjects.is_empty() {
        return Err("At least one subject is required".to_string());
    }
    if request.sources.is_empty() {
        return Err("At least one source is required".to_string());
    }
    if request.limit == 0 || request.limit > JOB_LIMIT_MAX {
        return Err(format!("Limit must be between 1 and {JOB_LIMIT_MAX}"));
    }
    Ok(())
}
