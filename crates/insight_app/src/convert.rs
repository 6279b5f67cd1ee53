//! Mapping between the wire payloads and the core's model types.

use std::collections::BTreeMap;

use insight_client::{
    AnalysesPayload, ClientEvent, PainPointsPayload, PollerEvent, RecommendationsPayload,
    ScrapeRequest, StatusPayload,
};
use insight_core::{
    Issue, JobRequest, JobStatus, Msg, RawIssue, Recommendation, SubjectGroup, UpstreamState,
};

pub fn job_status(payload: StatusPayload) -> JobStatus {
    let upstreams: BTreeMap<String, UpstreamState> = payload
        .apis
        .into_iter()
        .map(|(name, state)| {
            let state = if state.eq_ignore_ascii_case("connected") {
                UpstreamState::Connected
            } else {
                UpstreamState::Error
            };
            (name, state)
        })
        .collect();
    JobStatus {
        in_progress: payload.scrape_in_progress,
        raw_count: payload.raw_posts_count,
        analyzed_count: payload.analyzed_posts_count,
        issue_count: payload.pain_points_count,
        analysis_count: payload.openai_analyses_count,
        last_run_at: payload.last_scrape_time,
        upstreams,
        sources_covered: payload.subreddits_scraped,
    }
}

pub fn issue_groups(payload: AnalysesPayload) -> Vec<SubjectGroup<Issue>> {
    payload
        .analyses
        .into_iter()
        .map(|analysis| SubjectGroup {
            subject: analysis.product,
            summary: analysis.analysis_summary,
            generated_at: analysis.timestamp,
            items: analysis
                .common_pain_points
                .into_iter()
                .map(|point| Issue {
                    name: point.name,
                    description: point.description,
                    severity: point.severity,
                    keywords: point.related_keywords,
                    solutions: point.potential_solutions,
                })
                .collect(),
        })
        .collect()
}

pub fn recommendation_groups(payload: RecommendationsPayload) -> Vec<SubjectGroup<Recommendation>> {
    payload
        .recommendations
        .into_iter()
        .map(|set| SubjectGroup {
            subject: set.product,
            summary: set.summary,
            generated_at: set.timestamp,
            items: set
                .recommendations
                .into_iter()
                .map(|rec| Recommendation {
                    title: rec.title,
                    description: rec.description,
                    complexity: rec.complexity,
                    impact: rec.impact,
                    addresses: rec.addresses_pain_points,
                    last_seen: rec.most_recent_occurence,
                })
                .collect(),
        })
        .collect()
}

pub fn raw_issues(payload: PainPointsPayload) -> Vec<RawIssue> {
    payload
        .pain_points
        .into_iter()
        .map(|point| RawIssue {
            name: point.name,
            description: point.description,
            frequency: point.frequency,
            sentiment: point.avg_sentiment,
            mentions: point.related_posts_count,
            subject: point.product,
            score: point.severity,
        })
        .collect()
}

pub fn scrape_request(request: &JobRequest) -> ScrapeRequest {
    ScrapeRequest {
        products: request.subjects.clone(),
        limit: request.limit,
        subreddits: request.sources.clone(),
        time_filter: request.window.clone(),
        use_openai: request.use_ai,
    }
}

/// Turns a client event into the core message it stands for.
pub fn event_to_msg(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::SessionProbed { authenticated } => Msg::SessionProbed { authenticated },
        ClientEvent::LoginSucceeded => Msg::LoginSucceeded,
        ClientEvent::LoginFailed { message } => Msg::LoginFailed { message },
        ClientEvent::RegisterSucceeded => Msg::RegisterSucceeded,
        ClientEvent::RegisterFailed { message } => Msg::RegisterFailed { message },
        // Local state cleared when the logout was requested; nothing to do.
        ClientEvent::LoggedOut => Msg::NoOp,
        ClientEvent::JobAccepted(accepted) => Msg::JobAccepted {
            subjects: accepted.products,
            sources: accepted.subreddits,
            limit: accepted.limit,
            window: accepted.time_filter,
        },
        ClientEvent::JobRejected { message } => Msg::JobRejected { message },
        ClientEvent::IssuesLoaded(payload) => Msg::IssuesLoaded(issue_groups(payload)),
        ClientEvent::IssuesFailed { message } => Msg::IssuesFailed { message },
        ClientEvent::RawIssuesLoaded(payload) => Msg::RawIssuesLoaded(raw_issues(payload)),
        ClientEvent::RawIssuesFailed { message } => Msg::RawIssuesFailed { message },
        ClientEvent::RecommendationsLoaded(payload) => {
            Msg::RecommendationsLoaded(recommendation_groups(payload))
        }
        ClientEvent::RecommendationsFailed { message } => Msg::RecommendationsFailed { message },
        ClientEvent::Poller(PollerEvent::Snapshot(payload)) => {
            Msg::StatusUpdated(job_status(payload))
        }
        ClientEvent::Poller(PollerEvent::JobCompleted(_)) => Msg::JobCompleted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_client::{AnalysisPayload, PainPointPayload};

    #[test]
    fn unknown_upstream_states_map_to_error() {
        let payload = StatusPayload {
            scrape_in_progress: true,
            apis: BTreeMap::from([
                ("reddit".to_string(), "connected".to_string()),
                ("openai".to_string(), "rate_limited".to_string()),
            ]),
            ..StatusPayload::default()
        };
        let status = job_status(payload);
        assert!(status.in_progress);
        assert_eq!(status.upstreams["reddit"], UpstreamState::Connected);
        assert_eq!(status.upstreams["openai"], UpstreamState::Error);
    }

    #[test]
    fn analyses_become_subject_groups() {
        let payload = AnalysesPayload {
            analyses: vec![AnalysisPayload {
                product: "widget".to_string(),
                analysis_summary: Some("rough onboarding".to_string()),
                timestamp: Some("2025-11-02T10:00:00Z".to_string()),
                common_pain_points: vec![PainPointPayload {
                    name: "setup confusion".to_string(),
                    description: "users get lost in the wizard".to_string(),
                    severity: Some("high".to_string()),
                    related_keywords: vec!["setup".to_string()],
                    potential_solutions: None,
                }],
            }],
        };
        let groups = issue_groups(payload);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].subject, "widget");
        assert_eq!(groups[0].items[0].severity.as_deref(), Some("high"));
    }

    #[test]
    fn completion_event_maps_to_the_completion_message() {
        let event = ClientEvent::Poller(PollerEvent::JobCompleted(StatusPayload::default()));
        assert_eq!(event_to_msg(event), Msg::JobCompleted);
    }

    #[test]
    fn job_request_maps_onto_the_wire_verb_for_verb() {
        let request = JobRequest {
            subjects: vec!["widget".to_string()],
            sources: vec!["widgets".to_string()],
            limit: 50,
            window: "month".to_string(),
            use_ai: true,
        };
        let wire = scrape_request(&request);
        assert_eq!(wire.products, request.subjects);
        assert_eq!(wire.subreddits, request.sources);
        assert_eq!(wire.limit, 50);
        assert_eq!(wire.time_filter, "month");
        assert!(wire.use_openai);
    }
}
