use std::cmp::Ordering;

use crate::effect::Effect;
use crate::model::{
    FormEdit, Issue, JobRequest, JobStatus, Notification, NotificationId, RawIssue, Recommendation,
    SessionState, Severity, SubjectGroup,
};
use crate::pipeline::{
    transform, IssueFacet, PipelineSpec, RecommendationFacet, SortDirection, SortKey, SpecChange,
};
use crate::view_model::{
    notification_view, status_view, AppViewModel, GroupView, ItemRowView, RawRowView,
};

/// Default notification lifetime, matching the web client's banner timing.
pub const NOTIFICATION_TTL_MS: u64 = 5_000;

/// Longer lifetime for the job-accepted banner, which carries the echoed
/// request parameters.
pub const JOB_ACCEPTED_TTL_MS: u64 = 8_000;

/// How many raw issues the dashboard's top list asks for.
pub const RAW_ISSUE_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    session: SessionState,
    status: Option<JobStatus>,
    notification: Option<Notification>,
    next_notification_id: NotificationId,
    issues: Vec<SubjectGroup<Issue>>,
    issues_loading: bool,
    recommendations: Vec<SubjectGroup<Recommendation>>,
    recommendations_loading: bool,
    raw_issues: Vec<RawIssue>,
    raw_issues_loading: bool,
    issue_spec: PipelineSpec<IssueFacet>,
    recommendation_spec: PipelineSpec<RecommendationFacet>,
    job_request: JobRequest,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: SessionState::Loading,
            status: None,
            notification: None,
            next_notification_id: 0,
            issues: Vec::new(),
            issues_loading: false,
            recommendations: Vec::new(),
            recommendations_loading: false,
            raw_issues: Vec::new(),
            raw_issues_loading: false,
            issue_spec: PipelineSpec::new(),
            // Recommendations default to highest impact first.
            recommendation_spec: PipelineSpec {
                sort_key: SortKey::Facet(RecommendationFacet::Impact),
                direction: SortDirection::Descending,
                ..PipelineSpec::new()
            },
            job_request: JobRequest::default(),
            dirty: false,
        }
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn status(&self) -> Option<&JobStatus> {
        self.status.as_ref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn job_request(&self) -> &JobRequest {
        &self.job_request
    }

    /// Runs both collections through their pipelines and snapshots everything
    /// a renderer needs. Pure recomputation; identical state yields an
    /// identical view.
    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session,
            status: self.status.as_ref().map(status_view),
            notification: self.notification.as_ref().map(notification_view),
            issues: issue_groups(&transform(&self.issues, &self.issue_spec)),
            issues_loading: self.issues_loading,
            recommendations: recommendation_groups(&transform(
                &self.recommendations,
                &self.recommendation_spec,
            )),
            recommendations_loading: self.recommendations_loading,
            raw_issues: raw_rows(&self.raw_issues),
            raw_issues_loading: self.raw_issues_loading,
            job_request: self.job_request.clone(),
        }
    }

    /// Returns whether a re-render is needed and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub(crate) fn set_session(&mut self, session: SessionState) {
        if self.session != session {
            self.session = session;
            self.dirty = true;
        }
    }

    pub(crate) fn set_status(&mut self, status: JobStatus) {
        self.status = Some(status);
        self.dirty = true;
    }

    pub(crate) fn clear_status(&mut self) {
        if self.status.take().is_some() {
            self.dirty = true;
        }
    }

    /// Replaces the live notification and returns the timer effect to run.
    /// The previous notification is discarded, never queued.
    pub fn show_notification(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        ttl_ms: u64,
    ) -> Effect {
        self.next_notification_id += 1;
        let id = self.next_notification_id;
        self.notification = Some(Notification {
            id,
            message: message.into(),
            severity,
            ttl_ms,
        });
        self.dirty = true;
        if ttl_ms > 0 {
            Effect::ScheduleDismiss { id, ttl_ms }
        } else {
            Effect::CancelDismiss
        }
    }

    pub(crate) fn clear_notification(&mut self) {
        if self.notification.take().is_some() {
            self.dirty = true;
        }
    }

    /// Clears the notification only if `id` still identifies it. A timer from
    /// a superseded notification can never clear its successor.
    pub(crate) fn expire_notification(&mut self, id: NotificationId) {
        if self.notification.as_ref().is_some_and(|n| n.id == id) {
            self.notification = None;
            self.dirty = true;
        }
    }

    pub(crate) fn begin_collection_refresh(&mut self) {
        self.issues_loading = true;
        self.recommendations_loading = true;
        self.dirty = true;
    }

    pub(crate) fn set_issues(&mut self, issues: Vec<SubjectGroup<Issue>>) {
        self.issues = issues;
        self.issues_loading = false;
        self.dirty = true;
    }

    pub(crate) fn issues_load_failed(&mut self) {
        self.issues_loading = false;
        self.dirty = true;
    }

    pub(crate) fn set_recommendations(&mut self, recommendations: Vec<SubjectGroup<Recommendation>>) {
        self.recommendations = recommendations;
        self.recommendations_loading = false;
        self.dirty = true;
    }

    pub(crate) fn recommendations_load_failed(&mut self) {
        self.recommendations_loading = false;
        self.dirty = true;
    }

    pub(crate) fn begin_raw_refresh(&mut self) {
        self.raw_issues_loading = true;
        self.dirty = true;
    }

    pub(crate) fn set_raw_issues(&mut self, issues: Vec<RawIssue>) {
        self.raw_issues = issues;
        self.raw_issues_loading = false;
        self.dirty = true;
    }

    pub(crate) fn raw_issues_load_failed(&mut self) {
        self.raw_issues_loading = false;
        self.dirty = true;
    }

    pub(crate) fn clear_collections(&mut self) {
        self.issues.clear();
        self.recommendations.clear();
        self.raw_issues.clear();
        self.issues_loading = false;
        self.recommendations_loading = false;
        self.raw_issues_loading = false;
        self.dirty = true;
    }

    pub(crate) fn set_job_request(&mut self, request: JobRequest) {
        self.job_request = request;
        self.dirty = true;
    }

    pub(crate) fn apply_form_edit(&mut self, edit: FormEdit) -> bool {
        let changed = self.job_request.apply(edit);
        if changed {
            self.dirty = true;
        }
        changed
    }

    pub(crate) fn apply_issue_spec(&mut self, change: SpecChange<IssueFacet>) {
        self.issue_spec.apply(change);
        self.dirty = true;
    }

    pub(crate) fn apply_recommendation_spec(&mut self, change: SpecChange<RecommendationFacet>) {
        self.recommendation_spec.apply(change);
        self.dirty = true;
    }
}

/// Highest severity scores first, matching the dashboard's top list.
fn raw_rows(issues: &[RawIssue]) -> Vec<RawRowView> {
    let mut rows: Vec<RawRowView> = issues
        .iter()
        .map(|issue| RawRowView {
            name: issue.name.clone(),
            subject: issue.subject.clone(),
            score: issue.score,
            frequency: issue.frequency,
            mentions: issue.mentions,
        })
        .collect();
    rows.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    rows
}

fn issue_groups(groups: &[SubjectGroup<Issue>]) -> Vec<GroupView> {
    groups
        .iter()
        .map(|group| GroupView {
            subject: group.subject.clone(),
            summary: group.summary.clone(),
            rows: group
                .items
                .iter()
                .map(|issue| ItemRowView {
                    title: issue.name.clone(),
                    grade: issue.severity.clone(),
                    description: issue.description.clone(),
                    keywords: issue.keywords.clone(),
                })
                .collect(),
        })
        .collect()
}

fn recommendation_groups(groups: &[SubjectGroup<Recommendation>]) -> Vec<GroupView> {
    groups
        .iter()
        .map(|group| GroupView {
            subject: group.subject.clone(),
            summary: group.summary.clone(),
            rows: group.items.iter().map(recommendation_row).collect(),
        })
        .collect()
}

fn recommendation_row(recommendation: &Recommendation) -> ItemRowView {
    let grade = match (&recommendation.impact, &recommendation.complexity) {
        (Some(impact), Some(complexity)) => Some(format!("impact {impact}, complexity {complexity}")),
        (Some(impact), None) => Some(format!("impact {impact}")),
        (None, Some(complexity)) => Some(format!("complexity {complexity}")),
        (None, None) => None,
    };
    ItemRowView {
        title: recommendation.title.clone(),
        grade,
        description: recommendation.description.clone(),
        keywords: recommendation.addresses.clone(),
    }
}
