use crate::model::{JobRequest, JobStatus, Notification, NotificationId, SessionState, Severity, UpstreamState};

/// Snapshot of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub session: SessionState,
    pub status: Option<StatusView>,
    pub notification: Option<NotificationView>,
    pub issues: Vec<GroupView>,
    pub issues_loading: bool,
    pub recommendations: Vec<GroupView>,
    pub recommendations_loading: bool,
    pub raw_issues: Vec<RawRowView>,
    pub raw_issues_loading: bool,
    pub job_request: JobRequest,
}

/// One raw extracted issue, already ranked by severity score.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRowView {
    pub name: String,
    pub subject: Option<String>,
    pub score: f64,
    pub frequency: u64,
    pub mentions: u64,
}

/// Status-bar row derived from the latest snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub in_progress: bool,
    pub raw_count: u64,
    pub analyzed_count: u64,
    pub issue_count: u64,
    pub analysis_count: u64,
    pub last_run_at: Option<String>,
    /// Upstream name and whether it is connected.
    pub upstreams: Vec<(String, bool)>,
    pub sources_covered: Vec<String>,
}

/// The live banner, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
}

/// One subject's post-pipeline items, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    pub subject: String,
    pub summary: Option<String>,
    pub rows: Vec<ItemRowView>,
}

/// A single issue or recommendation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRowView {
    pub title: String,
    pub grade: Option<String>,
    pub description: String,
    pub keywords: Vec<String>,
}

pub(crate) fn status_view(status: &JobStatus) -> StatusView {
    StatusView {
        in_progress: status.in_progress,
        raw_count: status.raw_count,
        analyzed_count: status.analyzed_count,
        issue_count: status.issue_count,
        analysis_count: status.analysis_count,
        last_run_at: status.last_run_at.clone(),
        upstreams: status
            .upstreams
            .iter()
            .map(|(name, state)| (name.clone(), *state == UpstreamState::Connected))
            .collect(),
        sources_covered: status.sources_covered.clone(),
    }
}

pub(crate) fn notification_view(notification: &Notification) -> NotificationView {
    NotificationView {
        id: notification.id,
        message: notification.message.clone(),
        severity: notification.severity,
    }
}
