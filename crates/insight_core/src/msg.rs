use crate::model::{
    FormEdit, Issue, JobRequest, JobStatus, NotificationId, RawIssue, Recommendation, SubjectGroup,
};
use crate::pipeline::{IssueFacet, RecommendationFacet, SpecChange};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Session probe finished; fail-closed mapping happened at the boundary.
    SessionProbed { authenticated: bool },
    /// Credential exchange succeeded in the login form.
    LoginSucceeded,
    /// Credential exchange failed.
    LoginFailed { message: String },
    /// Account creation succeeded.
    RegisterSucceeded,
    /// Account creation failed.
    RegisterFailed { message: String },
    /// User asked to end the session.
    LogoutRequested,
    /// A freshly accepted status snapshot.
    StatusUpdated(JobStatus),
    /// The collection job transitioned from running to finished.
    JobCompleted,
    /// Restore the persisted job-request form.
    RestoreJobRequest(JobRequest),
    /// User edited the job-request form.
    JobRequestEdited(FormEdit),
    /// User submitted the job-request form.
    JobSubmitted,
    /// Backend accepted the collection job.
    JobAccepted {
        subjects: Vec<String>,
        sources: Vec<String>,
        limit: u32,
        window: String,
    },
    /// Backend rejected the collection job.
    JobRejected { message: String },
    /// Issue groups arrived from the backend.
    IssuesLoaded(Vec<SubjectGroup<Issue>>),
    IssuesFailed { message: String },
    /// Recommendation groups arrived from the backend.
    RecommendationsLoaded(Vec<SubjectGroup<Recommendation>>),
    RecommendationsFailed { message: String },
    /// User asked for the raw extracted issues, optionally for one subject.
    RawIssuesRequested { subject: Option<String> },
    RawIssuesLoaded(Vec<RawIssue>),
    RawIssuesFailed { message: String },
    /// User changed the issue view's filter/sort settings.
    IssueSpecChanged(SpecChange<IssueFacet>),
    /// User changed the recommendation view's filter/sort settings.
    RecommendationSpecChanged(SpecChange<RecommendationFacet>),
    /// User dismissed the live notification.
    DismissRequested,
    /// A dismissal timer fired for the identified notification.
    DismissExpired { id: NotificationId },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
