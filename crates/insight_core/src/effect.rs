use crate::model::{JobRequest, NotificationId};

/// Side effects requested by the update function, executed by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Probe the protected status endpoint to classify the session.
    ProbeSession,
    /// Start the adaptive status poller.
    StartPolling,
    /// Cancel the status poller and any pending tick.
    StopPolling,
    /// Wake the idle poller after a job trigger was accepted.
    RearmPolling,
    /// Terminate the backend session; local state is already cleared.
    EndSession,
    /// Trigger the backend collection job.
    TriggerJob(JobRequest),
    /// Fetch issue groups; an empty subject list means all subjects.
    FetchIssues { subjects: Vec<String> },
    /// Fetch the raw extracted issues, highest severity scores first.
    FetchRawIssues { subject: Option<String>, limit: u32 },
    /// Fetch recommendation groups for the given subjects.
    FetchRecommendations { subjects: Vec<String> },
    /// Arm the dismissal timer for the identified notification.
    ScheduleDismiss { id: NotificationId, ttl_ms: u64 },
    /// Cancel any pending dismissal timer.
    CancelDismiss,
    /// Persist the job-request form.
    PersistJobRequest(JobRequest),
}
