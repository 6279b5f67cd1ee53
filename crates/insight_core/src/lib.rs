//! Insight core: pure state machine, view models, and the collection pipeline.
mod effect;
mod model;
mod msg;
mod pipeline;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use model::{
    FormEdit, Issue, JobRequest, JobStatus, Notification, NotificationId, RawIssue, Recommendation,
    SessionState, Severity, SubjectGroup, UpstreamState, JOB_LIMIT_MAX,
};
pub use msg::Msg;
pub use pipeline::{
    level_rank, transform, CategoryFilter, Faceted, IssueFacet, PipelineSpec, RecommendationFacet,
    SortDirection, SortKey, SpecChange,
};
pub use state::{AppState, JOB_ACCEPTED_TTL_MS, NOTIFICATION_TTL_MS, RAW_ISSUE_LIMIT};
pub use update::update;
pub use view_model::{
    AppViewModel, GroupView, ItemRowView, NotificationView, RawRowView, StatusView,
};
