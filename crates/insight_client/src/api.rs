use crate::types::ApiError;
use crate::wire::{
    AnalysesPayload, LoginRequest, PainPointsPayload, RecommendationsPayload, RegisterRequest,
    ScrapeAccepted, ScrapeRequest, StatusPayload,
};

/// Query parameters for the raw extracted-issue listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PainPointQuery {
    pub subject: Option<String>,
    pub limit: Option<u32>,
    pub min_severity: Option<f64>,
}

/// The backend REST surface, seam for tests and alternative transports.
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    /// Fetches the job-status snapshot. Doubles as the session probe: a
    /// `401`/`403` here means the session is gone.
    async fn status(&self) -> Result<StatusPayload, ApiError>;

    /// Triggers the backend collection job. The acknowledgement echoes the
    /// accepted parameters; completion is only discovered via `status`.
    async fn trigger_job(&self, request: &ScrapeRequest) -> Result<ScrapeAccepted, ApiError>;

    /// Fetches analyzed issue groups; an empty subject list means all.
    async fn analyses(&self, subjects: &[String]) -> Result<AnalysesPayload, ApiError>;

    /// Fetches the raw extracted issues with their computed severity scores.
    async fn pain_points(&self, query: &PainPointQuery) -> Result<PainPointsPayload, ApiError>;

    /// Fetches the saved recommendation sets for the given subjects.
    async fn recommendations(&self, subjects: &[String])
        -> Result<RecommendationsPayload, ApiError>;

    /// Asks the backend to generate fresh recommendation sets.
    async fn generate_recommendations(
        &self,
        subjects: &[String],
    ) -> Result<RecommendationsPayload, ApiError>;

    async fn login(&self, request: &LoginRequest) -> Result<(), ApiError>;

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;
}
