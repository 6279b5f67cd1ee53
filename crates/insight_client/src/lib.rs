//! Insight client: REST surface, session gate, and the adaptive status poller.
mod api;
mod client;
mod handle;
mod poller;
mod session;
mod types;
mod wire;

pub use api::{DashboardApi, PainPointQuery};
pub use client::{ClientSettings, ReqwestDashboardApi};
pub use handle::{ApiHandle, ClientCommand, ClientEvent};
pub use poller::{
    Admission, ChannelStatusSink, PollerHandle, PollerSettings, SnapshotGate, StatusPoller,
    StatusSink,
};
pub use session::{SessionGate, SessionVerdict};
pub use types::{ApiError, ApiFailure, PollerEvent};
pub use wire::{
    AnalysesPayload, AnalysisPayload, LoginRequest, MessagePayload, PainPointPayload,
    PainPointsPayload, RawPainPointPayload, RecommendationPayload, RecommendationSetPayload,
    RecommendationsPayload, RegisterRequest, ScrapeAccepted, ScrapeRequest, StatusPayload,
};
