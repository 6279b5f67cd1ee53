//! Serde mirrors of the backend's REST payloads.
//!
//! Every inbound field defaults when absent; the pipeline and views treat
//! missing data permissively rather than failing a whole response.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct StatusPayload {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub scrape_in_progress: bool,
    #[serde(default)]
    pub last_scrape_time: Option<String>,
    #[serde(default)]
    pub raw_posts_count: u64,
    #[serde(default)]
    pub analyzed_posts_count: u64,
    #[serde(default)]
    pub pain_points_count: u64,
    #[serde(default)]
    pub openai_analyses_count: u64,
    #[serde(default)]
    pub subreddits_scraped: Vec<String>,
    /// Upstream connection states, e.g. `reddit` / `openai` -> `connected`.
    #[serde(default)]
    pub apis: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeRequest {
    pub products: Vec<String>,
    pub limit: u32,
    pub subreddits: Vec<String>,
    pub time_filter: String,
    pub use_openai: bool,
}

/// Acknowledgement returned by the scrape trigger; completion is only ever
/// discovered through status polling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct ScrapeAccepted {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub subreddits: Vec<String>,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub time_filter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct AnalysesPayload {
    #[serde(default)]
    pub analyses: Vec<AnalysisPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct AnalysisPayload {
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub analysis_summary: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub common_pain_points: Vec<PainPointPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct PainPointPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub related_keywords: Vec<String>,
    #[serde(default)]
    pub potential_solutions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct RecommendationsPayload {
    #[serde(default)]
    pub recommendations: Vec<RecommendationSetPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct RecommendationSetPayload {
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<RecommendationPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct RecommendationPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub complexity: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub addresses_pain_points: Vec<String>,
    // Field name kept exactly as the backend spells it.
    #[serde(default)]
    pub most_recent_occurence: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct PainPointsPayload {
    #[serde(default)]
    pub pain_points: Vec<RawPainPointPayload>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// A raw extracted issue with its computed severity score.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct RawPainPointPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub frequency: u64,
    #[serde(default)]
    pub avg_sentiment: f64,
    #[serde(default)]
    pub related_posts_count: u64,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub severity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Body used when only a product list travels with the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ProductsRequest {
    pub products: Vec<String>,
}

/// Minimal shape shared by error payloads and acknowledgements.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct MessagePayload {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
