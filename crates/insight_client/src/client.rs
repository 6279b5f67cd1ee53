use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::api::{DashboardApi, PainPointQuery};
use crate::types::{ApiError, ApiFailure};
use crate::wire::{
    AnalysesPayload, LoginRequest, MessagePayload, PainPointsPayload, ProductsRequest,
    RecommendationsPayload, RegisterRequest, ScrapeAccepted, ScrapeRequest, StatusPayload,
};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// `reqwest`-backed REST client. Credentials travel in the shared cookie
/// store; the client itself never reads or stores a token.
#[derive(Debug, Clone)]
pub struct ReqwestDashboardApi {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestDashboardApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(ApiFailure::Network, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .cookie_store(true)
            .build()
            .map_err(|err| ApiError::new(ApiFailure::Network, err.to_string()))?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::new(ApiFailure::Network, err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        decode_response(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_response(response).await
    }
}

#[async_trait::async_trait]
impl DashboardApi for ReqwestDashboardApi {
    async fn status(&self) -> Result<StatusPayload, ApiError> {
        self.get_json(self.endpoint("/status")?).await
    }

    async fn trigger_job(&self, request: &ScrapeRequest) -> Result<ScrapeAccepted, ApiError> {
        self.post_json(self.endpoint("/scrape")?, request).await
    }

    async fn analyses(&self, subjects: &[String]) -> Result<AnalysesPayload, ApiError> {
        let mut url = self.endpoint("/openai-analysis")?;
        if !subjects.is_empty() {
            url.query_pairs_mut()
                .append_pair("products", &subjects.join(","));
        }
        self.get_json(url).await
    }

    async fn pain_points(&self, query: &PainPointQuery) -> Result<PainPointsPayload, ApiError> {
        let mut url = self.endpoint("/pain-points")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(subject) = &query.subject {
                pairs.append_pair("product", subject);
            }
            if let Some(limit) = query.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
            if let Some(min_severity) = query.min_severity {
                pairs.append_pair("min_severity", &min_severity.to_string());
            }
        }
        self.get_json(url).await
    }

    async fn recommendations(
        &self,
        subjects: &[String],
    ) -> Result<RecommendationsPayload, ApiError> {
        let mut url = self.endpoint("/recommendations")?;
        if !subjects.is_empty() {
            url.query_pairs_mut()
                .append_pair("products", &subjects.join(","));
        }
        self.get_json(url).await
    }

    async fn generate_recommendations(
        &self,
        subjects: &[String],
    ) -> Result<RecommendationsPayload, ApiError> {
        let body = ProductsRequest {
            products: subjects.to_vec(),
        };
        self.post_json(self.endpoint("/recommendations")?, &body).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        let _: MessagePayload = self.post_json(self.endpoint("/login")?, request).await?;
        Ok(())
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let _: MessagePayload = self.post_json(self.endpoint("/register")?, request).await?;
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint("/logout")?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let _: MessagePayload = decode_response(response).await?;
        Ok(())
    }
}

async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.as_u16() == 401 || status.as_u16() == 403 {
        return Err(ApiError::new(ApiFailure::Unauthorized, "session required"));
    }
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    if !status.is_success() {
        // Error bodies carry `{ message }` when the backend has one to give.
        let message = serde_json::from_slice::<MessagePayload>(&bytes)
            .ok()
            .and_then(|payload| payload.message)
            .unwrap_or_else(|| status.to_string());
        return Err(ApiError::new(ApiFailure::HttpStatus(status.as_u16()), message));
    }
    serde_json::from_slice(&bytes).map_err(|err| ApiError::new(ApiFailure::Decode, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailure::Timeout, err.to_string());
    }
    ApiError::new(ApiFailure::Network, err.to_string())
}
