use std::sync::Arc;

use client_logging::{client_info, client_warn};

use crate::api::DashboardApi;
use crate::types::{ApiError, ApiFailure};
use crate::wire::{LoginRequest, RegisterRequest};

/// Outcome of a session probe or termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionVerdict {
    Authenticated,
    Unauthenticated,
}

/// Classifies the session by probing the protected status endpoint.
///
/// Fail-closed: anything other than a successful probe, including transport
/// failures, counts as signed out.
#[derive(Clone)]
pub struct SessionGate {
    api: Arc<dyn DashboardApi>,
}

impl SessionGate {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self { api }
    }

    pub async fn probe(&self) -> SessionVerdict {
        match self.api.status().await {
            Ok(_) => SessionVerdict::Authenticated,
            Err(err) if err.kind == ApiFailure::Unauthorized => {
                client_info!("session probe: not signed in");
                SessionVerdict::Unauthenticated
            }
            Err(err) => {
                client_warn!("session probe failed, treating as signed out: {err}");
                SessionVerdict::Unauthenticated
            }
        }
    }

    /// Exchanges credentials; on success the caller may consider itself
    /// authenticated without a second probe.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        self.api
            .login(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: Option<String>,
    ) -> Result<(), ApiError> {
        self.api
            .register(&RegisterRequest {
                username: username.to_string(),
                password: password.to_string(),
                email,
            })
            .await
    }

    /// Ends the session. Local state always clears: a backend failure is
    /// logged but never keeps the caller signed in.
    pub async fn logout(&self) -> SessionVerdict {
        if let Err(err) = self.api.logout().await {
            client_warn!("backend logout failed, clearing local session anyway: {err}");
        }
        SessionVerdict::Unauthenticated
    }
}
