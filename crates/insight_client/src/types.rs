use std::fmt;

use crate::wire::StatusPayload;

/// An error from the REST surface, classified for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiFailure,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// 401/403: the session is gone; never surfaced as a generic error.
    Unauthorized,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::Unauthorized => write!(f, "unauthorized"),
            ApiFailure::HttpStatus(code) => write!(f, "http status {code}"),
            ApiFailure::Timeout => write!(f, "timeout"),
            ApiFailure::Network => write!(f, "network error"),
            ApiFailure::Decode => write!(f, "malformed response body"),
        }
    }
}

/// Events emitted by the status poller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollerEvent {
    /// A snapshot newer than any previously accepted one.
    Snapshot(StatusPayload),
    /// The collection job finished: the previously accepted snapshot was in
    /// progress and this one is not.
    JobCompleted(StatusPayload),
}
