use ecosort_core::ErrorKind;
use thiserror::Error;

/// A single failed position request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// Sensor error, or a cached fix older than the request allows.
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// Both locator tiers failed.
#[derive(Debug, Clone, Error)]
#[error("location unavailable (high accuracy: {high_accuracy}; low accuracy: {low_accuracy})")]
pub struct LocationUnavailable {
    pub high_accuracy: PositionError,
    pub low_accuracy: PositionError,
}

impl LocationUnavailable {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::LocationUnavailable
    }
}

/// Errors returned by the Overpass query client.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Network failure, TLS failure, or request timeout.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl QueryError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::QueryServiceError
    }
}
