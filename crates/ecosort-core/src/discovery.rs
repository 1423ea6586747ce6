//! Per-invocation discovery session state handed to presentation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::facility::{Coordinate, FacilityRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryStatus {
    Idle,
    Loading,
    /// Terminal: facilities came from the live query.
    Ready,
    /// Terminal: facilities came from the fallback catalog.
    Degraded,
}

impl DiscoveryStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, DiscoveryStatus::Ready | DiscoveryStatus::Degraded)
    }
}

impl std::fmt::Display for DiscoveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryStatus::Idle => write!(f, "idle"),
            DiscoveryStatus::Loading => write!(f, "loading"),
            DiscoveryStatus::Ready => write!(f, "ready"),
            DiscoveryStatus::Degraded => write!(f, "degraded"),
        }
    }
}

/// Where the session's facility list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilitySource {
    Live,
    Fallback,
}

/// User-facing failure reason recorded on a session.
///
/// Raw error detail is logged, never exposed; presentation only gets the
/// kind and its [`banner`](ErrorKind::banner) text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Both locator tiers failed (permission denied, timeout, or sensor error).
    LocationUnavailable,
    /// Network failure, non-success status, or malformed body from the query service.
    QueryServiceError,
}

impl ErrorKind {
    #[must_use]
    pub fn banner(self) -> &'static str {
        match self {
            ErrorKind::LocationUnavailable => "Location timed out. Showing nearby regional hubs.",
            ErrorKind::QueryServiceError => {
                "Live recycling data unavailable. Showing nearby regional hubs."
            }
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.banner())
    }
}

/// Ephemeral state of one locate, query, rank invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverySession {
    pub session_id: Uuid,
    pub opened_at: DateTime<Utc>,
    pub status: DiscoveryStatus,
    pub user_coordinate: Option<Coordinate>,
    /// Ordered ascending by distance.
    pub facilities: Vec<FacilityRecord>,
    pub source: Option<FacilitySource>,
    pub last_error: Option<ErrorKind>,
}

impl DiscoverySession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            opened_at: Utc::now(),
            status: DiscoveryStatus::Idle,
            user_coordinate: None,
            facilities: Vec::new(),
            source: None,
            last_error: None,
        }
    }

    /// Banner text for the recorded failure, if any.
    #[must_use]
    pub fn banner(&self) -> Option<&'static str> {
        self.last_error.map(ErrorKind::banner)
    }
}

impl Default for DiscoverySession {
    fn default() -> Self {
        Self::new()
    }
}
