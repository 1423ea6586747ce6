//! Discovery session state machine.
//!
//! [`SessionController`] owns one [`DiscoverySession`] and advances it on
//! messages. Handling a message never performs I/O: it returns the next
//! [`SessionEffect`] for a driver to execute (see [`DiscoveryEngine`]), so the
//! transitions are testable on their own.
//!
//! ```text
//! idle --Open--> loading --LocationAcquired--> loading --FacilitiesFetched--> ready
//!                   |                             |
//!                   +--LocationFailed--> degraded +--QueryFailed / zero results--> degraded
//! ```

mod engine;

use ecosort_core::{
    Coordinate, DiscoverySession, DiscoveryStatus, ErrorKind, FacilityRecord, FacilitySource,
    FilterRules, DEFAULT_MAX_RESULTS,
};

use crate::fallback::{fallback_catalog, DEFAULT_COORDINATE};
use crate::ranking::{prioritize, sort_by_distance, RankedFacility};

pub use engine::DiscoveryEngine;

/// Messages that drive a session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Open,
    LocationAcquired(Coordinate),
    LocationFailed,
    FacilitiesFetched(Vec<FacilityRecord>),
    QueryFailed,
    Close,
}

impl SessionEvent {
    fn name(&self) -> &'static str {
        match self {
            SessionEvent::Open => "open",
            SessionEvent::LocationAcquired(_) => "location_acquired",
            SessionEvent::LocationFailed => "location_failed",
            SessionEvent::FacilitiesFetched(_) => "facilities_fetched",
            SessionEvent::QueryFailed => "query_failed",
            SessionEvent::Close => "close",
        }
    }
}

/// Work the driver must perform next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEffect {
    AcquireLocation,
    FetchNearby(Coordinate),
}

#[derive(Debug)]
pub struct SessionController {
    session: DiscoverySession,
    max_results: usize,
    closed: bool,
}

impl SessionController {
    #[must_use]
    pub fn new(max_results: usize) -> Self {
        Self {
            session: DiscoverySession::new(),
            max_results: max_results.max(1),
            closed: false,
        }
    }

    #[must_use]
    pub fn session(&self) -> &DiscoverySession {
        &self.session
    }

    /// Whether the view was closed; a closed session never changes again.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Applies `event` and returns the next effect, if any.
    ///
    /// Events that do not fit the current state (late results after close,
    /// a second `Open`, results after a terminal state) are dropped without
    /// touching the session.
    pub fn handle(&mut self, event: SessionEvent) -> Option<SessionEffect> {
        let session_id = self.session.session_id;
        if self.closed {
            tracing::debug!(%session_id, event = event.name(), "session closed; discarding event");
            return None;
        }

        let status = self.session.status;
        let located = self.session.user_coordinate.is_some();

        match (status, event) {
            (_, SessionEvent::Close) => {
                self.closed = true;
                tracing::debug!(%session_id, %status, "session closed");
                None
            }
            (DiscoveryStatus::Idle, SessionEvent::Open) => {
                self.session.status = DiscoveryStatus::Loading;
                Some(SessionEffect::AcquireLocation)
            }
            (DiscoveryStatus::Loading, SessionEvent::LocationAcquired(center)) if !located => {
                self.session.user_coordinate = Some(center);
                Some(SessionEffect::FetchNearby(center))
            }
            (DiscoveryStatus::Loading, SessionEvent::LocationFailed) if !located => {
                self.session.user_coordinate = Some(DEFAULT_COORDINATE);
                self.degrade(Some(ErrorKind::LocationUnavailable));
                None
            }
            (DiscoveryStatus::Loading, SessionEvent::FacilitiesFetched(records)) if located => {
                if records.is_empty() {
                    tracing::info!(
                        %session_id,
                        "no live facilities nearby; using fallback catalog"
                    );
                    self.degrade(None);
                } else {
                    self.complete_live(records);
                }
                None
            }
            (DiscoveryStatus::Loading, SessionEvent::QueryFailed) if located => {
                self.degrade(Some(ErrorKind::QueryServiceError));
                None
            }
            (status, event) => {
                tracing::warn!(
                    %session_id,
                    %status,
                    event = event.name(),
                    "ignoring event not valid in current state"
                );
                None
            }
        }
    }

    /// Facilities in presentation order for `filter_type`.
    ///
    /// A pure view over the stored distance-ordered list; calling it with a
    /// different filter does not re-run acquisition or the query.
    #[must_use]
    pub fn ranked<'a>(
        &'a self,
        rules: &FilterRules,
        filter_type: Option<&str>,
    ) -> Vec<RankedFacility<'a>> {
        prioritize(&self.session.facilities, rules, filter_type)
    }

    fn complete_live(&mut self, mut records: Vec<FacilityRecord>) {
        sort_by_distance(&mut records);
        records.truncate(self.max_results);

        self.session.facilities = records;
        self.session.source = Some(FacilitySource::Live);
        self.session.status = DiscoveryStatus::Ready;
        tracing::info!(
            session_id = %self.session.session_id,
            count = self.session.facilities.len(),
            "discovery session ready"
        );
    }

    /// Swaps in the fallback catalog.
    ///
    /// `user_coordinate` is left as is: after a query failure the map stays
    /// centered on the real user while the list shows the regional hubs.
    fn degrade(&mut self, reason: Option<ErrorKind>) {
        self.session.facilities = fallback_catalog();
        self.session.source = Some(FacilitySource::Fallback);
        self.session.last_error = reason;
        self.session.status = DiscoveryStatus::Degraded;
        tracing::info!(
            session_id = %self.session.session_id,
            reason = ?reason,
            "discovery session degraded to fallback catalog"
        );
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESULTS)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
