//! Async driver that executes session effects.

use ecosort_core::{AppConfig, DEFAULT_MAX_RESULTS, DEFAULT_SEARCH_RADIUS_M};
use tokio::sync::watch;

use super::{SessionController, SessionEffect, SessionEvent};
use crate::geo::{GeoLocator, PositionProvider};
use crate::overpass::OverpassClient;

/// Runs one discovery session per call: locate, query, rank.
///
/// The two suspension points (location request and network query) each
/// race the close signal. After close, in-flight work is dropped and its
/// result never reaches the session.
#[derive(Debug)]
pub struct DiscoveryEngine<P> {
    locator: GeoLocator<P>,
    client: OverpassClient,
    radius_m: u32,
    max_results: usize,
}

impl<P: PositionProvider> DiscoveryEngine<P> {
    #[must_use]
    pub fn new(locator: GeoLocator<P>, client: OverpassClient) -> Self {
        Self {
            locator,
            client,
            radius_m: DEFAULT_SEARCH_RADIUS_M,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Engine using the radius and result cap from `config`.
    #[must_use]
    pub fn from_config(locator: GeoLocator<P>, client: OverpassClient, config: &AppConfig) -> Self {
        Self::new(locator, client)
            .with_radius(config.search_radius_m)
            .with_max_results(config.max_results)
    }

    #[must_use]
    pub fn with_radius(mut self, radius_m: u32) -> Self {
        self.radius_m = radius_m;
        self
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Opens a new session and drives it to a terminal state or until
    /// `close` turns `true`.
    ///
    /// Never fails: location and query errors are logged and recovered by
    /// the controller with the fallback catalog. Check
    /// [`SessionController::is_closed`] before rendering the result.
    pub async fn run(&self, mut close: watch::Receiver<bool>) -> SessionController {
        let mut controller = SessionController::new(self.max_results);
        let session_id = controller.session().session_id;
        tracing::info!(%session_id, radius_m = self.radius_m, "discovery session opened");

        let mut effect = controller.handle(SessionEvent::Open);
        while let Some(next) = effect {
            let event = match next {
                SessionEffect::AcquireLocation => tokio::select! {
                    result = self.locator.acquire() => match result {
                        Ok(center) => SessionEvent::LocationAcquired(center),
                        Err(err) => {
                            tracing::warn!(
                                %session_id,
                                error = %err,
                                "device location unavailable"
                            );
                            SessionEvent::LocationFailed
                        }
                    },
                    () = closed(&mut close) => SessionEvent::Close,
                },
                SessionEffect::FetchNearby(center) => tokio::select! {
                    result = self.client.fetch_nearby(center, self.radius_m) => match result {
                        Ok(records) => SessionEvent::FacilitiesFetched(records),
                        Err(err) => {
                            tracing::warn!(%session_id, error = %err, "facility query failed");
                            SessionEvent::QueryFailed
                        }
                    },
                    () = closed(&mut close) => SessionEvent::Close,
                },
            };
            effect = controller.handle(event);
        }

        debug_assert!(
            controller.is_closed() || controller.session().status.is_terminal(),
            "driver stopped before the session finished"
        );
        controller
    }
}

/// Resolves once the close flag is set. A dropped sender never closes.
async fn closed(close: &mut watch::Receiver<bool>) {
    if close.wait_for(|is_closed| *is_closed).await.is_err() {
        std::future::pending::<()>().await;
    }
}
