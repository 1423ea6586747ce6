//! HTTP client for the OpenStreetMap Overpass interpreter.
//!
//! Issues one GET per call with the Overpass QL in the `data` query
//! parameter, then normalizes every returned element into a
//! [`FacilityRecord`] sorted by distance from the query center.

mod query;
pub mod types;

use std::time::Duration;

use ecosort_core::{AppConfig, Coordinate, FacilityRecord};
use reqwest::{Client, Url};

use crate::error::QueryError;
use crate::normalize::normalize_element;
use crate::ranking::sort_by_distance;

pub use query::recycling_amenities_query;
pub use types::{OverpassElement, OverpassResponse};

/// Client for the Overpass interpreter endpoint.
///
/// Use [`OverpassClient::from_config`] for the configured endpoint or
/// [`OverpassClient::with_base_url`] to point at a mirror or a mock server.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    base_url: Url,
}

impl OverpassClient {
    /// Creates a client from the endpoint, timeout and user agent in `config`.
    ///
    /// # Errors
    ///
    /// See [`OverpassClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, QueryError> {
        Self::with_base_url(
            &config.overpass_url,
            config.query_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client for the interpreter at `base_url`.
    ///
    /// `base_url` is the full interpreter endpoint, e.g.
    /// `https://overpass-api.de/api/interpreter`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`QueryError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, QueryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| QueryError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches recycling facilities within `radius_m` of `center`.
    ///
    /// Returns records sorted ascending by distance. An empty vector means
    /// the query succeeded but nothing is nearby; truncation is left to the
    /// caller.
    ///
    /// # Errors
    ///
    /// - [`QueryError::Http`] on network failure or timeout.
    /// - [`QueryError::UnexpectedStatus`] on a non-2xx response.
    /// - [`QueryError::Deserialize`] if the body is not a valid Overpass
    ///   JSON document.
    pub async fn fetch_nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<FacilityRecord>, QueryError> {
        let url = self.build_url(center, radius_m);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.base_url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| QueryError::Deserialize {
                context: format!("overpass response around {center}"),
                source: e,
            })?;

        let element_count = parsed.elements.len();
        let mut records: Vec<FacilityRecord> = parsed
            .elements
            .iter()
            .filter_map(|element| normalize_element(element, center))
            .collect();
        sort_by_distance(&mut records);

        tracing::debug!(
            %center,
            radius_m,
            element_count,
            facility_count = records.len(),
            "overpass query completed"
        );

        Ok(records)
    }

    /// Builds the interpreter URL with the percent-encoded query in `data`.
    fn build_url(&self, center: Coordinate, radius_m: u32) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("data", &recycling_amenities_query(center, radius_m));
        url
    }
}
