//! Wire types for the Overpass interpreter JSON output.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level `[out:json]` response body.
///
/// `elements` is required: a body without it is treated as malformed.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<OverpassElement>,
}

/// One OSM element. Nodes carry `lat`/`lon` directly.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type", default)]
    pub element_type: Option<String>,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Open-ended OSM tags. Sorted so derived fields are deterministic.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}
