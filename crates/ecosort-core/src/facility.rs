use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4},{:.4}", self.latitude, self.longitude)
    }
}

/// Identifier of a facility within one result set.
///
/// Live records carry the numeric OSM node id; curated records may use
/// either form. Not stable across data sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacilityId {
    Numeric(i64),
    Text(String),
}

impl std::fmt::Display for FacilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacilityId::Numeric(id) => write!(f, "{id}"),
            FacilityId::Text(id) => f.write_str(id),
        }
    }
}

/// One disposal or recycling location, ready for rendering.
///
/// Every display field is populated: missing source data is replaced with a
/// placeholder during normalization, so consumers never branch on absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub id: FacilityId,
    pub name: String,
    pub address: String,
    /// Present for live-sourced records; curated records only have an address.
    pub coordinate: Option<Coordinate>,
    /// Approximate distance from the session's user coordinate.
    pub distance_km: f64,
    /// Free-text classification from the source, e.g. `"Hazardous / Electronics"`.
    pub category: String,
    pub opening_hours: String,
    pub phone: String,
    /// Up to four short material labels, never empty.
    pub accepted_materials: Vec<String>,
}

impl FacilityRecord {
    /// Distance rendered with one decimal place, e.g. `"1.6 km"`.
    #[must_use]
    pub fn display_distance(&self) -> String {
        format!("{:.1} km", self.distance_km)
    }

    /// Case-insensitive substring test against `category`.
    #[must_use]
    pub fn category_contains(&self, needle: &str) -> bool {
        self.category
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}
