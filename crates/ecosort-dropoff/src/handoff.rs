//! Deep links handed to external mapping applications.

use ecosort_core::{Coordinate, FacilityRecord};
use reqwest::Url;

const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/";
const MAP_EMBED_BASE_URL: &str = "https://maps.google.com/maps";
const MAP_EMBED_ZOOM: &str = "14";

/// Driving-directions link to `facility`.
///
/// Uses the facility coordinate when present, otherwise its name and
/// address as a search destination.
#[must_use]
pub fn directions_url(facility: &FacilityRecord) -> Url {
    let destination = match facility.coordinate {
        Some(c) => format!("{},{}", c.latitude, c.longitude),
        None => format!("{} {}", facility.name, facility.address),
    };

    let mut url = Url::parse(DIRECTIONS_BASE_URL).expect("valid directions URL");
    url.query_pairs_mut()
        .append_pair("api", "1")
        .append_pair("destination", &destination)
        .append_pair("travelmode", "driving");
    url
}

/// Read-only embeddable map centered on `center`.
#[must_use]
pub fn map_embed_url(center: Coordinate) -> Url {
    let mut url = Url::parse(MAP_EMBED_BASE_URL).expect("valid map embed URL");
    url.query_pairs_mut()
        .append_pair("q", &format!("{},{}", center.latitude, center.longitude))
        .append_pair("z", MAP_EMBED_ZOOM)
        .append_pair("output", "embed")
        .append_pair("iwloc", "near");
    url
}
