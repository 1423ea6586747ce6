//! Distance approximation and filter prioritization.

use ecosort_core::{Coordinate, FacilityRecord, FilterRules};
use serde::Serialize;

/// Kilometers per degree used by the planar approximation.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Planar distance in kilometers between `center` and `point`.
///
/// `sqrt(Δlat² + Δlon²) × 111`, with degrees treated as a flat grid. Cheap
/// and good enough for "nearby" within tens of kilometers at mid-latitudes;
/// no antimeridian or polar handling.
#[must_use]
pub fn approx_distance_km(center: Coordinate, point: Coordinate) -> f64 {
    let d_lat = point.latitude - center.latitude;
    let d_lon = point.longitude - center.longitude;
    d_lat.hypot(d_lon) * KM_PER_DEGREE
}

/// Stable ascending sort by `distance_km`.
pub fn sort_by_distance(records: &mut [FacilityRecord]) {
    records.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
}

/// A facility in presentation order, flagged when it matches the active filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedFacility<'a> {
    #[serde(flatten)]
    pub facility: &'a FacilityRecord,
    pub recommended: bool,
}

/// Moves facilities matching `filter_type` ahead of the rest.
///
/// Stable partition over the input order: within the matching and the
/// non-matching groups the original (distance) order is kept. An absent or
/// unknown filter leaves the order untouched and recommends nothing.
#[must_use]
pub fn prioritize<'a>(
    records: &'a [FacilityRecord],
    rules: &FilterRules,
    filter_type: Option<&str>,
) -> Vec<RankedFacility<'a>> {
    let needle = rules.substring_for(filter_type);

    let mut ranked: Vec<RankedFacility<'a>> = records
        .iter()
        .map(|facility| RankedFacility {
            facility,
            recommended: needle.is_some_and(|n| facility.category_contains(n)),
        })
        .collect();

    ranked.sort_by_key(|r| std::cmp::Reverse(r.recommended));
    ranked
}
