use ecosort_core::Coordinate;

/// Overpass QL selecting recycling amenity nodes within `radius_m` of `center`.
#[must_use]
pub fn recycling_amenities_query(center: Coordinate, radius_m: u32) -> String {
    format!(
        r#"[out:json];node["amenity"="recycling"](around:{radius_m},{},{});out;"#,
        center.latitude, center.longitude
    )
}
