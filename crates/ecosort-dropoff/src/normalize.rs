//! Normalization from raw Overpass elements to [`FacilityRecord`].
//!
//! Every display field gets a placeholder when the source omits it, so the
//! records handed to ranking and presentation never have gaps.

use std::collections::BTreeMap;

use ecosort_core::{Coordinate, FacilityId, FacilityRecord};

use crate::overpass::types::OverpassElement;
use crate::ranking::approx_distance_km;

pub const DEFAULT_NAME: &str = "Recycling Point";
pub const DEFAULT_ADDRESS: &str = "Local Collection Point";
pub const DEFAULT_CATEGORY: &str = "General Recycling";
pub const DEFAULT_OPENING_HOURS: &str = "Contact for hours";
pub const DEFAULT_PHONE: &str = "Multiple locations";
pub const DEFAULT_MATERIAL: &str = "General Waste";

/// Maximum number of accepted-material labels kept per facility.
pub const MAX_ACCEPTED_MATERIALS: usize = 4;

/// Address tags tried in order before falling back to [`DEFAULT_ADDRESS`].
const ADDRESS_TAGS: &[&str] = &["addr:full", "addr:street"];

const MATERIAL_TAG_PREFIX: &str = "recycling:";

/// Normalizes one Overpass element relative to `center`.
///
/// Returns `None` for elements without a usable latitude and longitude.
#[must_use]
pub fn normalize_element(element: &OverpassElement, center: Coordinate) -> Option<FacilityRecord> {
    let (Some(latitude), Some(longitude)) = (element.lat, element.lon) else {
        tracing::debug!(
            id = element.id,
            element_type = element.element_type.as_deref().unwrap_or("unknown"),
            "skipping overpass element without coordinates"
        );
        return None;
    };
    let coordinate = Coordinate::new(latitude, longitude);
    let tags = &element.tags;

    Some(FacilityRecord {
        id: FacilityId::Numeric(element.id),
        name: first_tag(tags, &["name"]).unwrap_or(DEFAULT_NAME).to_string(),
        address: first_tag(tags, ADDRESS_TAGS)
            .unwrap_or(DEFAULT_ADDRESS)
            .to_string(),
        coordinate: Some(coordinate),
        distance_km: approx_distance_km(center, coordinate),
        category: first_tag(tags, &["recycling_type"])
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string(),
        opening_hours: first_tag(tags, &["opening_hours"])
            .unwrap_or(DEFAULT_OPENING_HOURS)
            .to_string(),
        phone: first_tag(tags, &["phone"])
            .unwrap_or(DEFAULT_PHONE)
            .to_string(),
        accepted_materials: accepted_materials(tags),
    })
}

/// Materials flagged `recycling:<material>=yes`, capitalized, at most four.
///
/// Falls back to a single [`DEFAULT_MATERIAL`] entry when none are flagged.
#[must_use]
pub fn accepted_materials(tags: &BTreeMap<String, String>) -> Vec<String> {
    let materials: Vec<String> = tags
        .iter()
        .filter(|(_, value)| value.as_str() == "yes")
        .filter_map(|(key, _)| key.strip_prefix(MATERIAL_TAG_PREFIX))
        .filter(|material| !material.is_empty())
        .map(capitalize_first)
        .take(MAX_ACCEPTED_MATERIALS)
        .collect();

    if materials.is_empty() {
        vec![DEFAULT_MATERIAL.to_string()]
    } else {
        materials
    }
}

/// First non-blank value among `keys`, trimmed.
fn first_tag<'a>(tags: &'a BTreeMap<String, String>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| tags.get(*key))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Coordinate = Coordinate::new(28.613_9, 77.209);

    fn element(tags: &[(&str, &str)]) -> OverpassElement {
        OverpassElement {
            element_type: Some("node".to_string()),
            id: 4_242,
            lat: Some(28.623_9),
            lon: Some(77.219),
            tags: tags
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    #[test]
    fn fully_tagged_element_keeps_source_values() {
        let el = element(&[
            ("name", "Eco-Tech Solutions"),
            ("addr:full", "123 Green Avenue"),
            ("addr:street", "Green Avenue"),
            ("recycling_type", "centre"),
            ("opening_hours", "Mo-Sa 09:00-18:00"),
            ("phone", "+91 98765 43210"),
            ("recycling:batteries", "yes"),
        ]);

        let rec = normalize_element(&el, CENTER).expect("element has coordinates");

        assert_eq!(rec.id, FacilityId::Numeric(4_242));
        assert_eq!(rec.name, "Eco-Tech Solutions");
        assert_eq!(rec.address, "123 Green Avenue");
        assert_eq!(rec.category, "centre");
        assert_eq!(rec.opening_hours, "Mo-Sa 09:00-18:00");
        assert_eq!(rec.phone, "+91 98765 43210");
        assert_eq!(rec.accepted_materials, vec!["Batteries"]);
        assert_eq!(rec.coordinate, Some(Coordinate::new(28.623_9, 77.219)));
    }

    #[test]
    fn untagged_element_gets_every_placeholder() {
        let rec = normalize_element(&element(&[]), CENTER).unwrap();

        assert_eq!(rec.name, DEFAULT_NAME);
        assert_eq!(rec.address, DEFAULT_ADDRESS);
        assert_eq!(rec.category, DEFAULT_CATEGORY);
        assert_eq!(rec.opening_hours, DEFAULT_OPENING_HOURS);
        assert_eq!(rec.phone, DEFAULT_PHONE);
        assert_eq!(rec.accepted_materials, vec![DEFAULT_MATERIAL]);
    }

    #[test]
    fn blank_values_count_as_missing() {
        let rec = normalize_element(&element(&[("name", "   "), ("phone", "")]), CENTER).unwrap();
        assert_eq!(rec.name, DEFAULT_NAME);
        assert_eq!(rec.phone, DEFAULT_PHONE);
    }

    #[test]
    fn address_falls_back_to_street() {
        let rec = normalize_element(&element(&[("addr:street", "Circular Road")]), CENTER).unwrap();
        assert_eq!(rec.address, "Circular Road");
    }

    #[test]
    fn distance_uses_planar_approximation() {
        let rec = normalize_element(&element(&[]), CENTER).unwrap();
        assert!(
            (rec.distance_km - 1.569_8).abs() < 1e-3,
            "got {}",
            rec.distance_km
        );
    }

    #[test]
    fn element_without_coordinates_is_skipped() {
        let mut el = element(&[("name", "Way without center")]);
        el.lat = None;
        assert!(normalize_element(&el, CENTER).is_none());
    }

    #[test]
    fn accepted_materials_caps_at_four_and_capitalizes() {
        let el = element(&[
            ("recycling:batteries", "yes"),
            ("recycling:cans", "yes"),
            ("recycling:glass", "yes"),
            ("recycling:paper", "yes"),
            ("recycling:plastic", "yes"),
        ]);
        assert_eq!(
            accepted_materials(&el.tags),
            vec!["Batteries", "Cans", "Glass", "Paper"]
        );
    }

    #[test]
    fn accepted_materials_ignores_non_yes_values() {
        let el = element(&[
            ("recycling:clothes", "no"),
            ("recycling:glass_bottles", "yes"),
            ("recycling_type", "container"),
            ("amenity", "recycling"),
        ]);
        assert_eq!(accepted_materials(&el.tags), vec!["Glass_bottles"]);
    }

    #[test]
    fn accepted_materials_defaults_when_none_flagged() {
        let el = element(&[("recycling:paper", "no")]);
        assert_eq!(accepted_materials(&el.tags), vec![DEFAULT_MATERIAL]);
    }
}
