//! Curated facilities shown when live discovery is unavailable.

use ecosort_core::{Coordinate, FacilityId, FacilityRecord};

/// User coordinate substituted when the device location cannot be acquired.
pub const DEFAULT_COORDINATE: Coordinate = Coordinate::new(28.613_9, 77.209);

struct CatalogEntry {
    id: i64,
    name: &'static str,
    address: &'static str,
    distance_km: f64,
    category: &'static str,
    opening_hours: &'static str,
    phone: &'static str,
    accepted_materials: [&'static str; 4],
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: 1,
        name: "Eco-Tech Solutions (E-Waste)",
        address: "123 Green Avenue, Electronics District",
        distance_km: 1.2,
        category: "Hazardous / Electronics",
        opening_hours: "9:00 AM - 6:00 PM",
        phone: "+91 98765 43210",
        accepted_materials: ["Batteries", "Phones", "Laptops", "Circuit Boards"],
    },
    CatalogEntry {
        id: 2,
        name: "Renewable Paper Hub",
        address: "45 Industrial Estate, North Side",
        distance_km: 2.5,
        category: "Recyclables",
        opening_hours: "10:00 AM - 8:00 PM",
        phone: "+91 98765 00001",
        accepted_materials: ["Paper", "Cardboard", "Books", "Cartons"],
    },
    CatalogEntry {
        id: 3,
        name: "Smart Glass & Metal Depot",
        address: "78 Circular Road, Downtown",
        distance_km: 3.8,
        category: "Recyclables",
        opening_hours: "8:00 AM - 5:00 PM",
        phone: "+91 98765 00002",
        accepted_materials: ["Glass Bottles", "Tin Cans", "Aluminum", "Vases"],
    },
    CatalogEntry {
        id: 4,
        name: "Bio-Fertilizer Organic Center",
        address: "12 Nature Lane, South Park",
        distance_km: 4.1,
        category: "Organic / Bio-Waste",
        opening_hours: "6:00 AM - 2:00 PM",
        phone: "+91 98765 00003",
        accepted_materials: ["Food Scraps", "Peels", "Coffee Grounds", "Garden Waste"],
    },
];

/// The fallback catalog, ordered ascending by distance.
///
/// Entries have no coordinate; navigation hands off by name and address.
#[must_use]
pub fn fallback_catalog() -> Vec<FacilityRecord> {
    CATALOG
        .iter()
        .map(|entry| FacilityRecord {
            id: FacilityId::Numeric(entry.id),
            name: entry.name.to_string(),
            address: entry.address.to_string(),
            coordinate: None,
            distance_km: entry.distance_km,
            category: entry.category.to_string(),
            opening_hours: entry.opening_hours.to_string(),
            phone: entry.phone.to_string(),
            accepted_materials: entry
                .accepted_materials
                .iter()
                .map(|m| (*m).to_string())
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_has_four_entries_sorted_by_distance() {
        let catalog = fallback_catalog();
        assert_eq!(catalog.len(), 4);
        assert!(catalog
            .windows(2)
            .all(|w| w[0].distance_km <= w[1].distance_km));
    }

    #[test]
    fn catalog_covers_representative_categories() {
        let catalog = fallback_catalog();
        for needle in ["haz", "rec", "organic"] {
            assert!(
                catalog.iter().any(|r| r.category_contains(needle)),
                "no catalog entry matches {needle}"
            );
        }
        assert!(catalog
            .iter()
            .any(|r| r.accepted_materials.iter().any(|m| m == "Glass Bottles")));
    }

    #[test]
    fn catalog_entries_are_complete_and_unique() {
        let catalog = fallback_catalog();
        let ids: HashSet<_> = catalog.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), catalog.len());
        for record in &catalog {
            assert!(!record.name.is_empty());
            assert!(!record.address.is_empty());
            assert!(!record.opening_hours.is_empty());
            assert!(!record.phone.is_empty());
            assert!(!record.accepted_materials.is_empty());
            assert!(record.coordinate.is_none());
        }
    }

    #[test]
    fn default_coordinate_is_fixed() {
        assert_eq!(DEFAULT_COORDINATE, Coordinate::new(28.613_9, 77.209));
    }
}
