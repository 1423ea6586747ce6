//! Drop-off discovery engine.
//!
//! Turns a possibly-denied device location into a ranked list of nearby
//! recycling facilities from the Overpass API, substituting a curated
//! fallback catalog whenever location or network acquisition fails.

pub mod error;
pub mod fallback;
pub mod geo;
pub mod handoff;
pub mod normalize;
pub mod overpass;
pub mod ranking;
pub mod session;

pub use error::{LocationUnavailable, PositionError, QueryError};
pub use fallback::{fallback_catalog, DEFAULT_COORDINATE};
pub use geo::{
    DeniedPositionProvider, FixedPositionProvider, GeoLocator, Position, PositionOptions,
    PositionProvider,
};
pub use handoff::{directions_url, map_embed_url};
pub use overpass::OverpassClient;
pub use ranking::{approx_distance_km, prioritize, sort_by_distance, RankedFacility};
pub use session::{DiscoveryEngine, SessionController, SessionEffect, SessionEvent};
