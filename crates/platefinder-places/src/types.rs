//! Wire types for the places search and details endpoints, and the typed
//! records the pipeline produces from them.
//!
//! ## Observed response shapes
//!
//! ### Search (`nearbysearch/json`)
//! The envelope carries a `status` string; `"OK"` and `"ZERO_RESULTS"` are
//! the two success statuses. `results` may be absent on error responses and
//! `next_page_token` is only present when more pages exist. Individual
//! results routinely omit `rating`/`user_ratings_total` (unrated places),
//! `price_level`, `photos`, and `opening_hours` — every field below that the
//! upstream may omit is `#[serde(default)]`.
//!
//! ### Details (`details/json`)
//! Same envelope shape with a single `result` object instead of `results`.
//! Even with an explicit `fields` parameter the upstream omits any field it
//! has no data for, so the detail payload is optional throughout and merged
//! field-by-field against the originating search result.

use serde::{Deserialize, Serialize};

use platefinder_core::Coordinate;

/// Top-level response from the nearby search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<RawSearchResult>,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// One raw record from a search page, prior to validation.
#[derive(Debug, Deserialize)]
pub struct RawSearchResult {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Short, neighborhood-level address.
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    /// 0 (free) to 4 (very expensive).
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub photos: Vec<RawPhoto>,
    #[serde(default)]
    pub opening_hours: Option<RawOpeningHours>,
}

#[derive(Debug, Deserialize)]
pub struct RawGeometry {
    pub location: RawLatLng,
}

#[derive(Debug, Deserialize)]
pub struct RawLatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct RawPhoto {
    #[serde(default)]
    pub photo_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawOpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
}

/// Top-level response from the place details endpoint.
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<RawPlaceDetail>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Detail payload for one place. All fields optional; the enricher falls
/// back to the originating [`Candidate`] for anything missing here.
#[derive(Debug, Deserialize)]
pub struct RawPlaceDetail {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
    #[serde(default)]
    pub photos: Vec<RawPhoto>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub opening_hours: Option<RawOpeningHours>,
}

/// A validated search result awaiting ranking and enrichment.
///
/// `place_id` is the upstream-stable identity used for cross-page
/// deduplication and for the detail lookup. Never mutated after creation;
/// enrichment builds a new [`Place`] instead.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub place_id: String,
    pub name: String,
    pub short_address: Option<String>,
    pub location: Coordinate,
    /// 0.0 when the place is unrated.
    pub rating: f64,
    pub rating_count: u32,
    pub price_level: Option<u8>,
    /// Opaque upstream photo references, expanded into URLs at enrichment.
    pub photo_refs: Vec<String>,
    pub open_now: Option<bool>,
}

impl Candidate {
    /// Validates one raw search record. Returns `None` when the record lacks
    /// the identity or geometry the pipeline cannot work without.
    pub(crate) fn from_raw(raw: RawSearchResult) -> Option<Self> {
        let place_id = raw.place_id?;
        let name = raw.name?;
        let geometry = raw.geometry?;

        Some(Self {
            location: Coordinate::new(geometry.location.lat, geometry.location.lng),
            rating: raw.rating.unwrap_or(0.0),
            rating_count: raw.user_ratings_total.unwrap_or(0),
            price_level: raw.price_level,
            photo_refs: raw
                .photos
                .into_iter()
                .filter_map(|p| p.photo_reference)
                .collect(),
            open_now: raw.opening_hours.and_then(|h| h.open_now),
            short_address: raw.vicinity,
            place_id,
            name,
        })
    }
}

/// One page of validated search results plus the continuation token, if any.
#[derive(Debug)]
pub struct SearchPage {
    pub candidates: Vec<Candidate>,
    pub next_page_token: Option<String>,
}

/// The final, presentation-ready record. Every field is either populated or
/// explicitly absent; nothing partially-initialized escapes the pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct Place {
    pub place_id: String,
    pub name: String,
    pub address: Option<String>,
    pub short_address: Option<String>,
    pub location: Coordinate,
    /// Fully-qualified photo URLs, in upstream order. Empty when the place
    /// has no photos.
    pub photos: Vec<String>,
    pub rating: f64,
    pub rating_count: u32,
    pub price_level: Option<u8>,
    pub open_now: Option<bool>,
}
