//! Detail enrichment of ranked candidates.
//!
//! Each candidate gets one detail lookup; lookups for different candidates
//! are independent, so one failure never drops or reorders the others.

use futures::stream::{self, StreamExt};

use platefinder_core::Coordinate;

use crate::client::PlacesClient;
use crate::types::{Candidate, Place, RawPlaceDetail};

impl PlacesClient {
    /// Builds the final [`Place`] for one candidate.
    ///
    /// Infallible: on a successful detail lookup the detail fields are
    /// preferred with field-by-field fallback to the candidate; on lookup
    /// failure or a malformed payload the place is built entirely from the
    /// candidate, which already carries name, address, coordinate, and
    /// rating.
    pub async fn enrich_candidate(&self, candidate: Candidate) -> Place {
        match self.place_details(&candidate.place_id).await {
            Ok(detail) => self.merge_detail(candidate, detail),
            Err(err) => {
                tracing::warn!(
                    place_id = %candidate.place_id,
                    error = %err,
                    "detail lookup failed; falling back to search result fields"
                );
                self.place_from_candidate(candidate)
            }
        }
    }

    /// Enriches every candidate with bounded concurrency.
    ///
    /// Output length and order exactly match the input, regardless of
    /// per-item latency or failure.
    pub async fn enrich_all(&self, candidates: Vec<Candidate>, max_concurrent: usize) -> Vec<Place> {
        stream::iter(candidates)
            .map(|candidate| self.enrich_candidate(candidate))
            .buffered(max_concurrent.max(1))
            .collect()
            .await
    }

    fn merge_detail(&self, candidate: Candidate, detail: RawPlaceDetail) -> Place {
        let photo_refs: Vec<String> = if detail.photos.is_empty() {
            candidate.photo_refs
        } else {
            detail
                .photos
                .into_iter()
                .filter_map(|p| p.photo_reference)
                .collect()
        };
        let location = detail
            .geometry
            .map_or(candidate.location, |g| {
                Coordinate::new(g.location.lat, g.location.lng)
            });

        Place {
            photos: self.expand_photo_refs(&photo_refs),
            name: detail.name.unwrap_or(candidate.name),
            address: detail
                .formatted_address
                .or_else(|| candidate.short_address.clone()),
            short_address: candidate.short_address,
            location,
            rating: detail.rating.unwrap_or(candidate.rating),
            rating_count: detail.user_ratings_total.unwrap_or(candidate.rating_count),
            price_level: detail.price_level.or(candidate.price_level),
            open_now: detail
                .opening_hours
                .and_then(|h| h.open_now)
                .or(candidate.open_now),
            place_id: candidate.place_id,
        }
    }

    fn place_from_candidate(&self, candidate: Candidate) -> Place {
        Place {
            photos: self.expand_photo_refs(&candidate.photo_refs),
            name: candidate.name,
            address: candidate.short_address.clone(),
            short_address: candidate.short_address,
            location: candidate.location,
            rating: candidate.rating,
            rating_count: candidate.rating_count,
            price_level: candidate.price_level,
            open_now: candidate.open_now,
            place_id: candidate.place_id,
        }
    }

    fn expand_photo_refs(&self, refs: &[String]) -> Vec<String> {
        refs.iter().map(|r| self.photo_url(r)).collect()
    }
}
