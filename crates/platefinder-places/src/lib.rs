//! Nearby restaurant search pipeline: fetch paginated search results,
//! deduplicate, rank, and enrich them with per-place detail lookups.

pub mod client;
pub mod error;
pub mod location;
pub mod query;
pub mod rank;
pub mod types;

mod aggregate;
mod enrich;

pub use client::PlacesClient;
pub use error::{LocationError, PlacesError};
pub use location::{FixedLocation, LocationProvider};
pub use query::{NearbyQuery, QueryOptions, QuerySnapshot, QueryStatus};
pub use rank::rank_candidates;
pub use types::{Candidate, Place, SearchPage};
