//! End-to-end nearby restaurant query with re-entrant refetch.
//!
//! One query run is: current location → multi-page candidate collection →
//! ranking → detail enrichment → publication. Runs are tagged with a
//! monotonically increasing generation; a run's terminal snapshot is only
//! published while no newer run has started, so overlapping refetches
//! resolve last-one-wins and stale completions are discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use platefinder_core::AppConfig;

use crate::client::PlacesClient;
use crate::location::LocationProvider;
use crate::rank::rank_candidates;
use crate::types::Place;

/// Where the query currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus {
    /// No run has started yet.
    Idle,
    Loading,
    /// A run completed. An empty place list here means "no results", which
    /// is distinct from `Failed`.
    Ready,
    Failed(String),
}

impl QueryStatus {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The failure reason, when the last run failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Snapshot handed to the presentation layer. Replaced wholesale on each
/// publication; never mutated incrementally.
#[derive(Debug, Clone)]
pub struct QuerySnapshot {
    pub places: Vec<Place>,
    pub status: QueryStatus,
}

impl QuerySnapshot {
    fn idle() -> Self {
        Self {
            places: Vec::new(),
            status: QueryStatus::Idle,
        }
    }
}

/// Tunables for one query pipeline.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub radius_m: u32,
    pub max_results: usize,
    pub page_delay_ms: u64,
    pub max_concurrent_lookups: usize,
    /// Keep the last published places visible while loading and when a
    /// refetch fails, instead of clearing to empty.
    pub keep_stale_on_failure: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            radius_m: 5000,
            max_results: 100,
            page_delay_ms: 2000,
            max_concurrent_lookups: 8,
            keep_stale_on_failure: false,
        }
    }
}

impl QueryOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            radius_m: config.search_radius_m,
            max_results: config.max_results,
            page_delay_ms: config.page_delay_ms,
            max_concurrent_lookups: config.max_concurrent_lookups,
            keep_stale_on_failure: false,
        }
    }
}

/// Re-entrant nearby restaurant query.
pub struct NearbyQuery<P> {
    provider: P,
    client: Arc<PlacesClient>,
    options: QueryOptions,
    state: Mutex<QuerySnapshot>,
    generation: AtomicU64,
}

impl<P: LocationProvider> NearbyQuery<P> {
    #[must_use]
    pub fn new(provider: P, client: Arc<PlacesClient>, options: QueryOptions) -> Self {
        Self {
            provider,
            client,
            options,
            state: Mutex::new(QuerySnapshot::idle()),
            generation: AtomicU64::new(0),
        }
    }

    /// The latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> QuerySnapshot {
        self.lock_state().clone()
    }

    /// Runs the whole pipeline once and returns the authoritative snapshot
    /// after publication.
    ///
    /// Invoking this while a previous call is still in flight starts a new
    /// run; the newer run's generation supersedes the older one, whose
    /// completion is then discarded. In-flight network calls of a superseded
    /// run are not aborted, only their effect on the published state is.
    pub async fn refetch(&self) -> QuerySnapshot {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.lock_state();
            if !self.options.keep_stale_on_failure {
                state.places.clear();
            }
            state.status = QueryStatus::Loading;
        }

        let snapshot = match self.run_pipeline().await {
            Ok(places) => QuerySnapshot {
                places,
                status: QueryStatus::Ready,
            },
            Err(reason) => QuerySnapshot {
                places: if self.options.keep_stale_on_failure {
                    self.lock_state().places.clone()
                } else {
                    Vec::new()
                },
                status: QueryStatus::Failed(reason),
            },
        };

        self.publish(generation, snapshot)
    }

    async fn run_pipeline(&self) -> Result<Vec<Place>, String> {
        let location = self
            .provider
            .current_location()
            .await
            .map_err(|e| e.to_string())?;
        tracing::debug!(
            latitude = location.latitude,
            longitude = location.longitude,
            "resolved current location"
        );

        let candidates = self
            .client
            .collect_candidates(
                location,
                self.options.radius_m,
                self.options.max_results,
                self.options.page_delay_ms,
            )
            .await
            .map_err(|e| e.to_string())?;

        // Zero candidates is a valid, empty result, not a failure.
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let ranked = rank_candidates(candidates, self.options.max_results);
        Ok(self
            .client
            .enrich_all(ranked, self.options.max_concurrent_lookups)
            .await)
    }

    /// Stores `snapshot` unless a newer run has started since `generation`,
    /// then returns the authoritative state either way.
    fn publish(&self, generation: u64, snapshot: QuerySnapshot) -> QuerySnapshot {
        let mut state = self.lock_state();
        if self.generation.load(Ordering::SeqCst) == generation {
            *state = snapshot;
        } else {
            tracing::debug!(generation, "discarding stale query result");
        }
        state.clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, QuerySnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
