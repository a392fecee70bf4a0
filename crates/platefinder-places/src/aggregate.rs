//! Multi-page candidate collection for nearby searches.

use std::collections::HashSet;
use std::time::Duration;

use platefinder_core::Coordinate;

use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::types::Candidate;

/// Page ceiling per collection. The upstream stops issuing continuation
/// tokens after three pages; the cap also bounds a cycling token.
pub(crate) const MAX_PAGES: usize = 3;

impl PlacesClient {
    /// Collects distinct candidates around `location`, walking search pages
    /// in order until `max_results` distinct places have accumulated, the
    /// upstream stops returning a continuation token, or the page ceiling is
    /// reached.
    ///
    /// Records repeated across pages (same `place_id`) are discarded; the
    /// returned order is page order, then within-page order. Ranking happens
    /// later.
    ///
    /// `page_delay_ms` is the wait applied before each follow-up page
    /// request. The upstream continuation token is not valid immediately
    /// after issuance; requesting too early yields an `INVALID_REQUEST`
    /// status.
    ///
    /// A failure on a follow-up page terminates the traversal and keeps the
    /// candidates already collected.
    ///
    /// # Errors
    ///
    /// Propagates the [`PlacesError`] from [`PlacesClient::search_page`]
    /// only when the first page itself fails — that is a total collection
    /// failure with nothing to degrade to.
    pub async fn collect_candidates(
        &self,
        location: Coordinate,
        radius_m: u32,
        max_results: usize,
        page_delay_ms: u64,
    ) -> Result<Vec<Candidate>, PlacesError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut collected: Vec<Candidate> = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages_fetched = 0usize;

        loop {
            let page = match self
                .search_page(location, radius_m, page_token.as_deref())
                .await
            {
                Ok(page) => page,
                Err(err) if pages_fetched == 0 => return Err(err),
                Err(err) => {
                    tracing::warn!(
                        page = pages_fetched + 1,
                        error = %err,
                        "follow-up page fetch failed; keeping candidates collected so far"
                    );
                    break;
                }
            };
            pages_fetched += 1;

            for candidate in page.candidates {
                if seen.insert(candidate.place_id.clone()) {
                    collected.push(candidate);
                }
            }
            tracing::debug!(
                page = pages_fetched,
                distinct = collected.len(),
                "collected nearby search page"
            );

            if collected.len() >= max_results {
                break;
            }
            page_token = page.next_page_token;
            if page_token.is_none() || pages_fetched >= MAX_PAGES {
                break;
            }

            if page_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(page_delay_ms)).await;
            }
        }

        Ok(collected)
    }
}
