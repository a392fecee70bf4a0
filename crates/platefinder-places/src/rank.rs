//! Composite ranking of search candidates. Pure, no I/O.

use crate::types::Candidate;

/// Composite score: mean rating damped by review volume.
///
/// An unrated place (rating 0) or an unreviewed one (count 0, since
/// `ln(1) = 0`) scores exactly 0, which sinks it below any place that has
/// both a rating and at least one review.
#[must_use]
pub fn score(candidate: &Candidate) -> f64 {
    candidate.rating * (f64::from(candidate.rating_count) + 1.0).ln()
}

/// Sorts candidates by descending score and truncates to `max_results`.
///
/// `f64::total_cmp` is a genuine total order, and `sort_by` is stable, so
/// equal-score candidates keep their page order. Truncation happens after
/// sorting: the best `max_results` survive, not the first fetched.
#[must_use]
pub fn rank_candidates(mut candidates: Vec<Candidate>, max_results: usize) -> Vec<Candidate> {
    candidates.sort_by(|a, b| score(b).total_cmp(&score(a)));
    candidates.truncate(max_results);
    candidates
}
