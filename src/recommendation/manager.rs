// src/recommendation/manager.rs
use std::time::Instant;

use log::{debug, info};

use super::candidates::select_candidates;
use super::features::{extract_reference_features, ReferenceListing};
use super::scoring::{score_candidate, ScoreBreakdown};
use crate::error::RecommendError;
use crate::models::{ListingFeatures, ListingId};
use crate::store::ListingStore;

/// Fixed size of a recommendation list.
pub const MAX_RECOMMENDATIONS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub id: ListingId,
    pub breakdown: ScoreBreakdown,
}

impl ScoredCandidate {
    pub fn total(&self) -> f64 {
        self.breakdown.total()
    }
}

/// Scores every candidate and keeps the best `limit`, highest total first.
///
/// The sort is stable, so equal totals keep candidate order. That order is not
/// part of the contract.
pub fn rank_candidates(
    reference: &ReferenceListing,
    candidates: &[ListingFeatures],
    limit: usize,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .map(|candidate| ScoredCandidate {
            id: candidate.id,
            breakdown: score_candidate(reference, candidate),
        })
        .collect();

    scored.sort_by(|a, b| b.total().total_cmp(&a.total()));
    scored.truncate(limit);
    scored
}

/// Runs extraction, candidate selection and ranking for one listing and returns
/// up to [`MAX_RECOMMENDATIONS`] scored candidates.
pub async fn recommend(
    store: &dyn ListingStore,
    listing_id: ListingId,
) -> Result<Vec<ScoredCandidate>, RecommendError> {
    let start_time = Instant::now();

    let reference = extract_reference_features(store, listing_id).await?;
    let candidates = select_candidates(store, &reference).await?;
    let ranked = rank_candidates(&reference, &candidates, MAX_RECOMMENDATIONS);

    for (rank, scored) in ranked.iter().enumerate() {
        debug!(
            "#{} listing {} total={:.3} (same-type={}, cross-type={}, layout={}, price={:.3})",
            rank + 1,
            scored.id,
            scored.total(),
            scored.breakdown.amenity_same_type,
            scored.breakdown.amenity_cross_type,
            scored.breakdown.layout,
            scored.breakdown.price
        );
    }

    info!(
        "Recommended {} of {} candidates for listing {} in {:.2?}",
        ranked.len(),
        candidates.len(),
        listing_id,
        start_time.elapsed()
    );
    Ok(ranked)
}

/// [`recommend`] without the score breakdown.
pub async fn recommend_ids(
    store: &dyn ListingStore,
    listing_id: ListingId,
) -> Result<Vec<ListingId>, RecommendError> {
    Ok(recommend(store, listing_id)
        .await?
        .into_iter()
        .map(|scored| scored.id)
        .collect())
}
