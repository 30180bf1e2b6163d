// src/recommendation/candidates.rs

use std::collections::HashSet;

use log::debug;

use super::features::{candidate_features, ReferenceListing};
use crate::error::RecommendError;
use crate::models::ListingFeatures;
use crate::store::ListingStore;

/// Every other listing in the reference's district, in store order.
///
/// Candidates without a price are kept. Rows for the reference itself, rows from
/// another district and repeated identifiers are dropped even if the store
/// returns them.
pub async fn select_candidates(
    store: &dyn ListingStore,
    reference: &ReferenceListing,
) -> Result<Vec<ListingFeatures>, RecommendError> {
    let snapshots = store
        .list_listings_in_locality(reference.locality(), reference.id())
        .await?;
    let fetched = snapshots.len();

    let mut seen = HashSet::with_capacity(fetched);
    let candidates: Vec<ListingFeatures> = snapshots
        .into_iter()
        .filter(|s| s.id() != reference.id() && s.record.locality == reference.locality())
        .filter(|s| seen.insert(s.id()))
        .map(candidate_features)
        .collect();

    debug!(
        "Selected {} candidates for listing {} in district '{}' ({} rows fetched)",
        candidates.len(),
        reference.id(),
        reference.locality(),
        fetched
    );
    Ok(candidates)
}
