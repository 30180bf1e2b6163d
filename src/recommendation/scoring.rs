// src/recommendation/scoring.rs
//! Hand-weighted similarity between a reference listing and one candidate.
//!
//! Pure functions over feature records; nothing here touches a store.

use std::collections::HashSet;

use super::features::ReferenceListing;
use crate::models::{Layout, ListingFeatures};

pub const SAME_TYPE_AMENITY_WEIGHT: u32 = 2;
pub const CROSS_TYPE_AMENITY_WEIGHT: u32 = 1;
pub const LAYOUT_FIELD_WEIGHT: u32 = 2;
pub const MAX_PRICE_SIMILARITY: f64 = 2.0;

/// Per-component score for one candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub amenity_same_type: u32,
    pub amenity_cross_type: u32,
    pub layout: u32,
    pub price: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        f64::from(self.amenity_same_type)
            + f64::from(self.amenity_cross_type)
            + f64::from(self.layout)
            + self.price
    }
}

fn overlap(a: &HashSet<String>, b: &HashSet<String>) -> u32 {
    // iterate the smaller side
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|name| large.contains(*name)).count() as u32
}

/// Amenities classified the same way on both listings.
pub fn amenity_same_type_score(reference: &ListingFeatures, candidate: &ListingFeatures) -> u32 {
    SAME_TYPE_AMENITY_WEIGHT
        * (overlap(&candidate.individual_amenities, &reference.individual_amenities)
            + overlap(&candidate.shared_amenities, &reference.shared_amenities))
}

/// Amenities one listing records as private and the other as shared.
pub fn amenity_cross_type_score(reference: &ListingFeatures, candidate: &ListingFeatures) -> u32 {
    CROSS_TYPE_AMENITY_WEIGHT
        * (overlap(&candidate.individual_amenities, &reference.shared_amenities)
            + overlap(&candidate.shared_amenities, &reference.individual_amenities))
}

/// Layout fields present on both sides and equal. Absent fields never count.
pub fn layout_score(reference: &Layout, candidate: &Layout) -> u32 {
    let matching = reference
        .fields()
        .iter()
        .zip(candidate.fields().iter())
        .filter(|(r, c)| r.is_some() && r == c)
        .count() as u32;
    LAYOUT_FIELD_WEIGHT * matching
}

/// `max(0, 2 - |candidate - reference| / reference)`.
///
/// A candidate without a price is scored as price 0. A non-positive reference
/// price yields 0; [`ReferenceListing`] never carries one.
pub fn price_similarity(reference_price: i64, candidate_price: Option<i64>) -> f64 {
    if reference_price <= 0 {
        return 0.0;
    }
    let reference = reference_price as f64;
    let candidate = candidate_price.unwrap_or(0) as f64;
    let relative_difference = (candidate - reference).abs() / reference;
    (MAX_PRICE_SIMILARITY - relative_difference).max(0.0)
}

pub fn score_candidate(reference: &ReferenceListing, candidate: &ListingFeatures) -> ScoreBreakdown {
    let features = reference.features();
    ScoreBreakdown {
        amenity_same_type: amenity_same_type_score(features, candidate),
        amenity_cross_type: amenity_cross_type_score(features, candidate),
        layout: layout_score(&features.layout, &candidate.layout),
        price: price_similarity(reference.price(), candidate.price),
    }
}
