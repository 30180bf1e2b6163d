// src/error.rs

use thiserror::Error;

use crate::models::ListingId;

/// Failures a recommendation request can end in.
///
/// Missing layout fields and missing candidate prices are not errors; they only
/// zero out the affected score component.
#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Listing {0} not found")]
    NotFound(ListingId),

    #[error("Listing {0} is in an invalid state: {1}")]
    InvalidState(ListingId, String),

    #[error("Listing store unavailable: {0:#}")]
    StoreUnavailable(#[source] anyhow::Error),
}

impl RecommendError {
    /// Only store outages are worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, RecommendError::StoreUnavailable(_))
    }
}

impl From<anyhow::Error> for RecommendError {
    fn from(err: anyhow::Error) -> Self {
        RecommendError::StoreUnavailable(err)
    }
}
