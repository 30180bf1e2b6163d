// src/recommendation/features.rs

use log::debug;

use crate::error::RecommendError;
use crate::models::{AmenityKind, ListingFeatures, ListingId, ListingSnapshot};
use crate::store::ListingStore;

/// Feature record of the listing recommendations are requested for.
///
/// Can only be built with a positive reference price, which the price
/// similarity component divides by.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceListing {
    features: ListingFeatures,
    price: i64,
}

impl ReferenceListing {
    pub fn new(features: ListingFeatures) -> Result<Self, RecommendError> {
        match features.price {
            None => Err(RecommendError::InvalidState(
                features.id,
                "listing missing price data".to_string(),
            )),
            Some(price) if price <= 0 => Err(RecommendError::InvalidState(
                features.id,
                format!("listing price must be positive, got {}", price),
            )),
            Some(price) => Ok(Self { features, price }),
        }
    }

    pub fn id(&self) -> ListingId {
        self.features.id
    }

    pub fn locality(&self) -> &str {
        &self.features.locality
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn features(&self) -> &ListingFeatures {
        &self.features
    }
}

/// Loads the reference listing and derives its features.
///
/// The price follows the listing's transaction mode (see
/// [`TransactionPrices::resolve_for`](crate::models::TransactionPrices::resolve_for)).
pub async fn extract_reference_features(
    store: &dyn ListingStore,
    id: ListingId,
) -> Result<ReferenceListing, RecommendError> {
    let record = store
        .get_listing(id)
        .await?
        .ok_or(RecommendError::NotFound(id))?;

    let (individual_amenities, shared_amenities, layout, prices) = futures::try_join!(
        store.get_amenities(id, AmenityKind::Individual),
        store.get_amenities(id, AmenityKind::Shared),
        store.get_layout(id),
        store.get_transaction_prices(id),
    )?;

    let price = prices.resolve_for(record.available_for);
    debug!(
        "Reference listing {}: district '{}', mode {:?}, price {:?}",
        id, record.locality, record.available_for, price
    );

    ReferenceListing::new(ListingFeatures {
        id,
        locality: record.locality,
        individual_amenities,
        shared_amenities,
        layout: layout.unwrap_or_default(),
        price,
    })
}

/// Candidate prices ignore the transaction mode: sale price, else rent.
pub fn candidate_features(snapshot: ListingSnapshot) -> ListingFeatures {
    let price = snapshot.prices.preferred();
    ListingFeatures {
        id: snapshot.record.id,
        locality: snapshot.record.locality,
        individual_amenities: snapshot.individual_amenities,
        shared_amenities: snapshot.shared_amenities,
        layout: snapshot.layout.unwrap_or_default(),
        price,
    }
}
