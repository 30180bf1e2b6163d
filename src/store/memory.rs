// src/store/memory.rs

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};

use super::ListingStore;
use crate::models::{AmenityKind, Layout, ListingId, ListingRecord, ListingSnapshot, TransactionPrices};

/// Immutable listing index held in memory.
///
/// Enumeration order is the insertion order of the snapshots, so equal-score
/// ties come back in a repeatable order for a given input file.
#[derive(Debug, Default)]
pub struct InMemoryListingStore {
    listings: HashMap<ListingId, ListingSnapshot>,
    order: Vec<ListingId>,
}

impl InMemoryListingStore {
    pub fn new(snapshots: Vec<ListingSnapshot>) -> Self {
        let mut listings = HashMap::with_capacity(snapshots.len());
        let mut order = Vec::with_capacity(snapshots.len());

        for snapshot in snapshots {
            let id = snapshot.id();
            if listings.contains_key(&id) {
                warn!("Duplicate listing {} in snapshot, keeping the first occurrence", id);
                continue;
            }
            order.push(id);
            listings.insert(id, snapshot);
        }

        debug!("Built in-memory listing index with {} listings", order.len());
        Self { listings, order }
    }

    /// Loads a JSON array of listing snapshots.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read listing snapshot {}", path.display()))?;
        let snapshots: Vec<ListingSnapshot> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse listing snapshot {}", path.display()))?;
        info!("Loaded {} listings from {}", snapshots.len(), path.display());
        Ok(Self::new(snapshots))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[async_trait]
impl ListingStore for InMemoryListingStore {
    async fn get_listing(&self, id: ListingId) -> Result<Option<ListingRecord>> {
        Ok(self.listings.get(&id).map(|s| s.record.clone()))
    }

    async fn get_amenities(&self, id: ListingId, kind: AmenityKind) -> Result<HashSet<String>> {
        Ok(self
            .listings
            .get(&id)
            .map(|s| s.amenities(kind).clone())
            .unwrap_or_default())
    }

    async fn get_layout(&self, id: ListingId) -> Result<Option<Layout>> {
        Ok(self.listings.get(&id).and_then(|s| s.layout))
    }

    async fn get_transaction_prices(&self, id: ListingId) -> Result<TransactionPrices> {
        Ok(self.listings.get(&id).map(|s| s.prices).unwrap_or_default())
    }

    async fn list_listings_in_locality(
        &self,
        locality: &str,
        excluding: ListingId,
    ) -> Result<Vec<ListingSnapshot>> {
        Ok(self
            .order
            .iter()
            .filter(|id| **id != excluding)
            .filter_map(|id| self.listings.get(id))
            .filter(|s| s.record.locality == locality)
            .cloned()
            .collect())
    }
}
