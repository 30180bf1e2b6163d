//! Read-only access to persisted listing data.
//!
//! The recommender only ever reads through [`ListingStore`]; it never writes.
//! `PgListingStore` reads the relational schema, `InMemoryListingStore` serves a
//! fixed snapshot (JSON files, tests).

pub mod memory;
pub mod postgres;

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{AmenityKind, Layout, ListingId, ListingRecord, ListingSnapshot, TransactionPrices};

pub use memory::InMemoryListingStore;
pub use postgres::PgListingStore;

#[async_trait]
pub trait ListingStore: Send + Sync {
    /// `Ok(None)` when no listing has this identifier.
    async fn get_listing(&self, id: ListingId) -> Result<Option<ListingRecord>>;

    async fn get_amenities(&self, id: ListingId, kind: AmenityKind) -> Result<HashSet<String>>;

    /// Any single facility row of the listing, or `None` if it has none.
    async fn get_layout(&self, id: ListingId) -> Result<Option<Layout>>;

    async fn get_transaction_prices(&self, id: ListingId) -> Result<TransactionPrices>;

    /// Every listing in `locality` except `excluding`, with all comparison fields
    /// loaded in bulk.
    async fn list_listings_in_locality(
        &self,
        locality: &str,
        excluding: ListingId,
    ) -> Result<Vec<ListingSnapshot>>;
}
