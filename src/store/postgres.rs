// src/store/postgres.rs

use std::collections::HashSet;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use tokio_postgres::Row as PgRow;

use super::ListingStore;
use crate::models::{
    AmenityKind, Layout, ListingId, ListingRecord, ListingSnapshot, TransactionMode,
    TransactionPrices,
};
use crate::utils::db_connect::PgPool;

// One row per candidate: every per-listing lookup is a LATERAL subquery capped at
// one row, so multiple facility/Sell/Rent rows never fan out the result.
const LOCALITY_SNAPSHOT_QUERY: &str = "
    SELECT p.APN AS apn,
           p.District AS district,
           p.Available_For::text AS available_for,
           COALESCE(ind.names, ARRAY[]::text[]) AS ind_amenities,
           COALESCE(sh.names, ARRAY[]::text[]) AS shared_amenities,
           f.Property_Id IS NOT NULL AS has_layout,
           f.Hall_No AS hall_no,
           f.Kitchen_No AS kitchen_no,
           f.Bath_No AS bath_no,
           f.Bedroom_No AS bedroom_no,
           s.Price::bigint AS price,
           r.Monthly_Rent::bigint AS rent
    FROM Property p
    LEFT JOIN LATERAL (
        SELECT array_agg(ia.Amenity_name::text) AS names
        FROM Individual_amenities ia WHERE ia.Property_Id = p.APN
    ) ind ON true
    LEFT JOIN LATERAL (
        SELECT array_agg(sa.Amenity_name::text) AS names
        FROM Shared_amenities sa WHERE sa.Property_Id = p.APN
    ) sh ON true
    LEFT JOIN LATERAL (
        SELECT fa.Property_Id, fa.Hall_No, fa.Kitchen_No, fa.Bath_No, fa.Bedroom_No
        FROM facility fa WHERE fa.Property_Id = p.APN LIMIT 1
    ) f ON true
    LEFT JOIN LATERAL (
        SELECT se.Price FROM Sell se WHERE se.Property_Id = p.APN LIMIT 1
    ) s ON true
    LEFT JOIN LATERAL (
        SELECT re.Monthly_Rent FROM Rent re WHERE re.Property_Id = p.APN LIMIT 1
    ) r ON true
    WHERE p.District = $1 AND p.APN <> $2
    ORDER BY p.APN";

/// Listing store backed by the property schema in PostgreSQL.
#[derive(Clone)]
pub struct PgListingStore {
    pool: PgPool,
}

impl PgListingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn mode_from_row(row: &PgRow) -> Result<Option<TransactionMode>> {
    let label: Option<String> = row
        .try_get("available_for")
        .context("Failed to read available_for")?;
    Ok(label.as_deref().and_then(TransactionMode::from_label))
}

fn layout_from_row(row: &PgRow) -> Result<Layout> {
    Ok(Layout {
        hall: row.try_get("hall_no").context("Failed to read hall_no")?,
        kitchen: row.try_get("kitchen_no").context("Failed to read kitchen_no")?,
        bath: row.try_get("bath_no").context("Failed to read bath_no")?,
        bedroom: row.try_get("bedroom_no").context("Failed to read bedroom_no")?,
    })
}

fn prices_from_row(row: &PgRow) -> Result<TransactionPrices> {
    Ok(TransactionPrices {
        sale_price: row.try_get("price").context("Failed to read price")?,
        monthly_rent: row.try_get("rent").context("Failed to read rent")?,
    })
}

fn snapshot_from_row(row: &PgRow) -> Result<ListingSnapshot> {
    let id: ListingId = row.try_get("apn").context("Failed to read apn")?;
    let individual: Vec<String> = row
        .try_get("ind_amenities")
        .context("Failed to read individual amenities")?;
    let shared: Vec<String> = row
        .try_get("shared_amenities")
        .context("Failed to read shared amenities")?;
    let has_layout: bool = row.try_get("has_layout").context("Failed to read has_layout")?;

    Ok(ListingSnapshot {
        record: ListingRecord {
            id,
            locality: row.try_get("district").context("Failed to read district")?,
            available_for: mode_from_row(row)?,
        },
        individual_amenities: individual.into_iter().collect(),
        shared_amenities: shared.into_iter().collect(),
        layout: if has_layout { Some(layout_from_row(row)?) } else { None },
        prices: prices_from_row(row)?,
    })
}

#[async_trait]
impl ListingStore for PgListingStore {
    async fn get_listing(&self, id: ListingId) -> Result<Option<ListingRecord>> {
        let conn = self.pool.get().await.context("Failed to get DB connection")?;
        let row = conn
            .query_opt(
                "SELECT p.APN AS apn, p.District AS district, p.Available_For::text AS available_for
                 FROM Property p WHERE p.APN = $1",
                &[&id],
            )
            .await
            .with_context(|| format!("Failed to query property {}", id))?;

        match row {
            Some(row) => Ok(Some(ListingRecord {
                id,
                locality: row.try_get("district").context("Failed to read district")?,
                available_for: mode_from_row(&row)?,
            })),
            None => Ok(None),
        }
    }

    async fn get_amenities(&self, id: ListingId, kind: AmenityKind) -> Result<HashSet<String>> {
        let conn = self.pool.get().await.context("Failed to get DB connection")?;
        let query = format!(
            "SELECT Amenity_name::text AS amenity_name FROM {} WHERE Property_Id = $1",
            kind.table_name()
        );
        let rows = conn
            .query(&query, &[&id])
            .await
            .with_context(|| format!("Failed to query {} for {}", kind.table_name(), id))?;

        rows.iter()
            .map(|row| row.try_get::<_, String>("amenity_name").context("Failed to read amenity_name"))
            .collect()
    }

    async fn get_layout(&self, id: ListingId) -> Result<Option<Layout>> {
        let conn = self.pool.get().await.context("Failed to get DB connection")?;
        let row = conn
            .query_opt(
                "SELECT Hall_No AS hall_no, Kitchen_No AS kitchen_no, Bath_No AS bath_no, Bedroom_No AS bedroom_no
                 FROM facility WHERE Property_Id = $1 LIMIT 1",
                &[&id],
            )
            .await
            .with_context(|| format!("Failed to query facility for {}", id))?;

        row.as_ref().map(layout_from_row).transpose()
    }

    async fn get_transaction_prices(&self, id: ListingId) -> Result<TransactionPrices> {
        let conn = self.pool.get().await.context("Failed to get DB connection")?;
        let row = conn
            .query_one(
                "SELECT (SELECT s.Price::bigint FROM Sell s WHERE s.Property_Id = $1 LIMIT 1) AS price,
                        (SELECT r.Monthly_Rent::bigint FROM Rent r WHERE r.Property_Id = $1 LIMIT 1) AS rent",
                &[&id],
            )
            .await
            .with_context(|| format!("Failed to query Sell/Rent for {}", id))?;

        prices_from_row(&row)
    }

    async fn list_listings_in_locality(
        &self,
        locality: &str,
        excluding: ListingId,
    ) -> Result<Vec<ListingSnapshot>> {
        let conn = self.pool.get().await.context("Failed to get DB connection")?;

        debug!("Querying listings in district '{}' excluding {}...", locality, excluding);
        let rows = conn
            .query(LOCALITY_SNAPSHOT_QUERY, &[&locality, &excluding])
            .await
            .with_context(|| format!("Failed to query listings in district '{}'", locality))?;
        debug!("Found {} listings in district '{}'.", rows.len(), locality);

        rows.iter().map(snapshot_from_row).collect()
    }
}
