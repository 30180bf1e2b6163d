// src/models/listing.rs

use std::collections::HashSet;
use std::error::Error;
use std::fmt;

use bytes::BytesMut;
use postgres_types::{FromSql, IsNull, ToSql, Type};
use serde::{Deserialize, Deserializer, Serialize};

//------------------------------------------------------------------------------
// IDENTIFIER TYPES
//------------------------------------------------------------------------------

/// Strongly typed identifier for Property records (the APN column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub i64);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for ListingId {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        self.0.to_sql(ty, out)
    }

    fn accepts(ty: &Type) -> bool {
        <i64 as ToSql>::accepts(ty)
    }

    fn to_sql_checked(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        self.0.to_sql_checked(ty, out)
    }
}

impl<'a> FromSql<'a> for ListingId {
    fn from_sql(ty: &Type, raw: &[u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Ok(ListingId(i64::from_sql(ty, raw)?))
    }

    fn accepts(ty: &Type) -> bool {
        <i64 as FromSql>::accepts(ty)
    }
}

//------------------------------------------------------------------------------
// STORED LISTING DATA
//------------------------------------------------------------------------------

/// How a listing is offered. Stored as the `available_for` enum on Property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransactionMode {
    Sell,
    Rent,
    Both,
}

impl TransactionMode {
    /// Parses the stored enum label case-insensitively. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "sell" => Some(TransactionMode::Sell),
            "rent" => Some(TransactionMode::Rent),
            "both" => Some(TransactionMode::Both),
            _ => None,
        }
    }
}

/// Reads an optional mode label the same way the database path does: any
/// casing is accepted and an unknown label becomes `None`.
fn deserialize_mode_label<'de, D>(deserializer: D) -> Result<Option<TransactionMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let label: Option<String> = Option::deserialize(deserializer)?;
    Ok(label.as_deref().and_then(TransactionMode::from_label))
}

/// Which amenity table a name comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmenityKind {
    Individual,
    Shared,
}

impl AmenityKind {
    pub fn table_name(&self) -> &'static str {
        match self {
            AmenityKind::Individual => "Individual_amenities",
            AmenityKind::Shared => "Shared_amenities",
        }
    }
}

/// Floor facility counts. A field is `None` when the listing has no facility row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub hall: Option<i32>,
    #[serde(default)]
    pub kitchen: Option<i32>,
    #[serde(default)]
    pub bath: Option<i32>,
    #[serde(default)]
    pub bedroom: Option<i32>,
}

impl Layout {
    pub fn new(hall: i32, kitchen: i32, bath: i32, bedroom: i32) -> Self {
        Self {
            hall: Some(hall),
            kitchen: Some(kitchen),
            bath: Some(bath),
            bedroom: Some(bedroom),
        }
    }

    /// Fields in fixed order: hall, kitchen, bath, bedroom.
    pub fn fields(&self) -> [Option<i32>; 4] {
        [self.hall, self.kitchen, self.bath, self.bedroom]
    }
}

/// Sale price from `Sell` and monthly rent from `Rent`, either of which may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPrices {
    #[serde(default)]
    pub sale_price: Option<i64>,
    #[serde(default)]
    pub monthly_rent: Option<i64>,
}

impl TransactionPrices {
    /// Sale price if present, otherwise monthly rent.
    pub fn preferred(&self) -> Option<i64> {
        self.sale_price.or(self.monthly_rent)
    }

    /// Resolves the comparison price from the listing's transaction mode.
    /// A missing mode behaves like `Both`.
    pub fn resolve_for(&self, mode: Option<TransactionMode>) -> Option<i64> {
        match mode {
            Some(TransactionMode::Sell) => self.sale_price,
            Some(TransactionMode::Rent) => self.monthly_rent,
            Some(TransactionMode::Both) | None => self.preferred(),
        }
    }
}

/// The Property columns the recommender needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: ListingId,
    /// District the listing belongs to
    pub locality: String,
    #[serde(default, deserialize_with = "deserialize_mode_label")]
    pub available_for: Option<TransactionMode>,
}

/// Everything the store knows about one listing, as read in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSnapshot {
    #[serde(flatten)]
    pub record: ListingRecord,
    #[serde(default)]
    pub individual_amenities: HashSet<String>,
    #[serde(default)]
    pub shared_amenities: HashSet<String>,
    #[serde(default)]
    pub layout: Option<Layout>,
    #[serde(default)]
    pub prices: TransactionPrices,
}

impl ListingSnapshot {
    pub fn id(&self) -> ListingId {
        self.record.id
    }

    pub fn amenities(&self, kind: AmenityKind) -> &HashSet<String> {
        match kind {
            AmenityKind::Individual => &self.individual_amenities,
            AmenityKind::Shared => &self.shared_amenities,
        }
    }
}

//------------------------------------------------------------------------------
// DERIVED FEATURES
//------------------------------------------------------------------------------

/// Comparable feature record for one listing. Built per request and never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFeatures {
    pub id: ListingId,
    pub locality: String,
    pub individual_amenities: HashSet<String>,
    pub shared_amenities: HashSet<String>,
    pub layout: Layout,
    /// Comparison price; `None` when neither sale price nor rent is recorded
    pub price: Option<i64>,
}
