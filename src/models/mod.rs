pub mod listing;

pub use listing::{
    AmenityKind, Layout, ListingFeatures, ListingId, ListingRecord, ListingSnapshot,
    TransactionMode, TransactionPrices,
};
