pub mod api;
pub mod error;
pub mod models;
pub mod recommendation;
pub mod store;
pub mod utils;

pub use error::RecommendError;
pub use models::ListingId;
