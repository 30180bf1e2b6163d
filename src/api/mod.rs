// src/api/mod.rs
pub mod handlers;
pub mod response;

pub use handlers::{create_api_routes, AppState};
pub use response::{api_error, api_success, client_message, ApiResponse, ApiResult};
