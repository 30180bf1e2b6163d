// src/api/handlers.rs

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use log::{info, warn};

use crate::api::response::{api_error, api_success, client_message, status_for, ApiResult};
use crate::models::ListingId;
use crate::recommendation::recommend_ids;
use crate::store::ListingStore;

// Application state
pub struct AppState {
    pub store: Arc<dyn ListingStore>,
}

pub fn create_api_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/recommend/{listing_id}", get(get_recommendations))
        .with_state(app_state)
}

async fn health_check() -> &'static str {
    "OK"
}

// GET /recommend/{listing_id}
async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Vec<ListingId>> {
    let listing_id = match raw_id.trim().parse::<i64>() {
        Ok(id) => ListingId(id),
        Err(_) => {
            return api_error(
                StatusCode::BAD_REQUEST,
                format!("Invalid listing id '{}'", raw_id),
            )
        }
    };

    match recommend_ids(state.store.as_ref(), listing_id).await {
        Ok(ids) => {
            info!("Served {} recommendations for listing {}", ids.len(), listing_id);
            api_success(ids)
        }
        Err(e) => {
            let status = status_for(&e);
            if e.is_transient() {
                warn!("Recommendation for listing {} failed: {}", listing_id, e);
            } else {
                info!("Recommendation for listing {} rejected: {}", listing_id, e);
            }
            api_error(status, client_message(&e))
        }
    }
}
