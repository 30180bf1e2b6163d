// tests/recommendation_tests.rs

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use recommend_lib::{
    api::{create_api_routes, AppState},
    models::{
        AmenityKind, Layout, ListingId, ListingRecord, ListingSnapshot, TransactionMode,
        TransactionPrices,
    },
    recommendation::{recommend, recommend_ids, MAX_RECOMMENDATIONS},
    store::{InMemoryListingStore, ListingStore},
    RecommendError,
};
use serde_json::Value;
use tower::ServiceExt;

// --- Fixtures ---

fn names(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn listing(
    id: i64,
    locality: &str,
    individual: &[&str],
    shared: &[&str],
    layout: Option<Layout>,
    sale_price: Option<i64>,
) -> ListingSnapshot {
    ListingSnapshot {
        record: ListingRecord {
            id: ListingId(id),
            locality: locality.to_string(),
            available_for: Some(TransactionMode::Sell),
        },
        individual_amenities: names(individual),
        shared_amenities: names(shared),
        layout,
        prices: TransactionPrices { sale_price, monthly_rent: None },
    }
}

fn downtown_store() -> InMemoryListingStore {
    let layout = Some(Layout::new(1, 1, 2, 3));
    InMemoryListingStore::new(vec![
        listing(1, "Downtown", &["Wi-Fi"], &["Gym"], layout, Some(500_000)),
        listing(2, "Downtown", &["Wi-Fi"], &[], layout, Some(500_000)),
        listing(3, "Uptown", &["Wi-Fi"], &[], layout, Some(500_000)),
        listing(4, "Downtown", &[], &[], None, None),
        listing(5, "Downtown", &["Gym"], &["Wi-Fi"], None, Some(750_000)),
        listing(6, "Downtown", &["Wi-Fi"], &["Gym"], layout, Some(0)),
    ])
}

/// Store whose every read fails, standing in for an unreachable database.
struct FailingStore;

#[async_trait]
impl ListingStore for FailingStore {
    async fn get_listing(&self, _id: ListingId) -> Result<Option<ListingRecord>> {
        Err(anyhow!("connection refused"))
    }
    async fn get_amenities(&self, _id: ListingId, _kind: AmenityKind) -> Result<HashSet<String>> {
        Err(anyhow!("connection refused"))
    }
    async fn get_layout(&self, _id: ListingId) -> Result<Option<Layout>> {
        Err(anyhow!("connection refused"))
    }
    async fn get_transaction_prices(&self, _id: ListingId) -> Result<TransactionPrices> {
        Err(anyhow!("connection refused"))
    }
    async fn list_listings_in_locality(
        &self,
        _locality: &str,
        _excluding: ListingId,
    ) -> Result<Vec<ListingSnapshot>> {
        Err(anyhow!("connection refused"))
    }
}

// --- Engine ---

#[tokio::test]
async fn test_downtown_reference_scores_and_order() {
    let store = downtown_store();
    let ranked = recommend(&store, ListingId(1)).await.unwrap();

    let ids: Vec<i64> = ranked.iter().map(|s| s.id.0).collect();
    // 6: 4 same-type + 0 cross + 8 layout + 1 price (0 vs 500_000) = 13
    // 2: 2 + 0 + 8 + 2 = 12
    // 5: 0 + 2 + 0 + 1.5 = 3.5
    // 4: no price, scored as 0: 0 + 0 + 0 + 1 = 1
    assert_eq!(ids, vec![6, 2, 5, 4]);
    assert_eq!(ranked[0].total(), 13.0);
    assert_eq!(ranked[1].total(), 12.0);
    assert_eq!(ranked[2].total(), 3.5);
    assert_eq!(ranked[3].total(), 1.0);

    let candidate_2 = ranked.iter().find(|s| s.id == ListingId(2)).unwrap();
    assert_eq!(candidate_2.breakdown.amenity_same_type, 2);
    assert_eq!(candidate_2.breakdown.amenity_cross_type, 0);
    assert_eq!(candidate_2.breakdown.layout, 8);
    assert_eq!(candidate_2.breakdown.price, 2.0);
}

#[tokio::test]
async fn test_other_locality_never_recommended() {
    let store = downtown_store();
    let ids = recommend_ids(&store, ListingId(3)).await.unwrap();
    assert!(ids.is_empty());

    let ids = recommend_ids(&store, ListingId(2)).await.unwrap();
    assert!(!ids.contains(&ListingId(3)));
    assert!(!ids.contains(&ListingId(2)));
}

#[tokio::test]
async fn test_zero_price_reference_is_invalid_state() {
    let store = downtown_store();
    let err = recommend_ids(&store, ListingId(6)).await.unwrap_err();
    assert!(matches!(err, RecommendError::InvalidState(ListingId(6), _)));

    let err = recommend_ids(&store, ListingId(4)).await.unwrap_err();
    assert!(matches!(err, RecommendError::InvalidState(ListingId(4), _)));
}

#[tokio::test]
async fn test_unknown_reference_is_not_found() {
    let err = recommend_ids(&downtown_store(), ListingId(404)).await.unwrap_err();
    assert!(matches!(err, RecommendError::NotFound(ListingId(404))));
}

#[tokio::test]
async fn test_store_failure_is_store_unavailable() {
    let err = recommend_ids(&FailingStore, ListingId(1)).await.unwrap_err();
    assert!(err.is_transient());
    assert!(matches!(err, RecommendError::StoreUnavailable(_)));
}

#[tokio::test]
async fn test_large_locality_truncated_to_top_ten() {
    let mut listings = vec![listing(1, "Midtown", &["Parking"], &[], None, Some(1_000))];
    for id in 2..=30 {
        listings.push(listing(id, "Midtown", &[], &[], None, Some(1_000 + id * 50)));
    }
    let store = InMemoryListingStore::new(listings);

    let ranked = recommend(&store, ListingId(1)).await.unwrap();
    assert_eq!(ranked.len(), MAX_RECOMMENDATIONS);
    assert!(ranked.windows(2).all(|w| w[0].total() >= w[1].total()));

    let ids: HashSet<ListingId> = ranked.iter().map(|s| s.id).collect();
    assert_eq!(ids.len(), MAX_RECOMMENDATIONS);
    // cheapest candidates are closest to the reference price
    assert_eq!(ranked[0].id, ListingId(2));
    assert_eq!(ranked[9].id, ListingId(11));
}

#[tokio::test]
async fn test_concurrent_requests_share_one_store() {
    let store: Arc<dyn ListingStore> = Arc::new(downtown_store());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { recommend_ids(store.as_ref(), ListingId(1)).await })
        })
        .collect();

    for handle in handles {
        let ids = handle.await.unwrap().unwrap();
        assert_eq!(ids.len(), 4);
    }
}

// --- HTTP ---

async fn get(path: &str, store: Arc<dyn ListingStore>) -> (StatusCode, Value) {
    let app = create_api_routes(Arc::new(AppState { store }));
    let response = app
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_http_success_envelope() {
    let (status, body) = get("/recommend/1", Arc::new(downtown_store())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], Value::Bool(true));
    let ids = body["data"].as_array().unwrap();
    assert_eq!(ids.len(), 4);
    assert!(ids.iter().all(|id| id.as_i64() != Some(1)));
}

#[tokio::test]
async fn test_http_error_statuses() {
    let store: Arc<dyn ListingStore> = Arc::new(downtown_store());

    let (status, body) = get("/recommend/404", Arc::clone(&store)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], Value::Bool(false));

    let (status, _) = get("/recommend/6", Arc::clone(&store)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get("/recommend/abc", Arc::clone(&store)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("abc"));

    let (status, body) = get("/recommend/1", Arc::new(FailingStore)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], Value::String("listing store unavailable".to_string()));
    assert!(!body.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_http_health_check() {
    let app = create_api_routes(Arc::new(AppState { store: Arc::new(downtown_store()) }));
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}
