use std::sync::Arc;

use anyhow::Context;
use log::info;
use recommend_lib::{
    api::{create_api_routes, AppState},
    store::{InMemoryListingStore, ListingStore, PgListingStore},
    utils::{
        db_connect::{connect, get_pool_status},
        env::load_env,
        server_config::ServerConfig,
    },
};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize logging and environment
    env_logger::init();
    info!("Starting listing recommendation server");
    load_env();

    let config = ServerConfig::from_env();
    config.log_config();
    let addr = config.socket_addr()?;

    let store: Arc<dyn ListingStore> = match &config.snapshot_path {
        Some(path) => Arc::new(
            InMemoryListingStore::from_json_file(path)
                .context("Failed to load listing snapshot")?,
        ),
        None => {
            let pool = connect().await.context("Failed to connect to database")?;
            let (connections, idle) = get_pool_status(&pool);
            info!("Successfully connected to the database ({} connections, {} idle)", connections, idle);
            Arc::new(PgListingStore::new(pool))
        }
    };

    let app = create_api_routes(Arc::new(AppState { store }));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server is running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}
