// src/utils/db_connect.rs

use std::time::Duration;

use anyhow::{Context, Result};
use bb8::Pool;
use bb8_postgres::PostgresConnectionManager;
use log::{info, warn};
use tokio_postgres::{Config, NoTls};

pub type PgPool = Pool<PostgresConnectionManager<NoTls>>;

const DEFAULT_POOL_MAX_SIZE: u32 = 16;

/// Connection settings read from `POSTGRES_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
    pub pool_max_size: u32,
}

impl DbSettings {
    pub fn from_env() -> Self {
        let port = match std::env::var("POSTGRES_PORT") {
            Ok(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                warn!("Invalid POSTGRES_PORT '{}', using 5432", raw);
                5432
            }),
            Err(_) => 5432,
        };
        let pool_max_size = match std::env::var("DB_POOL_MAX_SIZE") {
            Ok(raw) => raw.parse::<u32>().ok().filter(|n| *n > 0).unwrap_or_else(|| {
                warn!("Invalid DB_POOL_MAX_SIZE '{}', using {}", raw, DEFAULT_POOL_MAX_SIZE);
                DEFAULT_POOL_MAX_SIZE
            }),
            Err(_) => DEFAULT_POOL_MAX_SIZE,
        };

        Self {
            host: std::env::var("POSTGRES_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            dbname: std::env::var("POSTGRES_DB").unwrap_or_else(|_| "listings".to_string()),
            user: std::env::var("POSTGRES_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: std::env::var("POSTGRES_PASSWORD").unwrap_or_default(),
            pool_max_size,
        }
    }

    fn to_pg_config(&self) -> Config {
        let mut config = Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .dbname(&self.dbname)
            .user(&self.user)
            .password(&self.password);
        config.application_name("listing_recommender");
        config.connect_timeout(Duration::from_secs(10));
        config
    }
}

/// Initializes the database connection pool and checks it with `SELECT 1`.
pub async fn connect() -> Result<PgPool> {
    let settings = DbSettings::from_env();
    info!(
        "DB Config: Host={}, Port={}, DB={}, User={}, PoolMax={}",
        settings.host, settings.port, settings.dbname, settings.user, settings.pool_max_size
    );

    info!("Connecting to PostgreSQL database...");
    let manager = PostgresConnectionManager::new(settings.to_pg_config(), NoTls);
    let pool = Pool::builder()
        .max_size(settings.pool_max_size)
        .min_idle(Some(1))
        .idle_timeout(Some(Duration::from_secs(180)))
        .connection_timeout(Duration::from_secs(15))
        .build(manager)
        .await
        .context("Failed to build database connection pool")?;

    let conn = pool
        .get()
        .await
        .context("Failed to get test connection from pool")?;
    conn.query_one("SELECT 1", &[])
        .await
        .context("Test query 'SELECT 1' failed")?;
    drop(conn);

    info!("Database connection pool initialized successfully.");
    Ok(pool)
}

/// Returns (connections, idle_connections) for the pool.
pub fn get_pool_status(pool: &PgPool) -> (u32, u32) {
    let state = pool.state();
    (state.connections, state.idle_connections)
}
