// src/utils/server_config.rs
use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use log::{info, warn};

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_host: String,
    pub port: u16,
    /// JSON listing snapshot to serve instead of PostgreSQL
    pub snapshot_path: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let bind_host = env::var("RECOMMEND_BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                warn!("Invalid PORT '{}', falling back to {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        let snapshot_path = env::var("RECOMMEND_SNAPSHOT_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self { bind_host, port, snapshot_path }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.bind_host, self.port))
    }

    pub fn log_config(&self) {
        info!("🏠 Recommendation server binding to {}:{}", self.bind_host, self.port);
        match &self.snapshot_path {
            Some(path) => info!("   Listing source: JSON snapshot {}", path),
            None => info!("   Listing source: PostgreSQL"),
        }
    }
}
