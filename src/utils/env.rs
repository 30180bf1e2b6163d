// src/utils/env.rs

use log::{debug, info};

/// Loads variables from a `.env` file if one exists. Already-set variables win.
pub fn load_env() {
    match dotenv::dotenv() {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env file loaded ({}); using process environment", e),
    }
}
