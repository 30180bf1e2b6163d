// src/bin/recommend.rs
//! One-shot recommendation lookup from the command line.
//!
//! Usage: `recommend <LISTING_ID> [--snapshot listings.json]`

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use recommend_lib::{
    models::ListingId,
    recommendation::recommend,
    store::{InMemoryListingStore, ListingStore, PgListingStore},
    utils::{db_connect::connect, env::load_env},
};

#[derive(Parser, Debug)]
#[command(name = "recommend", about = "Print the listings most similar to a reference listing")]
struct Args {
    /// Reference listing (APN)
    listing_id: i64,

    /// Read listings from a JSON snapshot instead of PostgreSQL
    #[arg(long)]
    snapshot: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    load_env();
    let args = Args::parse();

    let store: Box<dyn ListingStore> = match &args.snapshot {
        Some(path) => Box::new(InMemoryListingStore::from_json_file(path)?),
        None => Box::new(PgListingStore::new(
            connect().await.context("Failed to connect to database")?,
        )),
    };

    let ranked = recommend(store.as_ref(), ListingId(args.listing_id))
        .await
        .with_context(|| format!("Failed to recommend for listing {}", args.listing_id))?;

    info!("{} recommendations for listing {}", ranked.len(), args.listing_id);
    for scored in ranked {
        println!("{}", scored.id);
    }
    Ok(())
}
