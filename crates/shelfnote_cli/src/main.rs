//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `shelfnote_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use shelfnote_core::db::open_store_in_memory;
use shelfnote_core::{FeedService, JsonReviewRepository, SqliteRecordStore};

fn main() {
    println!("shelfnote_core ping={}", shelfnote_core::ping());
    println!("shelfnote_core version={}", shelfnote_core::core_version());

    // End-to-end probe over an in-memory store: open, wire, read the feed.
    match run_store_probe() {
        Ok(feed_len) => println!("store probe ok feed_len={feed_len}"),
        Err(message) => {
            eprintln!("store probe failed: {message}");
            std::process::exit(1);
        }
    }
}

fn run_store_probe() -> Result<usize, String> {
    let conn = open_store_in_memory().map_err(|err| err.to_string())?;
    let store = SqliteRecordStore::try_new(&conn).map_err(|err| err.to_string())?;
    let feed = FeedService::new(JsonReviewRepository::new(store))
        .global_feed()
        .map_err(|err| err.to_string())?;
    Ok(feed.len())
}
