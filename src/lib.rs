//! # news-harvester
//!
//! Polling dedup-and-ingest pipeline for remote news archive drops.
//!
//! A remote host exposes a plain directory listing of timestamped ZIP
//! archives, each holding news documents. The harvester polls the listing,
//! downloads the archives it has not seen before, extracts them into
//! scratch directories, and pushes each not-yet-loaded document onto a
//! durable output queue for downstream consumers. Two durable membership
//! sets (downloaded archives, loaded documents) make the pipeline
//! idempotent across runs, restarts, and partial failures.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use news_harvester::{Config, Harvester, RedisStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.load_url = "http://news-drop.example.com/mainstream/posts".to_string();
//!
//!     let store = Arc::new(RedisStore::connect(&config.store).await?);
//!     let harvester = Harvester::new(config, store)?;
//!
//!     // Runs once, or forever when config.poll_interval is non-zero
//!     harvester.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Archive transfers into scratch directories
pub mod download;
/// Error types
pub mod error;
/// Archive extraction
pub mod extraction;
/// The harvest cycle and its poll loop
pub mod harvester;
/// Directory listing retrieval and parsing
pub mod listing;
/// Document dedup and queue loading
pub mod loader;
/// Durable membership sets and the output queue
pub mod store;

// Re-export commonly used types
pub use config::{Config, DebugFlags, KeysConfig, ScratchConfig, StoreConfig};
pub use error::{Error, ExtractionError, Result};
pub use harvester::{CycleSummary, Harvester};
pub use store::{MemoryStore, RedisStore, Store};
