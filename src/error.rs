//! Error types for news-harvester
//!
//! This module provides error handling for the crate, including:
//! - Domain-specific error types (Config, Store, Listing, Extraction)
//! - The crate-wide `Result<T>` alias
//!
//! The error taxonomy mirrors how failures are handled: configuration and
//! store-connect errors are fatal at startup, listing and rerun errors abort
//! one harvest cycle, and extraction errors are isolated per archive.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for news-harvester operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for news-harvester
///
/// Each variant carries enough context to diagnose the failure from a log
/// line alone, since logs are the only error-reporting channel.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "load_url")
        key: Option<String>,
    },

    /// Durable store operation failed
    #[error("store error: {0}")]
    Store(#[from] redis::RedisError),

    /// Directory listing could not be retrieved
    ///
    /// Uniform for every failure mode at that layer (transport error or
    /// non-success status); the caller treats it as fatal-for-this-cycle.
    #[error("directory listing unavailable from {url}: {reason}")]
    ListingUnavailable {
        /// The listing URL that was requested
        url: String,
        /// What went wrong (status code or transport error)
        reason: String,
    },

    /// A single archive transfer failed
    ///
    /// Non-fatal: the orchestrator logs it and moves on to the next archive.
    #[error("download failed for {url}: {reason}")]
    Download {
        /// The archive URL that was requested
        url: String,
        /// What went wrong (status code, transport error, or file error)
        reason: String,
    },

    /// A requested single-archive rerun names a file the listing no longer offers
    #[error("cannot rerun {0}: file is not available in the current listing")]
    RerunUnavailable(String),

    /// Archive extraction error
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// HTTP client error (construction or request-level failure)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error (configuration file parsing)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Archive extraction errors
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Archive is missing or not a readable zip file
    #[error("cannot open archive {path}: {reason}")]
    Open {
        /// The archive file that failed to open
        path: PathBuf,
        /// The underlying open/parse failure
        reason: String,
    },

    /// Archive opened cleanly but holds no members
    #[error("archive {path} is empty")]
    Empty {
        /// The archive file that contained zero members
        path: PathBuf,
    },

    /// A member failed mid-copy; remaining members of the archive are abandoned
    #[error("failed to extract member {member} from {path}: {reason}")]
    Member {
        /// The archive being extracted
        path: PathBuf,
        /// The member that failed
        member: String,
        /// The underlying read/write failure
        reason: String,
    },
}

impl Error {
    /// Shorthand for a configuration error without an associated key
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: None,
        }
    }

    /// Shorthand for a configuration error tied to a specific key
    pub fn config_key(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}
