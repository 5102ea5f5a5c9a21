//! Remote directory listing retrieval and parsing
//!
//! The listing endpoint serves an HTML index page. We do not parse the
//! markup; the only lines of interest look like:
//!
//! ```text
//! <tr><td><a href="1471622300928.zip">1471622300928.zip</a></td><td align="right">19-Aug-2016 19:02  </td>...
//! ```
//!
//! so the parser is a deliberate line-oriented pattern match, not an HTML
//! parser. Any other listing shape yields zero entries rather than an error.

use crate::error::{Error, Result};
use regex::Regex;
use std::time::Duration;
use tracing::debug;

/// Timeout for the listing request.
const LISTING_TIMEOUT_SECS: u64 = 30;

/// One archive entry per line: an anchor whose target is decimal digits
/// followed by the literal `.zip` extension.
const ENTRY_PATTERN: &str = r#"<tr><td><a href="([0-9]+\.zip)">"#;

/// Fetches the remote directory listing and extracts archive filenames.
pub struct ListingClient {
    /// HTTP client for the listing endpoint
    http_client: reqwest::Client,

    /// Base URL of the remote directory
    base_url: String,

    /// Compiled line pattern for listing entries
    entry_pattern: Regex,
}

impl ListingClient {
    /// Create a listing client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(LISTING_TIMEOUT_SECS))
            .user_agent(concat!("news-harvester/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let entry_pattern = Regex::new(ENTRY_PATTERN)
            .map_err(|e| Error::config(format!("invalid listing entry pattern: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            entry_pattern,
        })
    }

    /// Retrieve the raw listing body.
    ///
    /// One buffered GET, no retries. A transport error, an error status,
    /// and an unreadable body all map to the same
    /// [`Error::ListingUnavailable`], which the caller treats as fatal for
    /// the current cycle.
    pub async fn fetch(&self) -> Result<String> {
        debug!("Fetching directory listing from {}", self.base_url);

        let response = self
            .http_client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| Error::ListingUnavailable {
                url: self.base_url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ListingUnavailable {
                url: self.base_url.clone(),
                reason: format!("status {}", status.as_u16()),
            });
        }

        response.text().await.map_err(|e| Error::ListingUnavailable {
            url: self.base_url.clone(),
            reason: format!("failed to read body: {}", e),
        })
    }

    /// Extract archive filenames from a listing body, in line order.
    ///
    /// The body is split on `\n` and each line is tested independently, so
    /// an entry spanning multiple lines is not recognized. At most one name
    /// is taken per line. No matching lines yields an empty vector, not an
    /// error.
    pub fn parse(&self, body: &str) -> Vec<String> {
        let names: Vec<String> = body
            .lines()
            .filter_map(|line| {
                self.entry_pattern
                    .captures(line)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str().to_string())
            })
            .collect();

        debug!("Parsed {} archive entries from listing", names.len());
        names
    }

    /// The base URL this client was created with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
