//! Sequential archive transfers into the run's scratch directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Timeout for a single archive transfer. Archives run to tens of
/// megabytes, so this is far more generous than the listing timeout.
const DOWNLOAD_TIMEOUT_SECS: u64 = 300;

/// Downloads accepted archives from the listing host.
pub struct ArchiveDownloader {
    /// HTTP client shared across all transfers of a run
    http_client: reqwest::Client,

    /// Base URL of the remote directory
    base_url: String,
}

impl ArchiveDownloader {
    /// Create a downloader for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .user_agent(concat!("news-harvester/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    /// Download each named archive into `dest_dir`, sequentially.
    ///
    /// The destination path for every name is recorded in the returned list
    /// before its transfer is attempted, so a failed transfer leaves a
    /// recorded path whose file is missing or partial; extraction validates
    /// the file on its own. Per-name failures are logged and never abort
    /// the batch.
    pub async fn download_all(&self, names: &[String], dest_dir: &Path) -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(names.len());

        for name in names {
            let dest = dest_dir.join(name);
            paths.push(dest.clone());

            if let Err(e) = self.download_one(name, &dest).await {
                warn!("{}", e);
            }
        }

        paths
    }

    /// Transfer one archive, buffering the whole body before writing.
    ///
    /// Every failure mode maps to [`Error::Download`] so the caller's log
    /// line carries the URL and cause in one place.
    async fn download_one(&self, name: &str, dest: &Path) -> Result<()> {
        let url = format!("{}/{}", self.base_url, name);
        debug!("Downloading {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Download {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Download {
                url,
                reason: format!("status {}", status.as_u16()),
            });
        }

        let body = response.bytes().await.map_err(|e| Error::Download {
            url: url.clone(),
            reason: format!("failed to read body: {}", e),
        })?;

        tokio::fs::write(dest, &body)
            .await
            .map_err(|e| Error::Download {
                url,
                reason: format!("failed to write {}: {}", dest.display(), e),
            })?;

        debug!("Wrote {} bytes to {}", body.len(), dest.display());
        Ok(())
    }
}
