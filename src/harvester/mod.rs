//! The harvest cycle and its poll loop.
//!
//! One cycle walks the whole pipeline: fetch and parse the remote listing,
//! claim unseen archives against the downloaded set, download them into a
//! fresh run directory, extract each archive into its own subdirectory,
//! load not-yet-seen documents onto the output queue, then sweep the
//! scratch tree. A listing failure aborts the cycle; failures further down
//! are contained per archive or per document.
//!
//! Dedup claims are made up front and never rolled back. An archive that
//! fails to download or extract is therefore consumed, not retried; the
//! durable sets trade re-delivery for idempotence across runs and crashes.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::download::ArchiveDownloader;
use crate::error::{Error, Result};
use crate::extraction::ZipExtractor;
use crate::listing::ListingClient;
use crate::loader::{DocumentLoader, LoadOutcome};
use crate::store::{Store, claim_unseen};


/// Counts from one harvest cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    /// Archive names parsed out of the listing
    pub candidates: usize,
    /// Names that survived rerun narrowing, dedup, and the single-file
    /// override
    pub accepted: usize,
    /// Archives extracted and loaded without an archive-level error
    pub archives_processed: usize,
    /// Documents newly pushed to the output queue
    pub documents_loaded: usize,
    /// Documents skipped as already loaded
    pub documents_skipped: usize,
}

/// Drives the dedup-and-ingest pipeline.
pub struct Harvester {
    config: Config,
    store: Arc<dyn Store>,
    listing: ListingClient,
    downloader: ArchiveDownloader,
    loader: DocumentLoader,
    downloaded_set_key: String,
}

impl Harvester {
    /// Create a harvester from a validated configuration and a connected
    /// store.
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client cannot be created.
    pub fn new(config: Config, store: Arc<dyn Store>) -> Result<Self> {
        let listing = ListingClient::new(config.load_url.clone())?;
        let downloader = ArchiveDownloader::new(config.load_url.clone())?;
        let loader = DocumentLoader::new(store.clone(), &config);
        let downloaded_set_key = config.keys.downloaded_set_key();

        Ok(Self {
            config,
            store,
            listing,
            downloader,
            loader,
            downloaded_set_key,
        })
    }

    /// Run cycles forever at the configured interval, or exactly once when
    /// the interval is zero.
    ///
    /// In the polling mode a failed cycle is logged and the loop keeps
    /// going; in run-once mode the failure is returned to the caller.
    pub async fn run(&self) -> Result<()> {
        let interval = self.config.poll_interval;

        if interval.is_zero() {
            debug!("Running just once");
            self.run_cycle().await?;
            return Ok(());
        }

        let mut iteration: u64 = 1;
        loop {
            debug!(
                "Running every {} seconds, iteration {}",
                interval.as_secs(),
                iteration
            );
            if let Err(e) = self.run_cycle().await {
                error!("Harvest cycle failed: {}", e);
            }
            tokio::time::sleep(interval).await;
            iteration += 1;
        }
    }

    /// Run one harvest cycle end to end.
    ///
    /// # Errors
    ///
    /// Returns an error when the listing cannot be fetched, when a rerun
    /// names an archive the listing no longer offers, when the dedup pass
    /// hits a store error, or when the run scratch directory cannot be
    /// created. Archive-level and document-level failures are logged and
    /// absorbed.
    pub async fn run_cycle(&self) -> Result<CycleSummary> {
        let mut summary = CycleSummary::default();

        let body = self.listing.fetch().await?;
        let mut names = self.listing.parse(&body);
        summary.candidates = names.len();

        // Narrowing happens before dedup, so rerunning an archive that was
        // already downloaded dedups away below rather than repeating work.
        if let Some(rerun) = &self.config.rerun
            && !rerun.is_empty()
        {
            if names.iter().any(|n| n == rerun) {
                names = vec![rerun.clone()];
            } else {
                return Err(Error::RerunUnavailable(rerun.clone()));
            }
        }

        let mut accepted =
            claim_unseen(self.store.as_ref(), &self.downloaded_set_key, &names).await?;

        if self.config.debug.single_file && accepted.len() > 1 {
            info!(
                "Debug flag single_file is on, list reduced from {:?} to {:?}",
                accepted,
                &accepted[..1]
            );
            accepted.truncate(1);
        }
        summary.accepted = accepted.len();

        if accepted.is_empty() {
            info!("No new files to process");
            return Ok(summary);
        }
        debug!("Processing {:?}", accepted);

        let run_dir = tempfile::Builder::new()
            .prefix(&self.config.scratch.prefix)
            .tempdir_in(&self.config.scratch.root)?
            .keep();
        debug!("Run scratch directory {}", run_dir.display());

        let archives = self.downloader.download_all(&accepted, &run_dir).await;

        for (name, archive_path) in accepted.iter().zip(&archives) {
            match self.process_archive(name, archive_path, &run_dir).await {
                Ok(outcome) => {
                    summary.archives_processed += 1;
                    summary.documents_loaded += outcome.loaded;
                    summary.documents_skipped += outcome.skipped;
                }
                Err(e) => warn!("Failed to process {}: {}", name, e),
            }
        }

        self.cleanup(&run_dir).await;

        info!(
            "Cycle complete: {} of {} archives processed, {} documents loaded, {} skipped",
            summary.archives_processed, summary.accepted, summary.documents_loaded,
            summary.documents_skipped
        );
        Ok(summary)
    }

    /// Extract one downloaded archive into its own subdirectory and load
    /// its members.
    ///
    /// The subdirectory is removed on success; on failure it stays behind
    /// for the end-of-cycle sweep, which also covers the retain-scratch
    /// override.
    async fn process_archive(
        &self,
        name: &str,
        archive_path: &Path,
        run_dir: &Path,
    ) -> Result<LoadOutcome> {
        let extract_dir = tempfile::Builder::new()
            .prefix(name)
            .tempdir_in(run_dir)?
            .keep();

        let members = ZipExtractor::extract(archive_path, &extract_dir)?;

        if self.config.debug.print_extracted {
            info!(
                "Members of {} in {}: {:?}",
                archive_path.display(),
                extract_dir.display(),
                members
            );
        }

        let outcome = self.loader.load_members(&extract_dir, &members).await;

        if !self.config.debug.retain_scratch
            && let Err(e) = tokio::fs::remove_dir_all(&extract_dir).await
        {
            warn!("Failed to remove {}: {}", extract_dir.display(), e);
        }

        Ok(outcome)
    }

    /// Remove the run directory and anything left inside it.
    async fn cleanup(&self, run_dir: &Path) {
        if self.config.debug.retain_scratch {
            debug!("Retaining scratch directory {}", run_dir.display());
            return;
        }
        if let Err(e) = tokio::fs::remove_dir_all(run_dir).await {
            warn!("Failed to remove {}: {}", run_dir.display(), e);
        }
    }
}
