//! Per-document dedup and queue loading.
//!
//! Extraction hands over member names; for each one the loader makes the
//! atomic claim against the loaded-documents set and, when the claim is
//! fresh, pushes the member's whole file content onto the output queue.
//! The claim is what guarantees at-most-once delivery: it stays in place
//! even when the read or push afterwards fails, so a later run will not
//! deliver the same document twice.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::store::Store;

/// Counts from one loading pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Members newly claimed and loaded this pass
    pub loaded: usize,
    /// Members skipped because they were already in the loaded set
    pub skipped: usize,
}

/// Loads extracted documents onto the durable output queue, once each.
pub struct DocumentLoader {
    store: Arc<dyn Store>,
    loaded_set_key: String,
    queue_key: String,
    skip_content_push: bool,
}

impl DocumentLoader {
    /// Create a loader bound to the configured set and queue keys.
    pub fn new(store: Arc<dyn Store>, config: &Config) -> Self {
        Self {
            store,
            loaded_set_key: config.keys.loaded_set_key(),
            queue_key: config.keys.output_queue.clone(),
            skip_content_push: config.debug.skip_content_push,
        }
    }

    /// Load each member found under `dir`, in order.
    ///
    /// Per-member failures (claim error, unreadable file, push error) are
    /// logged and excluded from both counts; they never abort the pass.
    pub async fn load_members(&self, dir: &Path, members: &[String]) -> LoadOutcome {
        let mut outcome = LoadOutcome::default();

        for member in members {
            match self.load_one(dir, member).await {
                Ok(true) => outcome.loaded += 1,
                Ok(false) => {
                    debug!("Already loaded {}", member);
                    outcome.skipped += 1;
                }
                Err(e) => warn!("Failed to load {}: {}", member, e),
            }
        }

        outcome
    }

    /// Claim one member and push its content. Returns `false` when the
    /// member was already loaded.
    async fn load_one(&self, dir: &Path, member: &str) -> Result<bool> {
        if !self
            .store
            .insert_if_absent(&self.loaded_set_key, member)
            .await?
        {
            return Ok(false);
        }

        // The claim above stands even if the steps below fail
        if self.skip_content_push {
            info!("Skipping content push for {}", member);
            return Ok(true);
        }

        let content = tokio::fs::read(dir.join(member)).await?;
        self.store.queue_push(&self.queue_key, &content).await?;

        debug!(
            "Loaded {} ({} bytes) onto {}",
            member,
            content.len(),
            self.queue_key
        );
        Ok(true)
    }
}
