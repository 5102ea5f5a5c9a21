//! Durable membership sets and the output queue.
//!
//! The pipeline records two facts durably: which archives have been
//! downloaded and which extracted documents have been loaded. Both are
//! membership sets keyed by name. Loaded document content is handed off
//! through a durable queue that downstream consumers drain independently.
//!
//! [`Store`] is the seam between the pipeline and the backing store.
//! [`RedisStore`] is the production implementation; [`MemoryStore`] backs
//! tests that exercise pipeline logic without a running server.

mod memory;
mod redis;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use memory::MemoryStore;
pub use redis::RedisStore;

use async_trait::async_trait;

use crate::error::Result;

/// Durable set membership and queue operations used by the pipeline.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert `member` into the set at `set_key` if it is not already
    /// present. Returns `true` if the member was inserted, `false` if it
    /// was already a member. The check and insert are a single atomic
    /// operation; the returned flag is the dedup decision.
    async fn insert_if_absent(&self, set_key: &str, member: &str) -> Result<bool>;

    /// Whether `member` is present in the set at `set_key`.
    async fn contains(&self, set_key: &str, member: &str) -> Result<bool>;

    /// Push `content` onto the queue at `queue_key`.
    async fn queue_push(&self, queue_key: &str, content: &[u8]) -> Result<()>;
}

/// Filter `candidates` down to the names not yet present in the set at
/// `set_key`, claiming each unseen name as a side effect.
///
/// Order is preserved. A name that appears in the set stays claimed even
/// if later stages fail, so a retry skips it; callers trade re-delivery
/// for at-most-once processing. Store errors abort the pass.
pub async fn claim_unseen(
    store: &dyn Store,
    set_key: &str,
    candidates: &[String],
) -> Result<Vec<String>> {
    let mut unseen = Vec::new();
    for name in candidates {
        if store.insert_if_absent(set_key, name).await? {
            unseen.push(name.clone());
        }
    }
    Ok(unseen)
}
