use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::Result;

use super::Store;

#[derive(Default)]
struct Inner {
    sets: HashMap<String, HashSet<String>>,
    queues: HashMap<String, Vec<Vec<u8>>>,
}

/// In-memory store with the same semantics as [`RedisStore`](super::RedisStore),
/// used by tests that exercise pipeline logic without a running server.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members in the set at `set_key`.
    pub async fn set_len(&self, set_key: &str) -> usize {
        let inner = self.inner.lock().await;
        inner.sets.get(set_key).map_or(0, HashSet::len)
    }

    /// Snapshot of the queue at `queue_key`, oldest push first.
    pub async fn queue_contents(&self, queue_key: &str) -> Vec<Vec<u8>> {
        let inner = self.inner.lock().await;
        inner.queues.get(queue_key).cloned().unwrap_or_default()
    }

    /// Number of entries in the queue at `queue_key`.
    pub async fn queue_len(&self, queue_key: &str) -> usize {
        let inner = self.inner.lock().await;
        inner.queues.get(queue_key).map_or(0, Vec::len)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_if_absent(&self, set_key: &str, member: &str) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        let inserted = inner
            .sets
            .entry(set_key.to_owned())
            .or_default()
            .insert(member.to_owned());
        Ok(inserted)
    }

    async fn contains(&self, set_key: &str, member: &str) -> Result<bool> {
        let inner = self.inner.lock().await;
        Ok(inner.sets.get(set_key).is_some_and(|set| set.contains(member)))
    }

    async fn queue_push(&self, queue_key: &str, content: &[u8]) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner
            .queues
            .entry(queue_key.to_owned())
            .or_default()
            .push(content.to_owned());
        Ok(())
    }
}
