use std::fmt;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::Result;

use super::Store;

/// Redis-backed store. Sets are Redis sets, the output queue is a Redis
/// list pushed from the left so consumers can `RPOP` in arrival order.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore")
            .field("connection", &"ConnectionManager")
            .finish()
    }
}

impl RedisStore {
    /// Connect to the server described by `config`.
    ///
    /// The connection manager reconnects on its own after transient
    /// failures, so individual operations fail only while the server is
    /// actually unreachable.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        info!("Connecting to store at {}:{}", config.host, config.port);

        let client = redis::Client::open(config.connection_url())?;
        let conn = ConnectionManager::new(client).await?;

        info!("Connected to store at {}:{}", config.host, config.port);

        Ok(Self { conn })
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn insert_if_absent(&self, set_key: &str, member: &str) -> Result<bool> {
        // SADD returns the number of members added, which doubles as the
        // atomic seen-before check.
        let mut conn = self.conn.clone();
        let added: i64 = conn.sadd(set_key, member).await?;
        debug!("SADD {} {} -> {}", set_key, member, added);
        Ok(added == 1)
    }

    async fn contains(&self, set_key: &str, member: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let present: bool = conn.sismember(set_key, member).await?;
        Ok(present)
    }

    async fn queue_push(&self, queue_key: &str, content: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.lpush::<_, _, ()>(queue_key, content).await?;
        debug!("LPUSH {} ({} bytes)", queue_key, content.len());
        Ok(())
    }
}
