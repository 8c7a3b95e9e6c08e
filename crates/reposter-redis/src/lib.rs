//! Redis adapter for the list store.
//!
//! Chat ids live in Redis as decimal strings inside plain sets, one set per
//! list, all under the deployment's key prefix. This crate is the only place
//! that encodes ids to strings and parses them back.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};

use reposter_core::{
    config::Config,
    domain::ChatId,
    errors::Error,
    store::{ListKind, ListStore},
    Result,
};

pub struct RedisListStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisListStore {
    /// Connect using the address, database index and prefix from the config.
    pub async fn connect(cfg: &Config) -> Result<Self> {
        let url = format!("redis://{}/{}", cfg.redis_address, cfg.redis_db);
        let client = redis::Client::open(url).map_err(map_err)?;
        let conn = ConnectionManager::new(client).await.map_err(map_err)?;

        Ok(Self {
            conn,
            prefix: cfg.redis_prefix.clone(),
        })
    }

    fn key(&self, list: ListKind) -> String {
        key(&self.prefix, list)
    }
}

fn key(prefix: &str, list: ListKind) -> String {
    format!("{prefix}:{}", list.key_suffix())
}

fn map_err(e: redis::RedisError) -> Error {
    Error::Store(e.to_string())
}

#[async_trait]
impl ListStore for RedisListStore {
    async fn add(&self, list: ListKind, id: ChatId) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: i64 = conn
            .sadd(self.key(list), id.to_string())
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn remove(&self, list: ListKind, id: ChatId) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: i64 = conn
            .srem(self.key(list), id.to_string())
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn contains(&self, list: ListKind, id: ChatId) -> Result<bool> {
        let mut conn = self.conn.clone();
        conn.sismember(self.key(list), id.to_string())
            .await
            .map_err(map_err)
    }

    async fn members(&self, list: ListKind) -> Result<Vec<ChatId>> {
        let mut conn = self.conn.clone();
        let raw: Vec<String> = conn.smembers(self.key(list)).await.map_err(map_err)?;
        raw.iter().map(|s| s.parse()).collect()
    }

    async fn clear_all(&self) -> Result<()> {
        let keys: Vec<String> = ListKind::ALL.iter().map(|l| self.key(*l)).collect();
        let mut conn = self.conn.clone();
        let _: i64 = conn.del(keys).await.map_err(map_err)?;
        Ok(())
    }
}
