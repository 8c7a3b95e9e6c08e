use std::{fs, path::Path};

use serde::Deserialize;

use crate::{errors::Error, Result};

/// Typed configuration, read from a JSON file:
///
/// ```json
/// {
///   "token": "123:abc",
///   "redis-address": "localhost:6379",
///   "redis-db-id": 0,
///   "redis-prefix": "myrelay"
/// }
/// ```
///
/// Only the token is required. An unset prefix defaults to a value derived
/// from the token, so deployments sharing one Redis never collide.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub token: String,

    #[serde(rename = "redis-address", default = "default_redis_address")]
    pub redis_address: String,

    #[serde(rename = "redis-db-id", default)]
    pub redis_db: i64,

    #[serde(rename = "redis-prefix", default)]
    pub redis_prefix: String,
}

fn default_redis_address() -> String {
    "localhost:6379".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let mut cfg: Config = serde_json::from_str(&raw)?;

        if cfg.token.trim().is_empty() {
            return Err(Error::Config("token must not be empty".to_string()));
        }
        if cfg.redis_prefix.is_empty() {
            cfg.redis_prefix = format!("reposter:bot{}", cfg.token);
        }

        Ok(cfg)
    }
}
