//! Runtime configuration read from the environment (and `.env` via dotenvy)

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{anyhow, Context};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub database_max_connections: u32,
    /// Allowed CORS origin; any origin when unset
    pub cors_allowed_origin: Option<String>,
    pub seed_on_startup: bool,
    pub cache_refresh: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url =
            lookup("DATABASE_URL").ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:5000".to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => 5,
        };

        let seed_on_startup = match lookup("SEED_ON_STARTUP") {
            Some(value) => parse_bool(&value).context("SEED_ON_STARTUP must be true or false")?,
            None => true,
        };

        let cache_refresh_secs: u64 = match lookup("CACHE_REFRESH_SECS") {
            Some(value) => value
                .parse()
                .context("CACHE_REFRESH_SECS must be a number of seconds")?,
            None => 10 * 60,
        };
        if cache_refresh_secs == 0 {
            return Err(anyhow!("CACHE_REFRESH_SECS must be greater than zero"));
        }

        Ok(Self {
            database_url,
            bind_addr,
            database_max_connections,
            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN").filter(|o| !o.is_empty()),
            seed_on_startup,
            cache_refresh: Duration::from_secs(cache_refresh_secs),
        })
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("invalid boolean '{}'", other)),
    }
}
