//! Process configuration (C12), loaded once at bootstrap. Every field here
//! corresponds to a recognized option in the spec's External Interfaces
//! section; both front doors (`api-gateway`, the CLI) load the same
//! [`Config`] via [`Config::from_env`] so they never drift in defaults.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

/// One marketplace's credentials, as referenced by name from
/// `MARKETPLACE_<NAME>_*` env vars (e.g. `MARKETPLACE_AMAZON_API_KEY`).
#[derive(Debug, Clone, Default)]
pub struct MarketplaceCredentialConfig {
    pub api_url: String,
    pub api_key: String,
    pub seller_id: String,
    pub user_token: String,
    pub shop_name: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,

    /// `LOCK_TIMEOUT` (seconds, default 30) — default lease TTL.
    pub lock_timeout: Duration,
    /// `LOCK_RETRY_DELAY` (seconds, default 0.2).
    pub lock_retry_delay: Duration,
    /// `REDLOCK_SERVERS` — redis:// URLs; empty means "use the in-memory
    /// lock", which is the only sane default outside of a real deployment
    /// since there is no localhost Redlock quorum to assume.
    pub redlock_servers: Vec<String>,

    /// `CACHE_TTL_SECONDS` (default 60).
    pub cache_ttl_seconds: u64,
    /// Redis URL for the read cache (C5); `None` falls back to the
    /// process-local in-memory cache.
    pub cache_redis_url: Option<String>,

    /// `TRANSACTION_RETENTION_DAYS` (default 90).
    pub transaction_retention_days: i64,

    /// `WORKER_POOL_SIZE` (default 8).
    pub worker_pool_size: usize,
    /// Bound on the scheduler's job queue; enqueue blocks once full (§4.7).
    pub worker_queue_capacity: usize,

    /// Per-marketplace credentials, keyed by lowercase marketplace name
    /// (`amazon`, `ebay`, `shopify`, ...).
    pub marketplaces: HashMap<String, MarketplaceCredentialConfig>,

    pub http_bind_addr: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl Config {
    /// Loads configuration from the process environment, having first
    /// folded in a `.env` file via `dotenvy` if one is present. Missing
    /// optional values fall back to the defaults named in §6; `DATABASE_URL`
    /// is the one setting with no sane default and is required.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingRequired("DATABASE_URL"))?;

        let lock_timeout_secs: f64 = env_parsed("LOCK_TIMEOUT", 30.0);
        let lock_retry_delay_secs: f64 = env_parsed("LOCK_RETRY_DELAY", 0.2);

        let redlock_servers = env::var("REDLOCK_SERVERS")
            .map(|v| v.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect())
            .unwrap_or_default();

        let cache_redis_url = env::var("CACHE_REDIS_URL").ok().filter(|v| !v.is_empty());

        let marketplaces = Self::load_marketplace_credentials();

        Ok(Self {
            database_url,
            lock_timeout: Duration::from_secs_f64(lock_timeout_secs),
            lock_retry_delay: Duration::from_secs_f64(lock_retry_delay_secs),
            redlock_servers,
            cache_ttl_seconds: env_parsed("CACHE_TTL_SECONDS", 60),
            cache_redis_url,
            transaction_retention_days: env_parsed("TRANSACTION_RETENTION_DAYS", 90),
            worker_pool_size: env_parsed("WORKER_POOL_SIZE", 8),
            worker_queue_capacity: env_parsed("WORKER_QUEUE_CAPACITY", 256),
            marketplaces,
            http_bind_addr: env_or("HTTP_BIND_ADDR", "0.0.0.0:3000"),
        })
    }

    /// `MARKETPLACE_NAMES` is a comma-separated list of marketplace names
    /// to configure; for each, `MARKETPLACE_<NAME>_{API_URL,API_KEY,
    /// SELLER_ID,USER_TOKEN,SHOP_NAME}` are read (blank if unset — each
    /// concrete adapter only reads the field(s) its API needs).
    fn load_marketplace_credentials() -> HashMap<String, MarketplaceCredentialConfig> {
        let names = env::var("MARKETPLACE_NAMES").unwrap_or_default();
        let mut out = HashMap::new();
        for name in names.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let prefix = format!("MARKETPLACE_{}", name.to_uppercase());
            out.insert(
                name.to_lowercase(),
                MarketplaceCredentialConfig {
                    api_url: env_or(&format!("{prefix}_API_URL"), ""),
                    api_key: env_or(&format!("{prefix}_API_KEY"), ""),
                    seller_id: env_or(&format!("{prefix}_SELLER_ID"), ""),
                    user_token: env_or(&format!("{prefix}_USER_TOKEN"), ""),
                    shop_name: env_or(&format!("{prefix}_SHOP_NAME"), ""),
                },
            );
        }
        out
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_parsed_falls_back_to_default_on_missing_or_invalid() {
        assert_eq!(env_parsed::<u64>("__INVENTORY_CONFIG_TEST_UNSET__", 60), 60);
    }

    #[test]
    fn load_marketplace_credentials_reads_only_listed_names() {
        // SAFETY: test-local env mutation, no concurrent access to these keys.
        unsafe {
            env::set_var("MARKETPLACE_NAMES", "amazon");
            env::set_var("MARKETPLACE_AMAZON_API_KEY", "secret");
        }
        let creds = Config::load_marketplace_credentials();
        assert_eq!(creds.len(), 1);
        assert_eq!(creds["amazon"].api_key, "secret");
        unsafe {
            env::remove_var("MARKETPLACE_NAMES");
            env::remove_var("MARKETPLACE_AMAZON_API_KEY");
        }
    }
}
