use std::time::Duration;

/// Tuning for a single `acquire` call. The flash-sale namespace uses a
/// distinct, much more aggressive policy than ordinary reservations.
#[derive(Debug, Clone)]
pub struct LockPolicy {
    pub ttl: Duration,
    pub retry_times: u32,
    pub retry_delay: Duration,
}

impl LockPolicy {
    /// `LOCK_TIMEOUT` / `LOCK_RETRY_TIMES` / `LOCK_RETRY_DELAY_MS` defaults.
    pub fn standard() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            retry_times: 3,
            retry_delay: Duration::from_millis(200),
        }
    }

    /// `inventory:flashsale:{pid}` — short ttl, aggressive retry.
    pub fn flash_sale() -> Self {
        Self {
            ttl: Duration::from_secs(5),
            retry_times: 10,
            retry_delay: Duration::from_millis(50),
        }
    }
}

/// Redis node endpoints backing the quorum. `REDLOCK_NODES` is expected to
/// hold an odd count ≥ 3 for a meaningful quorum; smaller counts are
/// accepted (e.g. in tests) but degrade the majority guarantee.
#[derive(Debug, Clone)]
pub struct RedlockConfig {
    pub node_urls: Vec<String>,
    /// Per-server socket timeout, kept well below any `LockPolicy::ttl` so
    /// one dead node cannot stall the whole acquisition attempt.
    pub per_node_timeout: Duration,
}

impl RedlockConfig {
    pub fn new(node_urls: Vec<String>) -> Self {
        Self {
            node_urls,
            per_node_timeout: Duration::from_millis(50),
        }
    }

    pub fn quorum(&self) -> usize {
        self.node_urls.len() / 2 + 1
    }
}
