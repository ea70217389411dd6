use std::time::{Duration, Instant};

use async_trait::async_trait;
use rand::Rng;
use redis::aio::ConnectionManager;
use redis::{Client, Script};
use uuid::Uuid;

use crate::config::{LockPolicy, RedlockConfig};
use crate::error::LockError;
use crate::lease::Lease;
use crate::traits::DistributedLock;

/// `DEL key IF GET(key) == holder_id`, atomically, so a caller can never
/// delete a lock it no longer owns (e.g. after its own lease expired and a
/// successor already acquired it).
const RELEASE_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
else
    return 0
end
"#;

/// Redlock-style quorum lock over `N` independent Redis nodes. Acquisition
/// requires `⌊N/2⌋+1` successful `SET NX PX` calls completed within the
/// remaining validity window; release compare-and-deletes on every node.
pub struct RedlockLock {
    nodes: Vec<ConnectionManager>,
    config: RedlockConfig,
    release_script: Script,
}

impl RedlockLock {
    pub async fn connect(config: RedlockConfig) -> Result<Self, LockError> {
        if config.node_urls.is_empty() {
            return Err(LockError::Backend("no Redlock node URLs configured".into()));
        }

        let mut nodes = Vec::with_capacity(config.node_urls.len());
        for url in &config.node_urls {
            let client = Client::open(url.as_str()).map_err(|e| LockError::Backend(e.to_string()))?;
            let manager = client
                .get_connection_manager()
                .await
                .map_err(|e| LockError::Backend(e.to_string()))?;
            nodes.push(manager);
        }

        Ok(Self {
            nodes,
            config,
            release_script: Script::new(RELEASE_SCRIPT),
        })
    }

    fn drift(ttl: Duration) -> Duration {
        Duration::from_secs_f64(ttl.as_secs_f64() * 0.01) + Duration::from_millis(2)
    }

    /// A single set-on-every-node attempt. Returns the count of servers
    /// that accepted the NX set and the wall-clock spent doing so.
    async fn try_once(&self, resource: &str, holder_id: Uuid, ttl: Duration) -> (usize, Duration) {
        let started = Instant::now();
        let mut acquired = 0usize;
        let ttl_ms = ttl.as_millis() as i64;

        for node in &self.nodes {
            let mut conn = node.clone();
            // `SET key value NX PX ttl` in one round trip: acquisition and
            // expiry land atomically, so a node can never be left holding
            // the key with no TTL (§4.3: "NX + PX(ttl)").
            let per_node = tokio::time::timeout(
                self.config.per_node_timeout,
                redis::cmd("SET")
                    .arg(resource)
                    .arg(holder_id.to_string())
                    .arg("NX")
                    .arg("PX")
                    .arg(ttl_ms)
                    .query_async::<Option<String>>(&mut conn),
            )
            .await;

            let set_ok = matches!(per_node, Ok(Ok(Some(_))));

            if set_ok {
                acquired += 1;
            }
        }

        (acquired, started.elapsed())
    }

    async fn release_everywhere(&self, resource: &str, holder_id: Uuid) {
        for node in &self.nodes {
            let mut conn = node.clone();
            let _: Result<i64, _> = self
                .release_script
                .key(resource)
                .arg(holder_id.to_string())
                .invoke_async(&mut conn)
                .await;
        }
    }
}

#[async_trait]
impl DistributedLock for RedlockLock {
    async fn acquire(&self, resource: &str, policy: &LockPolicy) -> Result<Lease, LockError> {
        let quorum = self.config.quorum();
        let drift = Self::drift(policy.ttl);
        let mut last_acquired = 0usize;

        for attempt in 0..=policy.retry_times {
            let holder_id = Uuid::new_v4();
            let (acquired, elapsed) = self.try_once(resource, holder_id, policy.ttl).await;
            last_acquired = acquired;

            let validity = policy.ttl.saturating_sub(elapsed).saturating_sub(drift);

            if acquired >= quorum && !validity.is_zero() {
                return Ok(Lease::new(resource, holder_id, validity));
            }

            self.release_everywhere(resource, holder_id).await;

            if attempt < policy.retry_times {
                let jitter_ms = rand::thread_rng().gen_range(0..policy.retry_delay.as_millis().max(1) as u64);
                tokio::time::sleep(policy.retry_delay + Duration::from_millis(jitter_ms)).await;
            }
        }

        if last_acquired < quorum {
            Err(LockError::QuorumNotReached {
                resource: resource.to_string(),
                acquired: last_acquired,
                needed: quorum,
            })
        } else {
            Err(LockError::Timeout {
                resource: resource.to_string(),
                attempts: policy.retry_times + 1,
            })
        }
    }

    async fn release(&self, lease: Lease) -> Result<(), LockError> {
        self.release_everywhere(lease.resource(), lease.holder_id()).await;
        Ok(())
    }
}
