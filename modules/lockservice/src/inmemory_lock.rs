use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rand::Rng;
use uuid::Uuid;

use crate::config::LockPolicy;
use crate::error::LockError;
use crate::lease::Lease;
use crate::traits::DistributedLock;

struct Entry {
    holder_id: Uuid,
    expires_at: Instant,
}

/// Single-process lock honoring the same fencing contract as the Redlock
/// backend, for unit tests and for running the crate without a Redis
/// deployment. Offers no cross-process guarantee.
pub struct InMemoryLock {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryLock {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn try_once(&self, resource: &str, ttl: Duration) -> Option<Uuid> {
        let mut entries = self.entries.lock().expect("lock poisoned");
        let now = Instant::now();

        if let Some(existing) = entries.get(resource) {
            if existing.expires_at > now {
                return None;
            }
        }

        let holder_id = Uuid::new_v4();
        entries.insert(
            resource.to_string(),
            Entry {
                holder_id,
                expires_at: now + ttl,
            },
        );
        Some(holder_id)
    }
}

impl Default for InMemoryLock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DistributedLock for InMemoryLock {
    async fn acquire(&self, resource: &str, policy: &LockPolicy) -> Result<Lease, LockError> {
        for attempt in 0..=policy.retry_times {
            if let Some(holder_id) = self.try_once(resource, policy.ttl) {
                return Ok(Lease::new(resource, holder_id, policy.ttl));
            }
            if attempt < policy.retry_times {
                let jitter_ms = rand::thread_rng().gen_range(0..policy.retry_delay.as_millis().max(1) as u64);
                tokio::time::sleep(policy.retry_delay + Duration::from_millis(jitter_ms)).await;
            }
        }
        Err(LockError::Timeout {
            resource: resource.to_string(),
            attempts: policy.retry_times + 1,
        })
    }

    async fn release(&self, lease: Lease) -> Result<(), LockError> {
        let mut entries = self.entries.lock().expect("lock poisoned");
        if let Some(existing) = entries.get(lease.resource()) {
            if existing.holder_id == lease.holder_id() {
                entries.remove(lease.resource());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn second_acquire_blocks_until_release() {
        let lock = InMemoryLock::new();
        let policy = LockPolicy {
            ttl: Duration::from_secs(5),
            retry_times: 0,
            retry_delay: Duration::from_millis(1),
        };

        let lease = lock.acquire("r1", &policy).await.unwrap();
        let err = lock.acquire("r1", &policy).await.unwrap_err();
        assert!(matches!(err, LockError::Timeout { .. }));

        lock.release(lease).await.unwrap();
        assert!(lock.acquire("r1", &policy).await.is_ok());
    }

    #[tokio::test]
    async fn release_is_fenced_by_holder_id() {
        let lock = InMemoryLock::new();
        let policy = LockPolicy {
            ttl: Duration::from_millis(20),
            retry_times: 0,
            retry_delay: Duration::from_millis(1),
        };

        let stale_lease = lock.acquire("r1", &policy).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        let new_lease = lock.acquire("r1", &policy).await.unwrap();

        // Releasing the expired, stale lease must not evict the new holder.
        lock.release(stale_lease).await.unwrap();
        assert_eq!(lock.entries.lock().unwrap().get("r1").unwrap().holder_id, new_lease.holder_id());
    }
}
