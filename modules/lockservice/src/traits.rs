use std::future::Future;

use async_trait::async_trait;

use crate::config::LockPolicy;
use crate::error::LockError;
use crate::lease::Lease;

/// Port implemented by every lock backend (Redlock-over-Redis in
/// production, an in-process mutex for tests).
#[async_trait]
pub trait DistributedLock: Send + Sync {
    /// Blocks (with randomized backoff between attempts) until the lock is
    /// granted or `policy.retry_times` attempts are exhausted.
    async fn acquire(&self, resource: &str, policy: &LockPolicy) -> Result<Lease, LockError>;

    /// Releases a lease this caller holds. A no-op, not an error, if the
    /// lease already expired — a fencing check ensures a caller can never
    /// delete a successor's lock.
    async fn release(&self, lease: Lease) -> Result<(), LockError>;
}

/// The explicit combinator called out as replacing the source's
/// decorator-composed locking: acquires `resource`, runs `f` with the
/// granted lease, and releases on every exit path — success, business
/// error, or infrastructural error alike.
///
/// `f` receives the [`Lease`] so long-running bodies can check
/// [`Lease::remaining`] and bail out early rather than run past their
/// validity window.
pub async fn critical_section<L, F, Fut, T, E>(
    lock: &L,
    resource: &str,
    policy: &LockPolicy,
    f: F,
) -> Result<T, E>
where
    L: DistributedLock + ?Sized,
    F: FnOnce(Lease) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: From<LockError>,
{
    let lease = lock.acquire(resource, policy).await.map_err(E::from)?;
    let result = f(lease.clone()).await;

    if let Err(release_err) = lock.release(lease).await {
        tracing::warn!(resource, error = %release_err, "failed to release distributed lock; it will self-expire via TTL");
    }

    result
}
