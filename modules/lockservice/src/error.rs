/// Errors surfaced by the distributed lock service.
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not acquire lock on {resource} after {attempts} attempt(s)")]
    Timeout { resource: String, attempts: u32 },

    #[error("quorum not reached for {resource}: {acquired}/{needed} servers")]
    QuorumNotReached {
        resource: String,
        acquired: usize,
        needed: usize,
    },

    #[error("lock backend error: {0}")]
    Backend(String),

    #[error("the critical section for {resource} failed: {0}")]
    CriticalSection(String),
}

impl LockError {
    /// Coarse outcome label for the C9 `inventory_lock_attempts_total` metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            LockError::Timeout { .. } => "timeout",
            LockError::QuorumNotReached { .. } => "quorum_fail",
            LockError::Backend(_) | LockError::CriticalSection(_) => "error",
        }
    }
}
