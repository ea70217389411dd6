use std::time::{Duration, Instant};

use uuid::Uuid;

/// A granted lock. Carries the information needed to release or extend it,
/// and the deadline past which the holder can no longer assume exclusivity.
#[derive(Debug, Clone)]
pub struct Lease {
    resource: String,
    holder_id: Uuid,
    /// How long the lease was judged valid for at grant time, after
    /// subtracting acquisition latency and clock drift (see the Redlock
    /// `validity` calculation).
    validity: Duration,
    granted_at: Instant,
}

impl Lease {
    pub(crate) fn new(resource: impl Into<String>, holder_id: Uuid, validity: Duration) -> Self {
        Self {
            resource: resource.into(),
            holder_id,
            validity,
            granted_at: Instant::now(),
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn holder_id(&self) -> Uuid {
        self.holder_id
    }

    /// Time remaining before the lease's validity window closes. A caller
    /// whose critical section is still running after this reaches zero has
    /// no guarantee it still holds exclusivity and must treat its mutation
    /// as unacknowledged.
    pub fn remaining(&self) -> Duration {
        self.validity.saturating_sub(self.granted_at.elapsed())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }
}
