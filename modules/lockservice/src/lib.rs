//! Redlock-style distributed mutual exclusion (C3).
//!
//! [`RedlockLock`] is the production backend, quorum-voting across `N`
//! independent Redis nodes. [`InMemoryLock`] implements the identical
//! [`DistributedLock`] contract for tests and for running the workspace
//! without a Redis deployment. [`critical_section`] is the composable
//! replacement for the source's decorator-stacked locking: acquire, run,
//! release, on every exit path.

pub mod config;
pub mod error;
pub mod inmemory_lock;
pub mod keys;
pub mod lease;
pub mod redis_lock;
pub mod traits;

pub use config::{LockPolicy, RedlockConfig};
pub use error::LockError;
pub use inmemory_lock::InMemoryLock;
pub use lease::Lease;
pub use redis_lock::RedlockLock;
pub use traits::{DistributedLock, critical_section};
