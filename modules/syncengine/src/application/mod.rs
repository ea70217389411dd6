pub mod jobs;
mod scheduler;

pub use scheduler::{Job, JobHandle, JobOutcome, RetryPolicy, SyncScheduler};
