use std::sync::Arc;

use async_trait::async_trait;
use inventory::{TransactionLogRepository, retention_cutoff};

use crate::application::scheduler::{Job, JobOutcome};
use crate::error::SyncError;

/// RetentionJob (§4.7): purges transaction log entries older than
/// `TRANSACTION_RETENTION_DAYS` (default 90).
pub struct RetentionJob {
    transaction_log: Arc<dyn TransactionLogRepository>,
    retention_days: i64,
}

impl RetentionJob {
    pub fn new(transaction_log: Arc<dyn TransactionLogRepository>, retention_days: i64) -> Self {
        Self { transaction_log, retention_days }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct RetentionResult {
    pub deleted_count: u64,
    pub cutoff: chrono::DateTime<chrono::Utc>,
}

#[async_trait]
impl Job for RetentionJob {
    fn kind(&self) -> &'static str {
        "retention"
    }

    async fn run(&self) -> Result<JobOutcome, SyncError> {
        let cutoff = retention_cutoff(self.retention_days, chrono::Utc::now());
        let deleted_count = self.transaction_log.purge_older_than(cutoff).await?;
        Ok(JobOutcome::Retention(RetentionResult { deleted_count, cutoff }))
    }
}
