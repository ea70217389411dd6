use std::sync::Arc;

use async_trait::async_trait;
use inventory::RefreshViewsUseCase;

use crate::application::scheduler::{Job, JobOutcome};
use crate::error::SyncError;

/// RefreshViewsJob (§4.7): thin scheduler wrapper around the C6 refresh.
pub struct RefreshViewsJob {
    use_case: Arc<RefreshViewsUseCase>,
}

impl RefreshViewsJob {
    pub fn new(use_case: Arc<RefreshViewsUseCase>) -> Self {
        Self { use_case }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct RefreshViewsResult {
    pub refreshed_at: chrono::DateTime<chrono::Utc>,
    pub duration_seconds: f64,
}

#[async_trait]
impl Job for RefreshViewsJob {
    fn kind(&self) -> &'static str {
        "refresh_views"
    }

    async fn run(&self) -> Result<JobOutcome, SyncError> {
        let started = std::time::Instant::now();
        self.use_case.execute().await?;
        Ok(JobOutcome::RefreshViews(RefreshViewsResult {
            refreshed_at: chrono::Utc::now(),
            duration_seconds: started.elapsed().as_secs_f64(),
        }))
    }
}
