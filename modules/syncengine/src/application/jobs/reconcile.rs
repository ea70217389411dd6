use std::sync::Arc;

use async_trait::async_trait;
use inventory::{ReconcileReport, ReconcileUseCase, WarehouseId};

use crate::application::scheduler::{Job, JobOutcome};
use crate::error::SyncError;

/// ReconcileJob (§4.7): delegates straight to C8.
pub struct ReconcileJob {
    use_case: Arc<ReconcileUseCase>,
    warehouse_id: Option<WarehouseId>,
}

impl ReconcileJob {
    pub fn new(use_case: Arc<ReconcileUseCase>, warehouse_id: Option<WarehouseId>) -> Self {
        Self { use_case, warehouse_id }
    }
}

pub type ReconcileResult = ReconcileReport;

#[async_trait]
impl Job for ReconcileJob {
    fn kind(&self) -> &'static str {
        "reconcile"
    }

    async fn run(&self) -> Result<JobOutcome, SyncError> {
        let report = self.use_case.execute(self.warehouse_id).await?;
        Ok(JobOutcome::Reconcile(report))
    }
}
