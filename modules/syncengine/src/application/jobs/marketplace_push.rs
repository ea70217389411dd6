use std::sync::Arc;

use async_trait::async_trait;
use inventory::{ProductId, ProductRepository, ReservationEngine};

use crate::application::scheduler::{Job, JobOutcome, RetryPolicy};
use crate::domain::MarketplaceAdapter;
use crate::error::SyncError;

/// Defaults per §4.7/§6: 3 attempts, 120s base back-off.
const RETRY_POLICY: RetryPolicy = RetryPolicy::new(3, std::time::Duration::from_secs(120));

/// MarketplacePushJob (§4.7): pushes each in-scope product's aggregated
/// available quantity to one marketplace. A per-SKU failure is recorded
/// and the job continues; only an infrastructural fault (reading the
/// engine/repository) fails the job itself.
pub struct MarketplacePushJob {
    adapter: Arc<dyn MarketplaceAdapter>,
    product_repo: Arc<dyn ProductRepository>,
    engine: Arc<ReservationEngine>,
    product_ids: Option<Vec<ProductId>>,
}

impl MarketplacePushJob {
    pub fn new(
        adapter: Arc<dyn MarketplaceAdapter>,
        product_repo: Arc<dyn ProductRepository>,
        engine: Arc<ReservationEngine>,
        product_ids: Option<Vec<ProductId>>,
    ) -> Self {
        Self {
            adapter,
            product_repo,
            engine,
            product_ids,
        }
    }

    async fn products_in_scope(&self) -> Result<Vec<inventory::Product>, SyncError> {
        match &self.product_ids {
            Some(ids) => {
                let mut out = Vec::with_capacity(ids.len());
                for id in ids {
                    if let Some(product) = self.product_repo.find_by_id(*id).await? {
                        out.push(product);
                    }
                }
                Ok(out)
            }
            None => Ok(self.product_repo.list_active(1, i64::MAX).await?),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct MarketplacePushResult {
    pub marketplace: String,
    pub synced_count: u64,
    pub total_products: u64,
    pub errors: Vec<String>,
    pub duration_seconds: f64,
}

#[async_trait]
impl Job for MarketplacePushJob {
    fn kind(&self) -> &'static str {
        "marketplace"
    }

    fn retry_policy(&self) -> RetryPolicy {
        RETRY_POLICY
    }

    async fn run(&self) -> Result<JobOutcome, SyncError> {
        let started = std::time::Instant::now();
        let products = self.products_in_scope().await?;

        let mut synced_count = 0u64;
        let mut errors = Vec::new();

        for product in &products {
            if !product.is_active() {
                continue;
            }
            let snapshot = match self.engine.get_available(product.id(), None).await {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    errors.push(format!("{}: {err}", product.sku().as_str()));
                    continue;
                }
            };

            match self.adapter.update_stock(product.sku().as_str(), snapshot.available).await {
                Ok(()) => synced_count += 1,
                Err(err) => errors.push(format!("{}: {err}", product.sku().as_str())),
            }
        }

        Ok(JobOutcome::MarketplacePush(MarketplacePushResult {
            marketplace: self.adapter.name().to_string(),
            synced_count,
            total_products: products.len() as u64,
            errors,
            duration_seconds: started.elapsed().as_secs_f64(),
        }))
    }
}
