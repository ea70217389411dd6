//! Read-only use cases backing the REST transactions endpoint and the
//! `check_low_stock` CLI entry point. Neither is authoritative for
//! reservation decisions — both read C1/C2 directly rather than through
//! the C6 views, since the CLI's `--threshold` is caller-supplied and the
//! materialized low-stock view is fixed at the 10-unit cutoff.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::{Product, StockRow, StockTransaction, Warehouse};
use crate::domain::repositories::{
    ProductRepository, StockRowRepository, TransactionLogRepository, WarehouseRepository,
};
use crate::domain::value_objects::WarehouseId;
use crate::error::InventoryError;

/// One row of `check_low_stock`'s output: a stock row below `threshold`,
/// joined with the product SKU and warehouse code for display.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LowStockRow {
    pub sku: String,
    pub warehouse_code: String,
    pub quantity: i64,
    pub reserved: i64,
    pub available: i64,
}

pub struct GetLowStockUseCase {
    stock_repo: Arc<dyn StockRowRepository>,
    product_repo: Arc<dyn ProductRepository>,
    warehouse_repo: Arc<dyn WarehouseRepository>,
}

impl GetLowStockUseCase {
    pub fn new(
        stock_repo: Arc<dyn StockRowRepository>,
        product_repo: Arc<dyn ProductRepository>,
        warehouse_repo: Arc<dyn WarehouseRepository>,
    ) -> Self {
        Self {
            stock_repo,
            product_repo,
            warehouse_repo,
        }
    }

    pub async fn execute(&self, threshold: i64, warehouse_id: Option<WarehouseId>) -> Result<Vec<LowStockRow>, InventoryError> {
        let rows = self.stock_repo.scan_low_stock(threshold, warehouse_id).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(product) = self.product_repo.find_by_id(row.product_id()).await? else {
                continue;
            };
            let Some(warehouse) = self.warehouse_repo.find_by_id(row.warehouse_id()).await? else {
                continue;
            };
            if !product.is_active() || !warehouse.is_active() {
                continue;
            }
            out.push(LowStockRow {
                sku: product.sku().as_str().to_string(),
                warehouse_code: warehouse.code().to_string(),
                quantity: row.quantity(),
                reserved: row.reserved(),
                available: row.available(),
            });
        }
        Ok(out)
    }
}

/// Filters accepted by the read-only transactions endpoint (§6).
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub product_id: Option<crate::domain::value_objects::ProductId>,
    pub warehouse_id: Option<WarehouseId>,
    pub reference_id: Option<String>,
}

pub struct ListTransactionsUseCase {
    stock_repo: Arc<dyn StockRowRepository>,
    transaction_log: Arc<dyn TransactionLogRepository>,
}

impl ListTransactionsUseCase {
    pub fn new(stock_repo: Arc<dyn StockRowRepository>, transaction_log: Arc<dyn TransactionLogRepository>) -> Self {
        Self { stock_repo, transaction_log }
    }

    /// Resolves `(product_id, warehouse_id)` to its stock row and returns
    /// its transaction history, or — when `reference_id` is given instead
    /// — every transaction correlated to that reference across all rows.
    pub async fn execute(&self, filter: TransactionFilter, limit: i64) -> Result<Vec<StockTransaction>, InventoryError> {
        if let Some(reference_id) = filter.reference_id {
            return self.transaction_log.find_by_reference(&reference_id).await;
        }

        let (Some(product_id), Some(warehouse_id)) = (filter.product_id, filter.warehouse_id) else {
            return Err(InventoryError::Validation(
                "transactions query requires either reference_id or both product_id and warehouse_id".into(),
            ));
        };

        let row = self
            .stock_repo
            .get(product_id, warehouse_id)
            .await?
            .ok_or(InventoryError::StockRowNotFound {
                product_id: product_id.into_uuid(),
                warehouse_id: warehouse_id.into_uuid(),
            })?;

        self.transaction_log.history_for_stock_row(row.id(), limit).await
    }
}

/// A joined view of every stock row for a product, for the warehouses'
/// `inventory` action endpoint. Left as domain types rather than a wire
/// DTO; the HTTP surface maps this into its own JSON shape at the edge.
#[derive(Debug, Clone)]
pub struct ProductStockOverview {
    pub product: Product,
    pub rows: Vec<StockRow>,
}

pub struct GetProductStockOverviewUseCase {
    product_repo: Arc<dyn ProductRepository>,
    stock_repo: Arc<dyn StockRowRepository>,
}

impl GetProductStockOverviewUseCase {
    pub fn new(product_repo: Arc<dyn ProductRepository>, stock_repo: Arc<dyn StockRowRepository>) -> Self {
        Self { product_repo, stock_repo }
    }

    pub async fn execute(&self, product_id: crate::domain::value_objects::ProductId) -> Result<ProductStockOverview, InventoryError> {
        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or(InventoryError::ProductNotFound(product_id.into_uuid()))?;
        let rows = self.stock_repo.get_by_product(product_id).await?;
        Ok(ProductStockOverview { product, rows })
    }
}

/// Stub for the retention sweep's checkpoint, so C7's `RetentionJob` has
/// something to call without syncengine needing to depend on `chrono`
/// just for this one computation.
pub fn retention_cutoff(retention_days: i64, now: DateTime<Utc>) -> DateTime<Utc> {
    now - chrono::Duration::days(retention_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retention_cutoff_subtracts_days() {
        let now = Utc::now();
        let cutoff = retention_cutoff(90, now);
        assert_eq!((now - cutoff).num_days(), 90);
    }
}
