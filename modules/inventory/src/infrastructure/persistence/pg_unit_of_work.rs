use async_trait::async_trait;
use sqlx::PgPool;

use super::pg_stock_row_repository::{SELECT_COLUMNS, StockRowRecord};
use crate::domain::entities::{StockRow, StockTransaction};
use crate::domain::repositories::StockMutationUnitOfWork;
use crate::error::InventoryError;

/// PostgreSQL-backed [`StockMutationUnitOfWork`]: the row CAS update and the
/// transaction-log insert run on the same `sqlx::Transaction` and commit
/// once, so a failure on either side leaves neither change visible — the
/// atomicity §4.1/§4.2 require and `StockRowRepository::apply` plus
/// `TransactionLogRepository::record` called independently cannot give.
pub struct PgStockMutationUnitOfWork {
    pool: PgPool,
}

impl PgStockMutationUnitOfWork {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StockMutationUnitOfWork for PgStockMutationUnitOfWork {
    async fn commit_mutation(
        &self,
        row: &StockRow,
        expected_version: i32,
        txn: &StockTransaction,
    ) -> Result<StockRow, InventoryError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, StockRowRecord>(&format!(
            r#"
            UPDATE stock_rows
            SET quantity = $3, reserved = $4, available = $5, version = $6, last_sync_at = $7, updated_at = $8
            WHERE id = $1 AND version = $2
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(row.id().into_uuid())
        .bind(expected_version)
        .bind(row.quantity())
        .bind(row.reserved())
        .bind(row.available())
        .bind(row.version())
        .bind(row.last_sync_at())
        .bind(row.updated_at())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(updated) = updated else {
            tx.rollback().await?;
            return Err(InventoryError::VersionConflict(row.id().into_uuid()));
        };

        sqlx::query(
            r#"
            INSERT INTO stock_transactions (id, stock_ref, kind, delta, reference_id, actor, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(txn.id().into_uuid())
        .bind(txn.stock_ref().into_uuid())
        .bind(txn.kind().to_string())
        .bind(txn.delta())
        .bind(txn.reference_id())
        .bind(txn.actor())
        .bind(txn.created_at())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated.into())
    }
}
