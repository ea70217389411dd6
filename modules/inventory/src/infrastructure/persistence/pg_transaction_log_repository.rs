use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entities::StockTransaction;
use crate::domain::repositories::TransactionLogRepository;
use crate::domain::value_objects::{StockRowId, TransactionId, TransactionKind};
use crate::error::InventoryError;

pub struct PgTransactionLogRepository {
    pool: PgPool,
}

impl PgTransactionLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionLogRepository for PgTransactionLogRepository {
    async fn record(&self, txn: &StockTransaction) -> Result<(), InventoryError> {
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
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn history_for_stock_row(&self, stock_ref: StockRowId, limit: i64) -> Result<Vec<StockTransaction>, InventoryError> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, stock_ref, kind, delta, reference_id, actor, created_at
            FROM stock_transactions
            WHERE stock_ref = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(stock_ref.into_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn find_by_reference(&self, reference_id: &str) -> Result<Vec<StockTransaction>, InventoryError> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, stock_ref, kind, delta, reference_id, actor, created_at
            FROM stock_transactions
            WHERE reference_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(reference_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn purge_older_than(&self, older_than: DateTime<Utc>) -> Result<u64, InventoryError> {
        let result = sqlx::query("DELETE FROM stock_transactions WHERE created_at < $1")
            .bind(older_than)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: uuid::Uuid,
    stock_ref: uuid::Uuid,
    kind: String,
    delta: i64,
    reference_id: Option<String>,
    actor: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<TransactionRow> for StockTransaction {
    type Error = InventoryError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let kind: TransactionKind = row
            .kind
            .parse()
            .map_err(|e: String| InventoryError::Internal(e))?;

        Ok(StockTransaction::from_parts(
            TransactionId::from_uuid(row.id),
            StockRowId::from_uuid(row.stock_ref),
            kind,
            row.delta,
            row.reference_id,
            row.actor,
            row.created_at,
        ))
    }
}
