//! `/transactions` — the read-only query endpoint over the Transaction Log
//! (§4.2, §4.10). `ListTransactionsUseCase` resolves either a
//! `(product_id, warehouse_id)` pair or a `reference_id`; `transaction_type`
//! and the date range are not indexed by the repository port, so they are
//! applied as an in-process filter over whatever the use case returns.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use inventory::{ProductId, TransactionFilter, TransactionKind, WarehouseId};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TransactionBody {
    pub id: Uuid,
    pub stock_ref: Uuid,
    pub kind: TransactionKind,
    pub delta: i64,
    pub reference_id: Option<String>,
    pub actor: String,
    pub created_at: DateTime<Utc>,
}

impl From<&inventory::StockTransaction> for TransactionBody {
    fn from(t: &inventory::StockTransaction) -> Self {
        Self {
            id: t.id().into_uuid(),
            stock_ref: t.stock_ref().into_uuid(),
            kind: t.kind(),
            delta: t.delta(),
            reference_id: t.reference_id().map(str::to_string),
            actor: t.actor().to_string(),
            created_at: t.created_at(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    pub product_id: Option<Uuid>,
    pub warehouse_id: Option<Uuid>,
    pub reference_id: Option<String>,
    pub transaction_type: Option<TransactionKind>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

pub async fn list_transactions(
    State(state): State<AppState>,
    Query(q): Query<TransactionsQuery>,
) -> Result<Json<Vec<TransactionBody>>, AppError> {
    let filter = TransactionFilter {
        product_id: q.product_id.map(ProductId::from),
        warehouse_id: q.warehouse_id.map(WarehouseId::from),
        reference_id: q.reference_id.clone(),
    };

    let transactions = state.core.transactions.execute(filter, q.limit).await?;

    let filtered = transactions
        .iter()
        .filter(|t| q.transaction_type.is_none_or(|kind| t.kind() == kind))
        .filter(|t| q.start_date.is_none_or(|start| t.created_at() >= start))
        .filter(|t| q.end_date.is_none_or(|end| t.created_at() <= end))
        .map(TransactionBody::from)
        .collect();

    Ok(Json(filtered))
}
