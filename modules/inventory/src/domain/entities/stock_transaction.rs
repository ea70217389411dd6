use chrono::{DateTime, Utc};

use crate::domain::value_objects::{StockRowId, TransactionId, TransactionKind};

/// An immutable, append-only audit entry attached to a [`StockRow`](super::StockRow)
/// mutation. Written in the same durable transaction as the row update it
/// describes; never updated or deleted outside of the retention sweep.
#[derive(Debug, Clone)]
pub struct StockTransaction {
    id: TransactionId,
    stock_ref: StockRowId,
    kind: TransactionKind,
    delta: i64,
    reference_id: Option<String>,
    actor: String,
    created_at: DateTime<Utc>,
}

impl StockTransaction {
    pub fn new(
        stock_ref: StockRowId,
        kind: TransactionKind,
        delta: i64,
        reference_id: Option<String>,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            stock_ref,
            kind,
            delta,
            reference_id,
            actor: actor.into(),
            created_at: Utc::now(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: TransactionId,
        stock_ref: StockRowId,
        kind: TransactionKind,
        delta: i64,
        reference_id: Option<String>,
        actor: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            stock_ref,
            kind,
            delta,
            reference_id,
            actor,
            created_at,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn stock_ref(&self) -> StockRowId {
        self.stock_ref
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn delta(&self) -> i64 {
        self.delta
    }

    pub fn reference_id(&self) -> Option<&str> {
        self.reference_id.as_deref()
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_the_fields_it_was_built_with() {
        let txn = StockTransaction::new(
            StockRowId::new(),
            TransactionKind::Reserve,
            25,
            Some("order-42".into()),
            "reserve_stock_use_case",
        );
        assert_eq!(txn.kind(), TransactionKind::Reserve);
        assert_eq!(txn.delta(), 25);
        assert_eq!(txn.reference_id(), Some("order-42"));
    }
}
