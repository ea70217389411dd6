use uuid::Uuid;

/// Errors surfaced by the inventory domain, application use cases and
/// persistence adapters. Mapped to HTTP statuses at the API gateway edge.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("duplicate sku: {0}")]
    DuplicateSku(String),

    #[error("invalid sku: {0}")]
    InvalidSku(String),

    #[error("warehouse not found: {0}")]
    WarehouseNotFound(Uuid),

    #[error("duplicate warehouse code: {0}")]
    DuplicateWarehouseCode(String),

    #[error("stock row not found for product {product_id} in warehouse {warehouse_id}")]
    StockRowNotFound { product_id: Uuid, warehouse_id: Uuid },

    #[error("insufficient available stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i64, available: i64 },

    #[error("reserved quantity would exceed quantity on hand")]
    ReservedExceedsQuantity,

    #[error("reservation or release already applied for reference {0}")]
    DuplicateReservation(String),

    #[error("quantity must not go negative")]
    NegativeStock,

    #[error("cannot release {requested} units, only {reserved} are reserved")]
    Overrelease { requested: i64, reserved: i64 },

    #[error("optimistic lock conflict on stock row {0}: retry with current version")]
    VersionConflict(Uuid),

    #[error("could not acquire distributed lock for resource {0}")]
    LockUnavailable(String),

    #[error("transaction log entry not found: {0}")]
    TransactionNotFound(Uuid),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("cache error: {0}")]
    Cache(String),

    #[error("upstream adapter error: {0}")]
    Adapter(String),

    #[error("operation not implemented")]
    NotImplemented,

    #[error("internal error: {0}")]
    Internal(String),
}

impl InventoryError {
    /// Errors a caller can reasonably retry immediately (lock contention,
    /// lost optimistic-lock race) as opposed to ones that need a different
    /// request altogether.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            InventoryError::VersionConflict(_) | InventoryError::LockUnavailable(_)
        )
    }
}
