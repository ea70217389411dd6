use chrono::{DateTime, Utc};

use crate::domain::value_objects::{ProductId, StockRowId, WarehouseId};
use crate::error::InventoryError;

/// The authoritative record of how much of a product sits in a warehouse.
///
/// `available` is stored rather than computed on read for query performance,
/// but every mutating method on this type re-derives it from `quantity` and
/// `reserved` before returning, so the two can never drift apart as long as
/// all writes go through here. Cross-row drift (e.g. from a direct SQL
/// patch) is what the reconciler exists to catch.
#[derive(Debug, Clone)]
pub struct StockRow {
    id: StockRowId,
    product_id: ProductId,
    warehouse_id: WarehouseId,
    quantity: i64,
    reserved: i64,
    available: i64,
    version: i32,
    last_sync_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StockRow {
    /// `upsert_init`: a freshly initialized row, all-zero.
    pub fn new_empty(product_id: ProductId, warehouse_id: WarehouseId) -> Self {
        let now = Utc::now();
        Self {
            id: StockRowId::new(),
            product_id,
            warehouse_id,
            quantity: 0,
            reserved: 0,
            available: 0,
            version: 0,
            last_sync_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: StockRowId,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        quantity: i64,
        reserved: i64,
        available: i64,
        version: i32,
        last_sync_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_id,
            warehouse_id,
            quantity,
            reserved,
            available,
            version,
            last_sync_at,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> StockRowId {
        self.id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn warehouse_id(&self) -> WarehouseId {
        self.warehouse_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn reserved(&self) -> i64 {
        self.reserved
    }

    pub fn available(&self) -> i64 {
        self.available
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn last_sync_at(&self) -> Option<DateTime<Utc>> {
        self.last_sync_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn recompute_available(&mut self) {
        self.available = self.quantity - self.reserved;
    }

    fn bump_version(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }

    /// Moves `qty` units from `available` into `reserved`. Returns
    /// `InsufficientStock` without mutating anything if `available < qty`.
    pub fn reserve(&mut self, qty: i64) -> Result<(), InventoryError> {
        if qty <= 0 {
            return Err(InventoryError::Validation("reserve quantity must be positive".into()));
        }
        if self.available < qty {
            return Err(InventoryError::InsufficientStock {
                requested: qty,
                available: self.available,
            });
        }
        self.reserved += qty;
        self.recompute_available();
        self.bump_version();
        Ok(())
    }

    /// Returns `qty` units from `reserved` back to `available`. Returns
    /// `Overrelease` without mutating anything if `reserved < qty`.
    pub fn release(&mut self, qty: i64) -> Result<(), InventoryError> {
        if qty <= 0 {
            return Err(InventoryError::Validation("release quantity must be positive".into()));
        }
        if self.reserved < qty {
            return Err(InventoryError::Overrelease {
                requested: qty,
                reserved: self.reserved,
            });
        }
        self.reserved -= qty;
        self.recompute_available();
        self.bump_version();
        Ok(())
    }

    /// Applies `delta` to `quantity` (can be negative). Rejects the
    /// mutation if the resulting quantity would go negative or would drop
    /// below `reserved`.
    pub fn adjust_quantity(&mut self, delta: i64) -> Result<(), InventoryError> {
        let new_quantity = self.quantity + delta;
        if new_quantity < 0 {
            return Err(InventoryError::NegativeStock);
        }
        if new_quantity < self.reserved {
            return Err(InventoryError::ReservedExceedsQuantity);
        }
        self.quantity = new_quantity;
        self.recompute_available();
        self.bump_version();
        Ok(())
    }

    pub fn mark_synced(&mut self, at: DateTime<Utc>) {
        self.last_sync_at = Some(at);
    }

    /// Whether the stored `available` still matches its derivation. Used
    /// by the reconciler; should always be `true` for rows produced only
    /// through this type's mutators.
    pub fn is_consistent(&self) -> bool {
        self.available == self.quantity - self.reserved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> StockRow {
        let mut r = StockRow::new_empty(ProductId::new(), WarehouseId::new());
        r.adjust_quantity(100).unwrap();
        r
    }

    #[test]
    fn reserve_moves_available_into_reserved() {
        let mut r = row();
        r.reserve(30).unwrap();
        assert_eq!(r.reserved(), 30);
        assert_eq!(r.available(), 70);
        assert_eq!(r.version(), 2);
    }

    #[test]
    fn reserve_rejects_insufficient_available() {
        let mut r = row();
        let err = r.reserve(200).unwrap_err();
        assert!(matches!(err, InventoryError::InsufficientStock { .. }));
        assert_eq!(r.reserved(), 0);
        assert_eq!(r.version(), 1);
    }

    #[test]
    fn release_returns_reserved_to_available() {
        let mut r = row();
        r.reserve(30).unwrap();
        r.release(10).unwrap();
        assert_eq!(r.reserved(), 20);
        assert_eq!(r.available(), 80);
    }

    #[test]
    fn release_rejects_overrelease() {
        let mut r = row();
        r.reserve(10).unwrap();
        let err = r.release(20).unwrap_err();
        assert!(matches!(err, InventoryError::Overrelease { .. }));
    }

    #[test]
    fn adjust_quantity_rejects_negative_result() {
        let mut r = row();
        let err = r.adjust_quantity(-200).unwrap_err();
        assert!(matches!(err, InventoryError::NegativeStock));
    }

    #[test]
    fn adjust_quantity_rejects_dropping_below_reserved() {
        let mut r = row();
        r.reserve(90).unwrap();
        let err = r.adjust_quantity(-50).unwrap_err();
        assert!(matches!(err, InventoryError::ReservedExceedsQuantity));
    }

    #[test]
    fn stays_consistent_through_a_mixed_sequence() {
        let mut r = row();
        r.reserve(40).unwrap();
        r.adjust_quantity(20).unwrap();
        r.release(10).unwrap();
        assert!(r.is_consistent());
    }
}
