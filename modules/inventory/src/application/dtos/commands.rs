use crate::domain::value_objects::{ProductId, WarehouseId};

/// Input to [`ReservationEngine::reserve`](crate::application::use_cases::ReservationEngine::reserve).
#[derive(Debug, Clone)]
pub struct ReserveStockCommand {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub quantity: i64,
    pub order_id: String,
}

/// Input to [`ReservationEngine::release`](crate::application::use_cases::ReservationEngine::release).
#[derive(Debug, Clone)]
pub struct ReleaseStockCommand {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub quantity: i64,
    pub order_id: String,
}

/// Input to [`ReservationEngine::adjust`](crate::application::use_cases::ReservationEngine::adjust).
/// `kind` is restricted to the non-reservation transaction kinds (IN, OUT,
/// ADJUST, SYNC); reserve/release go through their own commands.
#[derive(Debug, Clone)]
pub struct AdjustStockCommand {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub delta: i64,
    pub kind: crate::domain::value_objects::TransactionKind,
    pub reference_id: Option<String>,
    pub actor: String,
}
