use chrono::{DateTime, Utc};

use crate::domain::value_objects::WarehouseId;
use crate::error::InventoryError;

/// A physical or virtual stocking location. `priority` breaks ties when a
/// sync or fulfillment decision must pick among several warehouses holding
/// the same product (lower value wins).
#[derive(Debug, Clone)]
pub struct Warehouse {
    id: WarehouseId,
    code: String,
    location: String,
    priority: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Warehouse {
    pub fn create(code: impl Into<String>, location: impl Into<String>, priority: i32) -> Result<Self, InventoryError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(InventoryError::Validation("warehouse code must not be empty".into()));
        }
        let now = Utc::now();
        Ok(Self {
            id: WarehouseId::new(),
            code,
            location: location.into(),
            priority,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn from_parts(
        id: WarehouseId,
        code: String,
        location: String,
        priority: i32,
        is_active: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            location,
            priority,
            is_active,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> WarehouseId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_blank_code() {
        assert!(Warehouse::create("  ", "East", 1).is_err());
    }

    #[test]
    fn deactivate_clears_flag() {
        let mut w = Warehouse::create("EAST-1", "East Coast DC", 1).unwrap();
        w.deactivate();
        assert!(!w.is_active());
    }
}
