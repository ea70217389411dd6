use std::fmt;

use uuid::{NoContext, Timestamp, Uuid};

/// Identity of a [`Warehouse`](crate::domain::entities::Warehouse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct WarehouseId(Uuid);

impl WarehouseId {
    pub fn new() -> Self {
        Self(Uuid::new_v7(Timestamp::now(NoContext)))
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for WarehouseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WarehouseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for WarehouseId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<WarehouseId> for Uuid {
    fn from(id: WarehouseId) -> Self {
        id.0
    }
}
