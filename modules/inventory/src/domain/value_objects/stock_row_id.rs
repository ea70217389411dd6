use std::fmt;

use uuid::{NoContext, Timestamp, Uuid};

/// Identity of a [`StockRow`](crate::domain::entities::StockRow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct StockRowId(Uuid);

impl StockRowId {
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

impl Default for StockRowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StockRowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for StockRowId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<StockRowId> for Uuid {
    fn from(id: StockRowId) -> Self {
        id.0
    }
}
