use std::fmt;

/// Classifies what a [`StockTransaction`](crate::domain::entities::StockTransaction)
/// represents against the stock row it is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Stock arriving into a warehouse (receiving, restock).
    In,
    /// Stock leaving a warehouse outside of an order fulfillment flow.
    Out,
    /// Quantity moved from `available` into `reserved` for an order.
    Reserve,
    /// A previously reserved quantity returned to `available`.
    Release,
    /// A manual correction to `quantity` (count, damage, shrinkage).
    Adjust,
    /// A correction applied by the warehouse/marketplace sync pipeline or
    /// by the reconciler, not by a direct caller.
    Sync,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionKind::In => "IN",
            TransactionKind::Out => "OUT",
            TransactionKind::Reserve => "RESERVE",
            TransactionKind::Release => "RELEASE",
            TransactionKind::Adjust => "ADJUST",
            TransactionKind::Sync => "SYNC",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            "RESERVE" => Ok(Self::Reserve),
            "RELEASE" => Ok(Self::Release),
            "ADJUST" => Ok(Self::Adjust),
            "SYNC" => Ok(Self::Sync),
            other => Err(format!("unknown transaction kind: {other}")),
        }
    }
}
