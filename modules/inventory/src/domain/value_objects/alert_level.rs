use std::fmt;

/// Severity bucket for a [`LowStockAlertView`](crate::domain::entities::LowStockAlertView),
/// derived purely from `available` quantity at the time the view was refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    Warning,
    Low,
    Critical,
    OutOfStock,
}

impl AlertLevel {
    /// Thresholds: `{0 -> OUT_OF_STOCK, <5 -> CRITICAL, <10 -> LOW, else -> WARNING}`.
    /// The low-stock view only persists rows below the 10-unit cutoff, so
    /// `Warning` in practice only shows up if that cutoff is ever relaxed.
    pub fn from_available(available: i64) -> Self {
        if available <= 0 {
            Self::OutOfStock
        } else if available < 5 {
            Self::Critical
        } else if available < 10 {
            Self::Low
        } else {
            Self::Warning
        }
    }

    pub const LOW_STOCK_THRESHOLD: i64 = 10;
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertLevel::Warning => "WARNING",
            AlertLevel::Low => "LOW",
            AlertLevel::Critical => "CRITICAL",
            AlertLevel::OutOfStock => "OUT_OF_STOCK",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_match_thresholds() {
        assert_eq!(AlertLevel::from_available(0), AlertLevel::OutOfStock);
        assert_eq!(AlertLevel::from_available(4), AlertLevel::Critical);
        assert_eq!(AlertLevel::from_available(9), AlertLevel::Low);
        assert_eq!(AlertLevel::from_available(10), AlertLevel::Warning);
        assert_eq!(AlertLevel::from_available(-3), AlertLevel::OutOfStock);
    }
}
