use std::fmt;

use crate::error::InventoryError;

/// A stock-keeping unit code. Globally unique within the catalog, assigned
/// by the caller at product creation time and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Sku(String);

const MAX_LEN: usize = 64;

impl Sku {
    pub fn new(value: impl Into<String>) -> Result<Self, InventoryError> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(InventoryError::InvalidSku("sku must not be empty".into()));
        }
        if trimmed.len() > MAX_LEN {
            return Err(InventoryError::InvalidSku(format!(
                "sku must be at most {MAX_LEN} characters"
            )));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(InventoryError::InvalidSku(
                "sku may only contain alphanumerics, '-' and '_'".into(),
            ));
        }

        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Sku {
    type Error = InventoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_trims_whitespace() {
        let sku = Sku::new("  wdgt-001  ").unwrap();
        assert_eq!(sku.as_str(), "WDGT-001");
    }

    #[test]
    fn rejects_empty() {
        assert!(Sku::new("   ").is_err());
    }

    #[test]
    fn rejects_invalid_characters() {
        assert!(Sku::new("WDGT/001").is_err());
    }

    #[test]
    fn rejects_overlong() {
        let long = "A".repeat(MAX_LEN + 1);
        assert!(Sku::new(long).is_err());
    }
}
