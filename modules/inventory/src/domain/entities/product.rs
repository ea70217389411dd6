use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::value_objects::{ProductId, Sku};
use crate::error::InventoryError;

/// A sellable item. Identity is the immutable `sku`; everything else
/// (name, category, price) can change without affecting stock rows that
/// reference this product by id.
#[derive(Debug, Clone)]
pub struct Product {
    id: ProductId,
    sku: Sku,
    name: String,
    description: Option<String>,
    category: String,
    price: Decimal,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    pub fn create(
        sku: Sku,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Decimal,
        description: Option<String>,
    ) -> Result<Self, InventoryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InventoryError::Validation("product name must not be empty".into()));
        }
        if price.is_sign_negative() {
            return Err(InventoryError::Validation("price must not be negative".into()));
        }

        let now = Utc::now();
        Ok(Self {
            id: ProductId::new(),
            sku,
            name,
            description,
            category: category.into(),
            price,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: ProductId,
        sku: Sku,
        name: String,
        description: Option<String>,
        category: String,
        price: Decimal,
        is_active: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            sku,
            name,
            description,
            category,
            price,
            is_active,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> Decimal {
        self.price
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

    pub fn update_details(
        &mut self,
        name: Option<String>,
        description: Option<Option<String>>,
        category: Option<String>,
        price: Option<Decimal>,
    ) -> Result<(), InventoryError> {
        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(InventoryError::Validation("product name must not be empty".into()));
            }
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(price) = price {
            if price.is_sign_negative() {
                return Err(InventoryError::Validation("price must not be negative".into()));
            }
            self.price = price;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Soft-retire: clears `is_active`. The product and its stock rows are
    /// never hard-deleted while referenced by transaction history.
    pub fn retire(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    pub fn reactivate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sku() -> Sku {
        Sku::new("WDGT-001").unwrap()
    }

    #[test]
    fn create_defaults_to_active() {
        let p = Product::create(sku(), "Widget", "hardware", dec!(9.99), None).unwrap();
        assert!(p.is_active());
    }

    #[test]
    fn create_rejects_negative_price() {
        let err = Product::create(sku(), "Widget", "hardware", dec!(-1), None).unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));
    }

    #[test]
    fn retire_clears_active_flag() {
        let mut p = Product::create(sku(), "Widget", "hardware", dec!(9.99), None).unwrap();
        p.retire();
        assert!(!p.is_active());
    }
}
