//! Thin use cases around product and warehouse lifecycle — created here
//! because stock rows need something to reference, not because catalog
//! editing is this crate's concern (see the spec's Non-goals).

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::entities::{Product, Warehouse};
use crate::domain::repositories::{ProductRepository, WarehouseRepository};
use crate::domain::value_objects::Sku;
use crate::error::InventoryError;

pub struct CreateProductUseCase {
    product_repo: Arc<dyn ProductRepository>,
}

impl CreateProductUseCase {
    pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(
        &self,
        sku: &str,
        name: &str,
        category: &str,
        price: Decimal,
        description: Option<String>,
    ) -> Result<Product, InventoryError> {
        let sku = Sku::new(sku)?;
        if self.product_repo.find_by_sku(&sku).await?.is_some() {
            return Err(InventoryError::DuplicateSku(sku.as_str().to_string()));
        }
        let product = Product::create(sku, name, category, price, description)?;
        self.product_repo.save(&product).await?;
        Ok(product)
    }
}

pub struct RetireProductUseCase {
    product_repo: Arc<dyn ProductRepository>,
}

impl RetireProductUseCase {
    pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(&self, product_id: crate::domain::value_objects::ProductId) -> Result<Product, InventoryError> {
        let mut product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or(InventoryError::ProductNotFound(product_id.into_uuid()))?;
        product.retire();
        self.product_repo.update(&product).await?;
        Ok(product)
    }
}

pub struct CreateWarehouseUseCase {
    warehouse_repo: Arc<dyn WarehouseRepository>,
}

impl CreateWarehouseUseCase {
    pub fn new(warehouse_repo: Arc<dyn WarehouseRepository>) -> Self {
        Self { warehouse_repo }
    }

    pub async fn execute(&self, code: &str, location: &str, priority: i32) -> Result<Warehouse, InventoryError> {
        if self.warehouse_repo.find_by_code(code).await?.is_some() {
            return Err(InventoryError::DuplicateWarehouseCode(code.to_string()));
        }
        let warehouse = Warehouse::create(code, location, priority)?;
        self.warehouse_repo.save(&warehouse).await?;
        Ok(warehouse)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::value_objects::ProductId;

    struct MockProductRepo {
        by_id: Mutex<HashMap<ProductId, Product>>,
    }

    impl MockProductRepo {
        fn new() -> Arc<Self> {
            Arc::new(Self { by_id: Mutex::new(HashMap::new()) })
        }
    }

    #[async_trait]
    impl ProductRepository for MockProductRepo {
        async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, InventoryError> {
            Ok(self.by_id.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_sku(&self, sku: &Sku) -> Result<Option<Product>, InventoryError> {
            Ok(self.by_id.lock().unwrap().values().find(|p| p.sku() == sku).cloned())
        }

        async fn save(&self, product: &Product) -> Result<(), InventoryError> {
            self.by_id.lock().unwrap().insert(product.id(), product.clone());
            Ok(())
        }

        async fn update(&self, product: &Product) -> Result<(), InventoryError> {
            self.by_id.lock().unwrap().insert(product.id(), product.clone());
            Ok(())
        }

        async fn list_active(&self, _page: i64, _page_size: i64) -> Result<Vec<Product>, InventoryError> {
            Ok(self.by_id.lock().unwrap().values().filter(|p| p.is_active()).cloned().collect())
        }
    }

    #[tokio::test]
    async fn create_product_rejects_duplicate_sku() {
        let repo = MockProductRepo::new();
        let use_case = CreateProductUseCase::new(repo);
        use_case.execute("WDGT-1", "Widget", "hardware", dec!(9.99), None).await.unwrap();
        let err = use_case
            .execute("wdgt-1", "Widget Again", "hardware", dec!(9.99), None)
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::DuplicateSku(_)));
    }

    #[tokio::test]
    async fn retire_product_clears_active_flag() {
        let repo = MockProductRepo::new();
        let create = CreateProductUseCase::new(repo.clone());
        let product = create.execute("WDGT-1", "Widget", "hardware", dec!(9.99), None).await.unwrap();

        let retire = RetireProductUseCase::new(repo);
        let retired = retire.execute(product.id()).await.unwrap();
        assert!(!retired.is_active());
    }
}
