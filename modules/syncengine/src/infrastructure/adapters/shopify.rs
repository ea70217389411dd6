use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::adapters::{MarketplaceAdapter, MarketplaceOrder};
use crate::error::SyncError;
use crate::infrastructure::adapters::credentials::MarketplaceCredentials;

/// Shopify Admin API integration, same simulated-call shape as the other marketplace adapters.
pub struct ShopifyAdapter {
    credentials: MarketplaceCredentials,
    location_id: i64,
}

impl ShopifyAdapter {
    pub fn new(credentials: MarketplaceCredentials, location_id: i64) -> Self {
        Self { credentials, location_id }
    }
}

#[async_trait]
impl MarketplaceAdapter for ShopifyAdapter {
    fn name(&self) -> &str {
        "shopify"
    }

    async fn update_stock(&self, sku: &str, quantity: i64) -> Result<(), SyncError> {
        let url = format!("{}/admin/api/2024-01/inventory_levels/set.json", self.credentials.api_url);
        let _payload = serde_json::json!({
            "location_id": self.location_id,
            "inventory_item_id": sku,
            "available": quantity,
        });

        // let response = client
        //     .post(&url)
        //     .header("X-Shopify-Access-Token", &self.credentials.api_key)
        //     .json(&_payload)
        //     .send()
        //     .await?;
        // if !response.status().is_success() {
        //     return Err(SyncError::Adapter { adapter: "shopify".into(), message: response.status().to_string() });
        // }

        tracing::info!(%sku, quantity, url, "simulated shopify stock update");
        Ok(())
    }

    async fn get_stock(&self, sku: &str) -> Result<Option<i64>, SyncError> {
        let url = format!("{}/admin/api/2024-01/inventory_levels.json", self.credentials.api_url);

        // let response = client
        //     .get(&url)
        //     .header("X-Shopify-Access-Token", &self.credentials.api_key)
        //     .query(&[("inventory_item_ids", sku)])
        //     .send()
        //     .await?;
        // let data: serde_json::Value = response.json().await?;
        // return Ok(data["inventory_levels"][0]["available"].as_i64());

        tracing::info!(%sku, url, "simulated shopify stock read");
        Ok(Some(100))
    }

    async fn list_orders(&self, _from: DateTime<Utc>, _to: DateTime<Utc>) -> Result<Vec<MarketplaceOrder>, SyncError> {
        Ok(Vec::new())
    }
}
