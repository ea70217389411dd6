use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::adapters::{MarketplaceAdapter, MarketplaceOrder};
use crate::error::SyncError;
use crate::infrastructure::adapters::credentials::MarketplaceCredentials;

/// Amazon SP-API integration. Until real seller credentials are wired in,
/// `update_stock`/`get_stock` build the request exactly as the live call
/// would be shaped and log it instead of sending it.
pub struct AmazonAdapter {
    credentials: MarketplaceCredentials,
}

impl AmazonAdapter {
    pub fn new(credentials: MarketplaceCredentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl MarketplaceAdapter for AmazonAdapter {
    fn name(&self) -> &str {
        "amazon"
    }

    async fn update_stock(&self, sku: &str, quantity: i64) -> Result<(), SyncError> {
        let url = format!("{}/inventory/v1/items/{sku}", self.credentials.api_url);
        let _payload = serde_json::json!({
            "sku": sku,
            "quantity": quantity,
            "seller_id": self.credentials.seller_id,
        });

        // let response = client
        //     .put(&url)
        //     .bearer_auth(&self.credentials.api_key)
        //     .json(&_payload)
        //     .send()
        //     .await?;
        // if !response.status().is_success() {
        //     return Err(SyncError::Adapter { adapter: "amazon".into(), message: response.status().to_string() });
        // }

        tracing::info!(%sku, quantity, url, "simulated amazon stock update");
        Ok(())
    }

    async fn get_stock(&self, sku: &str) -> Result<Option<i64>, SyncError> {
        let url = format!("{}/inventory/v1/items/{sku}", self.credentials.api_url);

        // let response = client.get(&url).bearer_auth(&self.credentials.api_key).send().await?;
        // let data: serde_json::Value = response.json().await?;
        // return Ok(data.get("quantity").and_then(|q| q.as_i64()));

        tracing::info!(%sku, url, "simulated amazon stock read");
        Ok(Some(100))
    }

    async fn list_orders(&self, _from: DateTime<Utc>, _to: DateTime<Utc>) -> Result<Vec<MarketplaceOrder>, SyncError> {
        Ok(Vec::new())
    }
}
