use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::adapters::{MarketplaceAdapter, MarketplaceOrder};
use crate::error::SyncError;
use crate::infrastructure::adapters::credentials::MarketplaceCredentials;

/// eBay Trading API integration, same simulated-call shape as [`super::amazon::AmazonAdapter`].
pub struct EbayAdapter {
    credentials: MarketplaceCredentials,
}

impl EbayAdapter {
    pub fn new(credentials: MarketplaceCredentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl MarketplaceAdapter for EbayAdapter {
    fn name(&self) -> &str {
        "ebay"
    }

    async fn update_stock(&self, sku: &str, quantity: i64) -> Result<(), SyncError> {
        let url = format!("{}/sell/inventory/v1/inventory_item/{sku}", self.credentials.api_url);
        let _payload = serde_json::json!({
            "availability": { "shipToLocationAvailability": { "quantity": quantity } },
        });

        // let response = client
        //     .put(&url)
        //     .bearer_auth(&self.credentials.user_token)
        //     .json(&_payload)
        //     .send()
        //     .await?;
        // if !response.status().is_success() {
        //     return Err(SyncError::Adapter { adapter: "ebay".into(), message: response.status().to_string() });
        // }

        tracing::info!(%sku, quantity, url, "simulated ebay stock update");
        Ok(())
    }

    async fn get_stock(&self, sku: &str) -> Result<Option<i64>, SyncError> {
        let url = format!("{}/sell/inventory/v1/inventory_item/{sku}", self.credentials.api_url);

        // let response = client.get(&url).bearer_auth(&self.credentials.user_token).send().await?;
        // let data: serde_json::Value = response.json().await?;
        // return Ok(data["availability"]["shipToLocationAvailability"]["quantity"].as_i64());

        tracing::info!(%sku, url, "simulated ebay stock read");
        Ok(Some(100))
    }

    async fn list_orders(&self, _from: DateTime<Utc>, _to: DateTime<Utc>) -> Result<Vec<MarketplaceOrder>, SyncError> {
        Ok(Vec::new())
    }
}
