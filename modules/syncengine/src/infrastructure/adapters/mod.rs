mod amazon;
mod credentials;
mod ebay;
mod shopify;
mod warehouse_http;

pub use amazon::AmazonAdapter;
pub use credentials::MarketplaceCredentials;
pub use ebay::EbayAdapter;
pub use shopify::ShopifyAdapter;
pub use warehouse_http::HttpWarehouseAdapter;
