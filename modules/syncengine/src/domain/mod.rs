mod adapters;

pub use adapters::{MarketplaceAdapter, MarketplaceOrder, WarehouseAdapter};
