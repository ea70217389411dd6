/// Per-marketplace credential group, as pulled from `Config` (§6). Each
/// marketplace only populates the field(s) its API actually needs; the
/// others are left empty rather than modeled as separate structs, since the
/// adapters below only read the field(s) they use.
#[derive(Debug, Clone, Default)]
pub struct MarketplaceCredentials {
    pub api_url: String,
    pub api_key: String,
    pub seller_id: String,
    pub user_token: String,
    pub shop_name: String,
}
