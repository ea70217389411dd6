//! Shared bootstrap path for the two front doors onto the inventory core
//! (C12). `api-gateway` and the CLI both call [`Core::bootstrap`] with the
//! same [`common::Config`] so the pool, lock, cache, scheduler and
//! metrics wiring never drifts between them.

use std::sync::Arc;

use common::Config;
use inventory::{
    GetLowStockUseCase, GetProductStockOverviewUseCase, InMemoryStockCache, ListTransactionsUseCase,
    PgProductRepository, PgStockMutationUnitOfWork, PgStockRowRepository, PgTransactionLogRepository, PgViewsRepository,
    PgWarehouseRepository, ProductRepository, ReconcileUseCase, RedisStockCache, RefreshViewsUseCase, ReservationEngine,
    StockCache, StockMutationUnitOfWork, StockRowRepository, TransactionLogRepository, ViewsRepository, WarehouseRepository,
};
use lockservice::{DistributedLock, InMemoryLock, LockPolicy, RedlockConfig, RedlockLock};
use metrics::Metrics;
use sqlx::postgres::PgPoolOptions;
use syncengine::{AmazonAdapter, EbayAdapter, MarketplaceAdapter, MarketplaceCredentials, ShopifyAdapter, SyncScheduler};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("distributed lock backend failed: {0}")]
    Lock(#[from] lockservice::LockError),

    #[error("read cache backend failed: {0}")]
    Cache(#[from] inventory::InventoryError),
}

/// Every collaborator the reservation engine and its surrounding
/// machinery need, wired once from [`Config`] and shared (via `Arc`)
/// across every handler, job and CLI subcommand in the process.
#[derive(Clone)]
pub struct Core {
    pub config: Config,
    pub engine: Arc<ReservationEngine>,
    pub reconcile: Arc<ReconcileUseCase>,
    pub refresh_views: Arc<RefreshViewsUseCase>,
    pub scheduler: Arc<SyncScheduler>,
    pub metrics: Arc<Metrics>,

    pub product_repo: Arc<dyn ProductRepository>,
    pub warehouse_repo: Arc<dyn WarehouseRepository>,
    pub stock_repo: Arc<dyn StockRowRepository>,
    pub transaction_log: Arc<dyn TransactionLogRepository>,
    pub views_repo: Arc<dyn ViewsRepository>,

    pub low_stock: Arc<GetLowStockUseCase>,
    pub transactions: Arc<ListTransactionsUseCase>,
    pub stock_overview: Arc<GetProductStockOverviewUseCase>,
}

impl Core {
    pub async fn bootstrap(config: Config) -> Result<Self, BootstrapError> {
        let pool = PgPoolOptions::new().max_connections(10).connect(&config.database_url).await?;

        let product_repo: Arc<dyn ProductRepository> = Arc::new(PgProductRepository::new(pool.clone()));
        let warehouse_repo: Arc<dyn WarehouseRepository> = Arc::new(PgWarehouseRepository::new(pool.clone()));
        let stock_repo: Arc<dyn StockRowRepository> = Arc::new(PgStockRowRepository::new(pool.clone()));
        let transaction_log: Arc<dyn TransactionLogRepository> = Arc::new(PgTransactionLogRepository::new(pool.clone()));
        let views_repo: Arc<dyn ViewsRepository> = Arc::new(PgViewsRepository::new(pool.clone()));
        let unit_of_work: Arc<dyn StockMutationUnitOfWork> = Arc::new(PgStockMutationUnitOfWork::new(pool.clone()));

        let lock: Arc<dyn DistributedLock> = if config.redlock_servers.is_empty() {
            tracing::warn!("REDLOCK_SERVERS not set, falling back to an in-process lock (single-node only)");
            Arc::new(InMemoryLock::new())
        } else {
            let redlock_config = RedlockConfig::new(config.redlock_servers.clone());
            Arc::new(RedlockLock::connect(redlock_config).await?)
        };

        let cache: Arc<dyn StockCache> = match &config.cache_redis_url {
            Some(url) => Arc::new(RedisStockCache::connect(url).await?),
            None => Arc::new(InMemoryStockCache::new()),
        };

        let metrics = Arc::new(Metrics::new());

        let engine = Arc::new(ReservationEngine::new(
            lock,
            stock_repo.clone(),
            transaction_log.clone(),
            unit_of_work,
            cache,
            metrics.clone(),
            config.cache_ttl_seconds,
        ));

        let reconcile = Arc::new(ReconcileUseCase::new(stock_repo.clone(), engine.clone()));
        let refresh_views = Arc::new(RefreshViewsUseCase::new(
            stock_repo.clone(),
            product_repo.clone(),
            warehouse_repo.clone(),
            views_repo.clone(),
        ));

        let scheduler = Arc::new(SyncScheduler::start(config.worker_pool_size, config.worker_queue_capacity, metrics.clone()));

        let low_stock = Arc::new(GetLowStockUseCase::new(stock_repo.clone(), product_repo.clone(), warehouse_repo.clone()));
        let transactions = Arc::new(ListTransactionsUseCase::new(stock_repo.clone(), transaction_log.clone()));
        let stock_overview = Arc::new(GetProductStockOverviewUseCase::new(product_repo.clone(), stock_repo.clone()));

        Ok(Self {
            config,
            engine,
            reconcile,
            refresh_views,
            scheduler,
            metrics,
            product_repo,
            warehouse_repo,
            stock_repo,
            transaction_log,
            views_repo,
            low_stock,
            transactions,
            stock_overview,
        })
    }

    /// Builds the configured marketplace adapters from `config.marketplaces`,
    /// keyed by the same lowercase name used to enqueue a `MarketplacePushJob`.
    pub fn marketplace_adapters(&self) -> std::collections::HashMap<String, Arc<dyn MarketplaceAdapter>> {
        let mut out: std::collections::HashMap<String, Arc<dyn MarketplaceAdapter>> = std::collections::HashMap::new();
        for (name, creds) in &self.config.marketplaces {
            let credentials = MarketplaceCredentials {
                api_url: creds.api_url.clone(),
                api_key: creds.api_key.clone(),
                seller_id: creds.seller_id.clone(),
                user_token: creds.user_token.clone(),
                shop_name: creds.shop_name.clone(),
            };
            let adapter: Arc<dyn MarketplaceAdapter> = match name.as_str() {
                "amazon" => Arc::new(AmazonAdapter::new(credentials)),
                "ebay" => Arc::new(EbayAdapter::new(credentials)),
                "shopify" => Arc::new(ShopifyAdapter::new(credentials)),
                other => {
                    tracing::warn!(marketplace = other, "no adapter implementation for configured marketplace, skipping");
                    continue;
                }
            };
            out.insert(name.clone(), adapter);
        }
        out
    }

    /// Exposes the standard (non-flash-sale) lock policy so callers building
    /// ad hoc critical sections outside the reservation engine (none exist
    /// today, but the CLI's direct catalog use cases might one day) can stay
    /// consistent with `ReservationEngine`'s own defaults.
    pub fn standard_lock_policy() -> LockPolicy {
        LockPolicy::standard()
    }
}
