//! # Inventory Module
//!
//! Multi-warehouse stock coordination for a multi-marketplace e-commerce
//! platform: the stock store, transaction log, reservation engine, read
//! cache, aggregation views and reconciler that keep `available` quantity
//! correct under concurrent writers.
//!
//! ## Architecture
//!
//! Hexagonal/clean architecture with three layers:
//!
//! - **Domain Layer**: entities, value objects, repository traits
//! - **Application Layer**: the reservation engine and the use cases built on it
//! - **Infrastructure Layer**: PostgreSQL repositories, Redis/in-process cache

pub mod application;
pub mod domain;
pub mod infrastructure;

mod error;

pub use error::InventoryError;

// -----------------------------------------------------------------------------
// Domain Layer - Value Objects
// -----------------------------------------------------------------------------

pub use domain::value_objects::AlertLevel;
pub use domain::value_objects::ProductId;
pub use domain::value_objects::Sku;
pub use domain::value_objects::StockRowId;
pub use domain::value_objects::TransactionId;
pub use domain::value_objects::TransactionKind;
pub use domain::value_objects::WarehouseId;

// -----------------------------------------------------------------------------
// Domain Layer - Entities
// -----------------------------------------------------------------------------

pub use domain::entities::AggregatedStockView;
pub use domain::entities::LowStockAlertView;
pub use domain::entities::Product;
pub use domain::entities::StockRow;
pub use domain::entities::StockTransaction;
pub use domain::entities::Warehouse;

// -----------------------------------------------------------------------------
// Domain Layer - Repository Traits
// -----------------------------------------------------------------------------

pub use domain::repositories::AvailabilitySnapshot;
pub use domain::repositories::ProductRepository;
pub use domain::repositories::StockCache;
pub use domain::repositories::StockMutationUnitOfWork;
pub use domain::repositories::StockRowRepository;
pub use domain::repositories::TransactionLogRepository;
pub use domain::repositories::ViewsRepository;
pub use domain::repositories::WarehouseAvailability;
pub use domain::repositories::WarehouseRepository;

// -----------------------------------------------------------------------------
// Infrastructure Layer - PostgreSQL Repository Implementations
// -----------------------------------------------------------------------------

pub use infrastructure::persistence::PgProductRepository;
pub use infrastructure::persistence::PgStockMutationUnitOfWork;
pub use infrastructure::persistence::PgStockRowRepository;
pub use infrastructure::persistence::PgTransactionLogRepository;
pub use infrastructure::persistence::PgViewsRepository;
pub use infrastructure::persistence::PgWarehouseRepository;

// -----------------------------------------------------------------------------
// Infrastructure Layer - Cache Implementations
// -----------------------------------------------------------------------------

pub use infrastructure::cache::InMemoryStockCache;
pub use infrastructure::cache::RedisStockCache;

// -----------------------------------------------------------------------------
// Application Layer - DTOs
// -----------------------------------------------------------------------------

pub use application::dtos::AdjustStockCommand;
pub use application::dtos::AvailabilityResponse;
pub use application::dtos::ReconcileReport;
pub use application::dtos::ReleaseStockCommand;
pub use application::dtos::ReserveStockCommand;
pub use application::dtos::StockRowDiscrepancy;
pub use application::dtos::StockRowResponse;

// -----------------------------------------------------------------------------
// Application Layer - Use Cases
// -----------------------------------------------------------------------------

pub use application::use_cases::CreateProductUseCase;
pub use application::use_cases::CreateWarehouseUseCase;
pub use application::use_cases::GetLowStockUseCase;
pub use application::use_cases::GetProductStockOverviewUseCase;
pub use application::use_cases::ListTransactionsUseCase;
pub use application::use_cases::LowStockRow;
pub use application::use_cases::ProductStockOverview;
pub use application::use_cases::ReconcileUseCase;
pub use application::use_cases::RefreshViewsUseCase;
pub use application::use_cases::ReservationEngine;
pub use application::use_cases::RetireProductUseCase;
pub use application::use_cases::TransactionFilter;
pub use application::use_cases::retention_cutoff;
