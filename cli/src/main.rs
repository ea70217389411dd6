//! Second front door onto the inventory core (C11): a `clap`-derived
//! binary exposing the operational entry points of §6. It wires the same
//! [`bootstrap::Core`] as the HTTP surface — not a separate implementation
//! of reservation, reconciliation or sync.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use bootstrap::Core;
use inventory::WarehouseId;
use syncengine::{MarketplacePushJob, ReconcileJob, WarehousePullJob};

#[derive(Parser)]
#[command(name = "inventory-cli", about = "Operational entry points for the inventory coordination core")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// `check_low_stock --threshold N [--export path.csv]`
    CheckLowStock {
        #[arg(long, default_value_t = 10)]
        threshold: i64,
        #[arg(long)]
        warehouse: Option<String>,
        #[arg(long)]
        export: Option<std::path::PathBuf>,
    },
    /// `reconcile_inventory [--warehouse W] [--async]`
    ReconcileInventory {
        #[arg(long)]
        warehouse: Option<String>,
    },
    /// `sync_all_stock [--warehouse W | --marketplace M]`
    SyncAllStock {
        #[arg(long)]
        warehouse: Option<String>,
        #[arg(long)]
        marketplace: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }

    let cli = Cli::parse();

    let config = match common::Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let core = match Core::bootstrap(config).await {
        Ok(core) => core,
        Err(err) => {
            eprintln!("bootstrap failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::CheckLowStock { threshold, warehouse, export } => check_low_stock(&core, threshold, warehouse, export).await,
        Command::ReconcileInventory { warehouse } => reconcile_inventory(&core, warehouse).await,
        Command::SyncAllStock { warehouse, marketplace } => sync_all_stock(&core, warehouse, marketplace).await,
    }
}

async fn resolve_warehouse(core: &Core, code: &str) -> Result<WarehouseId, ExitCode> {
    match core.warehouse_repo.find_by_code(code).await {
        Ok(Some(warehouse)) => Ok(warehouse.id()),
        Ok(None) => {
            eprintln!("unknown warehouse code: {code}");
            Err(ExitCode::FAILURE)
        }
        Err(err) => {
            eprintln!("failed to look up warehouse {code}: {err}");
            Err(ExitCode::FAILURE)
        }
    }
}

async fn check_low_stock(core: &Core, threshold: i64, warehouse: Option<String>, export: Option<std::path::PathBuf>) -> ExitCode {
    let warehouse_id = match warehouse {
        Some(code) => match resolve_warehouse(core, &code).await {
            Ok(id) => Some(id),
            Err(code) => return code,
        },
        None => None,
    };

    let rows = match core.low_stock.execute(threshold, warehouse_id).await {
        Ok(rows) => rows,
        Err(err) => {
            eprintln!("check-low-stock failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("{:<20} {:<12} {:>10} {:>10} {:>10}", "SKU", "WAREHOUSE", "QTY", "RESERVED", "AVAILABLE");
    for row in &rows {
        println!(
            "{:<20} {:<12} {:>10} {:>10} {:>10}",
            row.sku, row.warehouse_code, row.quantity, row.reserved, row.available
        );
    }
    println!("{} row(s) below threshold {threshold}", rows.len());

    if let Some(path) = export {
        if let Err(err) = export_csv(&path, &rows) {
            eprintln!("csv export failed: {err}");
            return ExitCode::FAILURE;
        }
        println!("exported to {}", path.display());
    }

    ExitCode::SUCCESS
}

fn export_csv(path: &std::path::Path, rows: &[inventory::LowStockRow]) -> std::io::Result<()> {
    use std::io::Write;
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "sku,warehouse_code,quantity,reserved,available")?;
    for row in rows {
        writeln!(file, "{},{},{},{},{}", row.sku, row.warehouse_code, row.quantity, row.reserved, row.available)?;
    }
    Ok(())
}

async fn reconcile_inventory(core: &Core, warehouse: Option<String>) -> ExitCode {
    let warehouse_id = match warehouse {
        Some(code) => match resolve_warehouse(core, &code).await {
            Ok(id) => Some(id),
            Err(code) => return code,
        },
        None => None,
    };

    let job = ReconcileJob::new(core.reconcile.clone(), warehouse_id);
    let result = core.scheduler.enqueue(Arc::new(job)).await.wait().await;

    match result {
        Ok(syncengine::JobOutcome::Reconcile(report)) => {
            println!(
                "checked {} discrepancies {} corrected {}",
                report.total_checked, report.discrepancies_found, report.corrections_made
            );
            for err in &report.errors {
                eprintln!("error: {err}");
            }
            if report.errors.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
        }
        Ok(_) => unreachable!("reconcile job always returns JobOutcome::Reconcile"),
        Err(err) => {
            eprintln!("reconcile-inventory failed: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn sync_all_stock(core: &Core, warehouse: Option<String>, marketplace: Option<String>) -> ExitCode {
    let mut had_error = false;

    let warehouses = match &warehouse {
        Some(code) => match resolve_warehouse(core, code).await {
            Ok(id) => match core.warehouse_repo.find_by_id(id).await {
                Ok(Some(w)) => vec![w],
                _ => return ExitCode::FAILURE,
            },
            Err(code) => return code,
        },
        None if marketplace.is_none() => match core.warehouse_repo.list_active().await {
            Ok(warehouses) => warehouses,
            Err(err) => {
                eprintln!("failed to list warehouses: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Vec::new(),
    };

    let adapters = core.marketplace_adapters();

    for w in &warehouses {
        let adapter: Arc<dyn syncengine::WarehouseAdapter> = Arc::new(syncengine::HttpWarehouseAdapter::new(w.code().to_string(), "", ""));
        let job = WarehousePullJob::new(
            w.id(),
            adapter,
            core.stock_repo.clone(),
            core.product_repo.clone(),
            core.warehouse_repo.clone(),
            core.engine.clone(),
        );
        let result = core.scheduler.enqueue(Arc::new(job)).await.wait().await;
        match result {
            Ok(syncengine::JobOutcome::WarehousePull(r)) => {
                println!("warehouse {}: synced {} errors {}", r.warehouse_name, r.synced_count, r.errors.len());
                had_error |= !r.errors.is_empty();
            }
            Ok(_) => unreachable!(),
            Err(err) => {
                eprintln!("warehouse {} sync failed: {err}", w.code());
                had_error = true;
            }
        }
    }

    let marketplace_names: Vec<String> = match &marketplace {
        Some(name) => vec![name.to_lowercase()],
        None if warehouse.is_none() => adapters.keys().cloned().collect(),
        None => Vec::new(),
    };

    for name in marketplace_names {
        let Some(adapter) = adapters.get(&name) else {
            eprintln!("no adapter configured for marketplace: {name}");
            had_error = true;
            continue;
        };
        let job = MarketplacePushJob::new(adapter.clone(), core.product_repo.clone(), core.engine.clone(), None);
        let result = core.scheduler.enqueue(Arc::new(job)).await.wait().await;
        match result {
            Ok(syncengine::JobOutcome::MarketplacePush(r)) => {
                println!("marketplace {}: synced {}/{} errors {}", r.marketplace, r.synced_count, r.total_products, r.errors.len());
                had_error |= !r.errors.is_empty();
            }
            Ok(_) => unreachable!(),
            Err(err) => {
                eprintln!("marketplace {name} sync failed: {err}");
                had_error = true;
            }
        }
    }

    if had_error { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
