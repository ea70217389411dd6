//! Process-wide Prometheus collectors for the inventory coordination core.
//!
//! [`Metrics::new`] registers every collector exactly once against a fresh
//! [`Registry`]; the resulting handle is cheap to clone (every field is an
//! `Arc`-backed prometheus type) and is shared across the HTTP surface, the
//! sync scheduler and the CLI so all three front doors report into the same
//! counters.

use prometheus::{Encoder, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder, histogram_opts};

/// Labels: `operation` ∈ {reserve, release, adjust, sync}.
pub type StockMutationCounter = IntCounterVec;
/// Labels: `task_type` ∈ {warehouse, marketplace}, `status` ∈ {success, error}.
pub type SyncTaskCounter = IntCounterVec;
/// Labels: `task_type`.
pub type SyncDurationHistogram = HistogramVec;
/// Labels: `resource_namespace`, `outcome` ∈ {acquired, timeout, quorum_fail}.
pub type LockAttemptCounter = IntCounterVec;

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    stock_mutations: StockMutationCounter,
    sync_tasks: SyncTaskCounter,
    sync_duration: SyncDurationHistogram,
    lock_attempts: LockAttemptCounter,
    reconciler_discrepancies: IntCounter,
}

impl Metrics {
    /// Registers every collector required by the metrics surface against a
    /// new, process-wide registry. Call this once at process start; clone
    /// the returned handle into every component that needs to record.
    pub fn new() -> Self {
        let registry = Registry::new();

        let stock_mutations = IntCounterVec::new(
            Opts::new(
                "inventory_stock_mutations_total",
                "Stock mutations applied through the reservation engine",
            ),
            &["operation"],
        )
        .expect("metric names/labels are static and valid");

        let sync_tasks = IntCounterVec::new(
            Opts::new(
                "inventory_sync_tasks_total",
                "Sync scheduler jobs completed, by kind and outcome",
            ),
            &["task_type", "status"],
        )
        .expect("metric names/labels are static and valid");

        let sync_duration = HistogramVec::new(
            histogram_opts!(
                "inventory_sync_duration_seconds",
                "Wall-clock duration of sync scheduler jobs"
            ),
            &["task_type"],
        )
        .expect("metric names/labels are static and valid");

        let lock_attempts = IntCounterVec::new(
            Opts::new(
                "inventory_lock_attempts_total",
                "Distributed lock acquisition attempts, by resource namespace and outcome",
            ),
            &["resource_namespace", "outcome"],
        )
        .expect("metric names/labels are static and valid");

        let reconciler_discrepancies = IntCounter::new(
            "inventory_reconciler_discrepancies_total",
            "Stock rows repaired by the reconciler across all sweeps",
        )
        .expect("metric name is static and valid");

        registry
            .register(Box::new(stock_mutations.clone()))
            .expect("single registration at startup");
        registry
            .register(Box::new(sync_tasks.clone()))
            .expect("single registration at startup");
        registry
            .register(Box::new(sync_duration.clone()))
            .expect("single registration at startup");
        registry
            .register(Box::new(lock_attempts.clone()))
            .expect("single registration at startup");
        registry
            .register(Box::new(reconciler_discrepancies.clone()))
            .expect("single registration at startup");

        Self {
            registry,
            stock_mutations,
            sync_tasks,
            sync_duration,
            lock_attempts,
            reconciler_discrepancies,
        }
    }

    pub fn record_stock_mutation(&self, operation: &str) {
        self.stock_mutations.with_label_values(&[operation]).inc();
    }

    pub fn record_sync_task(&self, task_type: &str, status: &str) {
        self.sync_tasks.with_label_values(&[task_type, status]).inc();
    }

    pub fn observe_sync_duration(&self, task_type: &str, seconds: f64) {
        self.sync_duration.with_label_values(&[task_type]).observe(seconds);
    }

    pub fn record_lock_attempt(&self, resource_namespace: &str, outcome: &str) {
        self.lock_attempts
            .with_label_values(&[resource_namespace, outcome])
            .inc();
    }

    pub fn record_reconciler_discrepancy(&self, count: u64) {
        self.reconciler_discrepancies.inc_by(count);
    }

    /// Renders the current state of every collector in Prometheus text
    /// exposition format, for the `/metrics` HTTP endpoint.
    pub fn gather_text(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer).expect("prometheus text exposition is valid utf-8"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_renders_a_stock_mutation() {
        let metrics = Metrics::new();
        metrics.record_stock_mutation("reserve");
        let text = metrics.gather_text().unwrap();
        assert!(text.contains("inventory_stock_mutations_total"));
    }

    #[test]
    fn lock_attempt_labels_are_independent() {
        let metrics = Metrics::new();
        metrics.record_lock_attempt("inventory:product:p1", "acquired");
        metrics.record_lock_attempt("inventory:product:p1", "timeout");
        let text = metrics.gather_text().unwrap();
        assert!(text.contains("outcome=\"acquired\""));
        assert!(text.contains("outcome=\"timeout\""));
    }
}
