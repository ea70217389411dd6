//! SyncScheduler — the bounded worker pool (C7).
//!
//! A fixed number of workers pull jobs off one shared bounded channel;
//! `enqueue` blocks (rather than silently dropping) once the channel is
//! full, since the channel bound *is* the pool's backpressure mechanism.
//! Each enqueue returns a [`JobHandle`] the caller can await independently,
//! so a fan-out submits N jobs and then collects N handles concurrently
//! without the scheduler itself needing to know about "batches".

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::error::SyncError;

/// A job kind's retry policy, carried as data rather than framework
/// metadata (§9): `max_attempts` total tries (1 = no retry), with
/// exponential back-off starting at `base_delay` (defaults per §4.7/§6:
/// warehouse 3×60s, marketplace 3×120s; flash-sale manages its own
/// fine-grained retry internally and opts out here with `none()`).
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub const fn none() -> Self {
        Self { max_attempts: 1, base_delay: Duration::ZERO }
    }

    pub const fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self { max_attempts, base_delay }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1 << attempt.min(4))
    }
}

/// Result shape returned by a job's `run`. One variant per job kind (§4.7);
/// kept as an enum rather than `serde_json::Value` so a caller destructuring
/// a `JobHandle`'s result gets a typed result, not a blob to re-parse.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "job_type")]
pub enum JobOutcome {
    WarehousePull(super::jobs::WarehousePullResult),
    MarketplacePush(super::jobs::MarketplacePushResult),
    RefreshViews(super::jobs::RefreshViewsResult),
    Reconcile(super::jobs::ReconcileResult),
    Retention(super::jobs::RetentionResult),
    FlashSaleOrder(super::jobs::FlashSaleOrderResult),
    StockAlert(super::jobs::StockAlertResult),
}

/// A runnable unit of scheduler work. Implementors own (via `Arc`) every
/// collaborator they need — the reservation engine, an adapter, a
/// repository — so the scheduler itself stays collaborator-agnostic and
/// only has to know how to run one.
#[async_trait]
pub trait Job: Send + Sync {
    fn kind(&self) -> &'static str;

    async fn run(&self) -> Result<JobOutcome, SyncError>;

    /// Whole-job retry policy applied by the worker loop around `run`.
    /// Defaults to no retry; job kinds for which a retry is meaningful
    /// (warehouse pull, marketplace push) override it.
    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::none()
    }
}

/// A submitted job's result, collected independently of other in-flight
/// jobs. Dropping the handle without awaiting it is fine; the worker still
/// runs the job to completion, it just has nowhere to send the result.
pub struct JobHandle {
    rx: oneshot::Receiver<Result<JobOutcome, SyncError>>,
}

impl JobHandle {
    pub async fn wait(self) -> Result<JobOutcome, SyncError> {
        self.rx.await.map_err(|_| SyncError::QueueClosed)?
    }
}

type Envelope = (Arc<dyn Job>, oneshot::Sender<Result<JobOutcome, SyncError>>);

pub struct SyncScheduler {
    tx: mpsc::Sender<Envelope>,
}

impl SyncScheduler {
    /// Spawns `worker_count` workers pulling from a channel bounded at
    /// `queue_capacity` (`WORKER_POOL_SIZE` from config). Workers run for
    /// the lifetime of the process; there is no shutdown handle because
    /// nothing in this system currently needs one — the process exit takes
    /// the workers with it.
    pub fn start(worker_count: usize, queue_capacity: usize, metrics: Arc<metrics::Metrics>) -> Self {
        let (tx, rx) = mpsc::channel::<Envelope>(queue_capacity);
        let rx = Arc::new(tokio::sync::Mutex::new(rx));

        for worker_id in 0..worker_count {
            let rx = rx.clone();
            let metrics = metrics.clone();
            tokio::spawn(async move {
                loop {
                    let next = { rx.lock().await.recv().await };
                    let Some((job, reply)) = next else {
                        tracing::info!(worker_id, "sync worker shutting down, channel closed");
                        break;
                    };

                    let kind = job.kind();
                    let policy = job.retry_policy();
                    let started = std::time::Instant::now();

                    let mut attempt = 0;
                    let result = loop {
                        let attempt_result = job.run().await;
                        match attempt_result {
                            Ok(outcome) => break Ok(outcome),
                            Err(err) if err.is_retryable() && attempt + 1 < policy.max_attempts => {
                                let delay = policy.delay_for(attempt);
                                tracing::warn!(worker_id, kind, attempt, %err, delay_secs = delay.as_secs(), "sync job failed, retrying");
                                attempt += 1;
                                tokio::time::sleep(delay).await;
                            }
                            Err(err) => break Err(err),
                        }
                    };
                    let elapsed = started.elapsed().as_secs_f64();

                    metrics.observe_sync_duration(kind, elapsed);
                    metrics.record_sync_task(kind, if result.is_ok() { "success" } else { "error" });

                    if let Err(err) = &result {
                        tracing::error!(worker_id, kind, attempts = attempt + 1, %err, "sync job failed, retry budget exhausted");
                    }

                    let _ = reply.send(result);
                }
            });
        }

        Self { tx }
    }

    /// Enqueues a job, blocking if the pool's queue is currently full.
    pub async fn enqueue(&self, job: Arc<dyn Job>) -> JobHandle {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.tx.send((job, reply_tx)).await.is_err() {
            // Channel closed: no workers left to answer. Fail the handle
            // immediately rather than hang the caller forever.
            let (tx, rx) = oneshot::channel();
            let _ = tx.send(Err(SyncError::QueueClosed));
            return JobHandle { rx };
        }
        JobHandle { rx: reply_rx }
    }

    /// Submits every job in `jobs` and collects their results concurrently.
    /// Used by the fan-out entry points (`sync_all_warehouses`,
    /// `sync_all_marketplaces`).
    pub async fn enqueue_all(&self, jobs: Vec<Arc<dyn Job>>) -> Vec<Result<JobOutcome, SyncError>> {
        let mut handles = Vec::with_capacity(jobs.len());
        for job in jobs {
            handles.push(self.enqueue(job).await);
        }
        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.wait().await);
        }
        results
    }
}
