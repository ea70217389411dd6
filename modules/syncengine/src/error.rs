/// Errors surfaced by the scheduler and its jobs. Wraps [`inventory::InventoryError`]
/// for the core-mutation path and adds the scheduling-specific cases.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Inventory(#[from] inventory::InventoryError),

    #[error("adapter error ({adapter}): {message}")]
    Adapter { adapter: String, message: String },

    #[error("no adapter configured for marketplace/warehouse: {0}")]
    UnknownTarget(String),

    #[error("job queue is closed")]
    QueueClosed,

    #[error("job exceeded its retry budget: {0}")]
    RetriesExhausted(String),
}

impl SyncError {
    /// Whether a whole-job retry (scheduler-level, per [`crate::application::scheduler::RetryPolicy`])
    /// is worth attempting. Per-SKU/per-row failures inside a job are not
    /// represented as `Err` here — they are folded into the job's own result
    /// type (`errors: Vec<String>`) so only infrastructural failures reach
    /// this check.
    pub fn is_retryable(&self) -> bool {
        match self {
            SyncError::Inventory(err) => err.is_retryable(),
            SyncError::Adapter { .. } => true,
            SyncError::UnknownTarget(_) | SyncError::QueueClosed | SyncError::RetriesExhausted(_) => false,
        }
    }
}
