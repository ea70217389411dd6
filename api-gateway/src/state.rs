//! Application state shared across all HTTP handlers (§4.10).
//!
//! Wraps [`bootstrap::Core`] with an in-process registry for async sync
//! tasks, so `POST /sync/*` can return a `task_id` immediately and
//! `GET /sync/status` can poll it — the HTTP surface's only state beyond
//! what the core itself already carries.

use std::collections::HashMap;
use std::sync::Arc;

use bootstrap::Core;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "status")]
pub enum TaskStatus {
    Pending,
    Done { outcomes: Vec<serde_json::Value> },
    Failed { error: String },
}

#[derive(Clone)]
pub struct AppState {
    pub core: Arc<Core>,
    tasks: Arc<Mutex<HashMap<Uuid, TaskStatus>>>,
}

impl AppState {
    pub fn new(core: Core) -> Self {
        Self { core: Arc::new(core), tasks: Arc::new(Mutex::new(HashMap::new())) }
    }

    /// Registers a new async task, returning the id callers poll via
    /// `GET /sync/status?task_id=`.
    pub async fn new_task(&self) -> Uuid {
        let id = Uuid::now_v7();
        self.tasks.lock().await.insert(id, TaskStatus::Pending);
        id
    }

    pub async fn complete_task(&self, id: Uuid, outcomes: Vec<serde_json::Value>) {
        self.tasks.lock().await.insert(id, TaskStatus::Done { outcomes });
    }

    pub async fn fail_task(&self, id: Uuid, error: String) {
        self.tasks.lock().await.insert(id, TaskStatus::Failed { error });
    }

    pub async fn task_status(&self, id: Uuid) -> Option<TaskStatus> {
        self.tasks.lock().await.get(&id).cloned()
    }
}
