//! Run history - terminal summaries of past runs

use crate::execution::RunStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

/// Summary of one terminated run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Unique run identifier
    pub run_id: Uuid,

    /// Name of the recipe that was run
    pub recipe_name: String,

    /// Terminal status
    pub status: RunStatus,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run terminated
    pub finished_at: DateTime<Utc>,

    /// Number of metric events the final context carried (0 for failed runs)
    pub metric_count: usize,

    /// Error message for failed runs
    pub error: Option<String>,
}

/// Sink for terminal run summaries
pub trait RunStore: Send + Sync {
    /// Record a summary
    fn record(&self, summary: RunSummary);

    /// The most recent `limit` summaries, newest first
    fn recent(&self, limit: usize) -> Vec<RunSummary>;
}

/// In-memory run store for hosts and tests
#[derive(Default)]
pub struct InMemoryRunStore {
    runs: Mutex<Vec<RunSummary>>,
}

impl InMemoryRunStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunStore for InMemoryRunStore {
    fn record(&self, summary: RunSummary) {
        self.runs.lock().unwrap().push(summary);
    }

    fn recent(&self, limit: usize) -> Vec<RunSummary> {
        let runs = self.runs.lock().unwrap();
        runs.iter().rev().take(limit).cloned().collect()
    }
}
