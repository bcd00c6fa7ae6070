//! Run entries.

use crate::{RunId, RunStatus, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A run as shown in `trigger runs` and stored in the run selection cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEntry {
    /// Run identifier.
    pub run_id: RunId,

    /// Task this run belongs to.
    pub task_id: TaskId,

    /// Current status.
    pub status: RunStatus,

    /// Last time the run changed state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RunEntry {
    /// Create a new RunEntry.
    pub fn new(run_id: impl Into<RunId>, task_id: impl Into<TaskId>, status: RunStatus) -> Self {
        Self {
            run_id: run_id.into(),
            task_id: task_id.into(),
            status,
            updated_at: None,
        }
    }
}
