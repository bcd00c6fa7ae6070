//! Schedule entries.

use crate::{TaskEntry, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cron schedule attached to a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Schedule identifier.
    pub schedule_id: String,

    /// Task triggered by this schedule.
    pub task_id: TaskId,

    /// Cron expression (e.g. `0 9 * * 1`).
    pub cron: String,

    /// Whether the schedule is enabled.
    pub active: bool,

    /// Next planned execution.
    pub next_run: Option<DateTime<Utc>>,
}

impl Schedule {
    /// Entry for the task selection cache, so `trigger <n>` runs this task.
    pub fn to_task_entry(&self) -> TaskEntry {
        TaskEntry::new(self.task_id.clone()).with_schedule(self.schedule_id.clone())
    }
}
