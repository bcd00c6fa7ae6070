//! Task entries.

use crate::filter::matches_search;
use crate::{RunEntry, RunStatus, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A task as shown in `trigger list` and stored in the task selection cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEntry {
    /// Task identifier.
    pub id: TaskId,

    /// Status of the most recent run of this task, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RunStatus>,

    /// Date (`YYYY-MM-DD`) of the most recent run update, if known.
    #[serde(rename = "updated", default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,

    /// Schedule this entry was listed from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<String>,
}

impl TaskEntry {
    /// Create a bare entry with only an identifier.
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            status: None,
            updated_date: None,
            schedule_id: None,
        }
    }

    /// Builder method to set the schedule id.
    pub fn with_schedule(mut self, schedule_id: impl Into<String>) -> Self {
        self.schedule_id = Some(schedule_id.into());
        self
    }

    /// Collect the distinct tasks seen in a list of runs.
    ///
    /// Runs arrive newest first, so the first run seen for a task decides its
    /// status and date. Order of first appearance is preserved.
    pub fn collect_from_runs(runs: &[RunEntry], search: Option<&str>) -> Vec<TaskEntry> {
        let mut seen = HashSet::new();
        let mut tasks = Vec::new();

        for run in runs {
            let id = run.task_id.as_str();
            if id.is_empty() || seen.contains(id) {
                continue;
            }
            if !matches_search(id, search) {
                continue;
            }
            seen.insert(id.to_owned());
            tasks.push(TaskEntry {
                id: run.task_id.clone(),
                status: Some(run.status.clone()),
                updated_date: run
                    .updated_at
                    .map(|t| t.format("%Y-%m-%d").to_string()),
                schedule_id: None,
            });
        }

        tasks
    }

    /// Returns true if the most recent run completed.
    pub fn last_run_completed(&self) -> bool {
        matches!(self.status, Some(RunStatus::Completed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn run(id: &str, task: &str, status: RunStatus) -> RunEntry {
        RunEntry::new(id, task, status)
    }

    #[test]
    fn test_collect_dedupes_keeping_first_seen() {
        let runs = vec![
            run("run_3", "sendEmail", RunStatus::Executing),
            run("run_2", "archiveUser", RunStatus::Completed),
            run("run_1", "sendEmail", RunStatus::Completed),
        ];

        let tasks = TaskEntry::collect_from_runs(&runs, None);
        let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["sendEmail", "archiveUser"]);
        assert_eq!(tasks[0].status, Some(RunStatus::Executing));
        assert!(!tasks[0].last_run_completed());
        assert!(tasks[1].last_run_completed());
    }

    #[test]
    fn test_collect_applies_search() {
        let runs = vec![
            run("run_1", "sendEmail", RunStatus::Completed),
            run("run_2", "sendSms", RunStatus::Completed),
            run("run_3", "archiveUser", RunStatus::Completed),
        ];

        let tasks = TaskEntry::collect_from_runs(&runs, Some("SEND"));
        let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["sendEmail", "sendSms"]);
    }

    #[test]
    fn test_collect_keeps_update_date_only() {
        let updated = Utc.with_ymd_and_hms(2024, 5, 17, 13, 45, 0).unwrap();
        let runs = vec![RunEntry {
            updated_at: Some(updated),
            ..run("run_1", "report", RunStatus::Completed)
        }];

        let tasks = TaskEntry::collect_from_runs(&runs, None);
        assert_eq!(tasks[0].updated_date.as_deref(), Some("2024-05-17"));
    }

    #[test]
    fn test_collect_skips_runs_without_task() {
        let runs = vec![run("run_1", "", RunStatus::Completed)];
        assert!(TaskEntry::collect_from_runs(&runs, None).is_empty());
    }
}
