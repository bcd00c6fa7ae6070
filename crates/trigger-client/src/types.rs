//! Wire types of the REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use trigger_core::{RunEntry, RunStatus, Schedule};

/// Paginated list envelope: `{"data": [...]}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiRun {
    pub id: String,
    #[serde(default)]
    pub task_identifier: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ApiRun> for RunEntry {
    fn from(run: ApiRun) -> Self {
        RunEntry {
            run_id: run.id.into(),
            task_id: run.task_identifier.unwrap_or_default().into(),
            status: RunStatus::from(run.status.unwrap_or_default()),
            updated_at: run.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiGenerator {
    #[serde(default)]
    pub expression: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiSchedule {
    pub id: String,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub generator: Option<ApiGenerator>,
    #[serde(default)]
    pub next_run: Option<DateTime<Utc>>,
}

impl From<ApiSchedule> for Schedule {
    fn from(s: ApiSchedule) -> Self {
        Schedule {
            schedule_id: s.id,
            task_id: s.task.unwrap_or_default().into(),
            cron: s
                .generator
                .and_then(|g| g.expression)
                .unwrap_or_default(),
            active: s.active.unwrap_or_default(),
            next_run: s.next_run,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TriggerRequest<'a> {
    pub payload: &'a Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TriggerResponse {
    #[serde(default)]
    pub id: Option<String>,
}
