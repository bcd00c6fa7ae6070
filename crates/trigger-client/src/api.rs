//! The operations the CLI needs from the API.

use async_trait::async_trait;
use serde_json::Value;

use trigger_core::{RunEntry, RunId, Schedule, TaskId};

use crate::error::ClientError;

/// Result of triggering a task.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggeredRun {
    /// Id of the created run, when the API returned one.
    pub run_id: Option<RunId>,
}

/// Task-execution API.
///
/// Implemented over HTTP by [`crate::HttpClient`]; the CLI depends only on
/// this trait so its command handling can be exercised without a server.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Most recent runs, newest first. No server-side filtering.
    async fn list_runs(&self, page_size: u32) -> Result<Vec<RunEntry>, ClientError>;

    /// All schedules of the project.
    async fn list_schedules(&self) -> Result<Vec<Schedule>, ClientError>;

    /// Trigger a task. A missing payload is sent as `{}`.
    async fn trigger_task(
        &self,
        task_id: &TaskId,
        payload: Option<Value>,
    ) -> Result<TriggeredRun, ClientError>;

    /// Cancel an in-flight run.
    async fn cancel_run(&self, run_id: &RunId) -> Result<(), ClientError>;
}
