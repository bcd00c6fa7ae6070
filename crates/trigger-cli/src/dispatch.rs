//! Command execution.
//!
//! One invocation is a straight line: resolve the target, confirm, call the
//! API, print. The only state carried between invocations lives in the two
//! selection stores.

use std::io::Write;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{info, warn};

use trigger_client::TaskApi;
use trigger_core::{active_runs, RunEntry, RunId, TaskEntry, TaskId};

use crate::command::{Action, Target};
use crate::config::run_url;
use crate::error::CliError;
use crate::interact::Interaction;
use crate::render;
use crate::scan::{scan_tasks, TASKS_DIR};
use crate::selection::SelectionStore;

/// Runs fetched to derive the task list.
pub const TASK_LIST_PAGE_SIZE: u32 = 100;

/// Runs fetched for `trigger runs`.
pub const RUN_LIST_PAGE_SIZE: u32 = 50;

const TASKS_HINT: &str = "trigger list";
const RUNS_HINT: &str = "trigger runs";

/// Executes actions against the API, the selection stores, and the user.
pub struct Dispatcher<'a, W: Write> {
    api: &'a dyn TaskApi,
    tasks: &'a dyn SelectionStore<TaskEntry>,
    runs: &'a dyn SelectionStore<RunEntry>,
    ui: &'a dyn Interaction,
    project_id: Option<String>,
    project_root: PathBuf,
    out: W,
}

impl<'a, W: Write> Dispatcher<'a, W> {
    /// Create a dispatcher writing its output to `out`.
    pub fn new(
        api: &'a dyn TaskApi,
        tasks: &'a dyn SelectionStore<TaskEntry>,
        runs: &'a dyn SelectionStore<RunEntry>,
        ui: &'a dyn Interaction,
        out: W,
    ) -> Self {
        Self {
            api,
            tasks,
            runs,
            ui,
            project_id: None,
            project_root: PathBuf::from("."),
            out,
        }
    }

    /// Builder method to set the project id used for dashboard links.
    pub fn with_project_id(mut self, project_id: Option<String>) -> Self {
        self.project_id = project_id;
        self
    }

    /// Builder method to set the directory `list --local` scans under.
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = root.into();
        self
    }

    /// Consume the dispatcher and return its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Execute one action.
    pub async fn dispatch(&mut self, action: Action) -> Result<(), CliError> {
        match action {
            // Help is printed by the caller, which owns the clap command.
            Action::Help => Ok(()),
            Action::ListTasks { search } => self.list_tasks(search.as_deref()).await,
            Action::ListLocal { search } => self.list_local(search.as_deref()),
            Action::Schedules => self.list_schedules().await,
            Action::Runs { active_only } => self.list_runs(active_only).await,
            Action::Run {
                target,
                payload,
                open,
                skip_confirm,
            } => self.run_task(target, payload, open, skip_confirm).await,
            Action::Cancel {
                target,
                skip_confirm,
            } => self.cancel_run(target, skip_confirm).await,
        }
    }

    async fn list_tasks(&mut self, search: Option<&str>) -> Result<(), CliError> {
        let runs = self.api.list_runs(TASK_LIST_PAGE_SIZE).await?;
        let tasks = TaskEntry::collect_from_runs(&runs, search);
        self.remember_tasks(&tasks);

        writeln!(self.out, "{}", render::tasks_header(search, false))?;
        self.print_tasks(&tasks)
    }

    fn list_local(&mut self, search: Option<&str>) -> Result<(), CliError> {
        let tasks_dir = self.project_root.join(TASKS_DIR);
        let Some(tasks) = scan_tasks(&tasks_dir, search) else {
            writeln!(self.out, "❌ No ./{} folder found", TASKS_DIR)?;
            return Ok(());
        };
        self.remember_tasks(&tasks);

        writeln!(self.out, "{}", render::tasks_header(search, true))?;
        self.print_tasks(&tasks)
    }

    async fn list_schedules(&mut self) -> Result<(), CliError> {
        let schedules = self.api.list_schedules().await?;
        let tasks: Vec<TaskEntry> = schedules.iter().map(|s| s.to_task_entry()).collect();
        self.remember_tasks(&tasks);

        writeln!(self.out, "Scheduled tasks:")?;
        if schedules.is_empty() {
            writeln!(self.out, "{}", render::NONE_FOUND)?;
        }
        for (i, schedule) in schedules.iter().enumerate() {
            writeln!(self.out, "{}", render::schedule_line(i + 1, schedule))?;
        }
        Ok(())
    }

    async fn list_runs(&mut self, active_only: bool) -> Result<(), CliError> {
        let mut runs = self.api.list_runs(RUN_LIST_PAGE_SIZE).await?;
        if active_only {
            runs = active_runs(runs);
        }
        if let Err(e) = self.runs.save(&runs) {
            warn!(error = %e, "Could not remember run list");
        }

        let header = if active_only {
            "In-progress runs:"
        } else {
            "Recent runs:"
        };
        writeln!(self.out, "{}", header)?;
        if runs.is_empty() {
            writeln!(self.out, "{}", render::NONE_FOUND)?;
        }
        for (i, run) in runs.iter().enumerate() {
            writeln!(self.out, "{}", render::run_line(i + 1, run))?;
        }
        Ok(())
    }

    async fn run_task(
        &mut self,
        target: Target,
        payload: Option<Value>,
        open: bool,
        skip_confirm: bool,
    ) -> Result<(), CliError> {
        let task_id = match target {
            Target::Id(id) => TaskId::new(id),
            Target::Ordinal(n) => self
                .tasks
                .resolve(n)
                .map(|task| task.id)
                .ok_or(CliError::SelectionNotFound { hint: TASKS_HINT })?,
        };

        if !skip_confirm && !self.ui.confirm(&format!("Trigger '{}'?", task_id)) {
            writeln!(self.out, "Cancelled")?;
            return Ok(());
        }

        let triggered = self.api.trigger_task(&task_id, payload).await?;
        info!(task_id = %task_id, run_id = ?triggered.run_id, "Triggered task");
        writeln!(self.out, "✔️ Triggered {}", task_id)?;

        let url = match (&self.project_id, &triggered.run_id) {
            (Some(project), Some(run_id)) => Some(run_url(project, run_id)),
            _ => None,
        };

        match url {
            Some(url) => {
                writeln!(self.out, "   {}", url)?;
                if open {
                    if let Err(e) = self.ui.open_url(&url) {
                        warn!(error = %e, "Could not open browser");
                        writeln!(self.out, "Open manually: {}", url)?;
                    }
                }
            }
            None if open => warn!("No run URL to open; TRIGGER_PROJECT_ID is not set"),
            None => {}
        }

        Ok(())
    }

    async fn cancel_run(&mut self, target: Target, skip_confirm: bool) -> Result<(), CliError> {
        let run_id = match target {
            Target::Id(id) => RunId::new(id),
            Target::Ordinal(n) => self
                .runs
                .resolve(n)
                .map(|run| run.run_id)
                .ok_or(CliError::SelectionNotFound { hint: RUNS_HINT })?,
        };

        if !skip_confirm && !self.ui.confirm(&format!("Cancel run '{}'?", run_id)) {
            writeln!(self.out, "Cancelled")?;
            return Ok(());
        }

        self.api.cancel_run(&run_id).await?;
        info!(run_id = %run_id, "Cancelled run");
        writeln!(self.out, "✔️ Cancelled {}", run_id)?;

        if let Some(project) = &self.project_id {
            writeln!(self.out, "   {}", run_url(project, &run_id))?;
        }

        Ok(())
    }

    fn remember_tasks(&self, tasks: &[TaskEntry]) {
        if let Err(e) = self.tasks.save(tasks) {
            warn!(error = %e, "Could not remember task list");
        }
    }

    fn print_tasks(&mut self, tasks: &[TaskEntry]) -> Result<(), CliError> {
        if tasks.is_empty() {
            writeln!(self.out, "{}", render::NONE_FOUND)?;
        }
        for (i, task) in tasks.iter().enumerate() {
            writeln!(self.out, "{}", render::task_line(i + 1, task))?;
        }
        Ok(())
    }
}
