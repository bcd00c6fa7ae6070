//! Line formatting for listings.

use trigger_core::{RunEntry, RunStatus, Schedule, TaskEntry};

/// Printed in place of an empty list.
pub const NONE_FOUND: &str = "  (none found)";

/// Header line for task listings.
pub fn tasks_header(search: Option<&str>, local: bool) -> String {
    let suffix = if local { " (local)" } else { "" };
    match search {
        Some(term) => format!("Tasks matching '{}'{}:", term, suffix),
        None => format!("Tasks{}:", suffix),
    }
}

/// One numbered task line. Local scans carry no status.
pub fn task_line(ordinal: usize, task: &TaskEntry) -> String {
    match &task.status {
        Some(_) => {
            let icon = if task.last_run_completed() { "✓" } else { "⏳" };
            format!("  {}. {} {}", ordinal, task.id, icon)
        }
        None => format!("  {}. {}", ordinal, task.id),
    }
}

/// One numbered schedule line.
pub fn schedule_line(ordinal: usize, schedule: &Schedule) -> String {
    let active = if schedule.active { "🟢" } else { "🔴" };
    let next = schedule
        .next_run
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    format!(
        "  {}. {} {} [{}] next: {}",
        ordinal, schedule.task_id, active, schedule.cron, next
    )
}

/// Status marker used in run listings.
pub fn run_icon(status: &RunStatus) -> &'static str {
    match status {
        RunStatus::Completed => "✓",
        RunStatus::Failed | RunStatus::Canceled => "✗",
        _ => "⏳",
    }
}

/// One numbered run line, with the run id shortened.
pub fn run_line(ordinal: usize, run: &RunEntry) -> String {
    format!(
        "  {}. {} {} ({})",
        ordinal,
        run.task_id,
        run_icon(&run.status),
        run.run_id.short()
    )
}
