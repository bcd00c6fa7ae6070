//! Local task-definition scan for `trigger list --local`.
//!
//! This is a heuristic, not a TypeScript parser. It recognizes exactly one
//! declaration shape, a quoted literal after `id:`:
//!
//! ```text
//! export const sendEmail = task({
//!   id: "send-email",
//! ```
//!
//! Values containing the `$` template sentinel are skipped, since they are
//! interpolated at runtime and cannot be triggered by that name.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

use trigger_core::{matches_search, TaskEntry};

/// Project subdirectory holding task definitions.
pub const TASKS_DIR: &str = "tasks";

const TASK_FILE_EXT: &str = "ts";
const TEMPLATE_SENTINEL: char = '$';

/// Task ids declared in one source file, in order of appearance.
pub fn extract_task_ids(content: &str) -> Vec<String> {
    let re = Regex::new(r#"id:\s*['"]([^'"]+)['"]"#).expect("regex");
    re.captures_iter(content)
        .map(|caps| caps[1].to_string())
        .filter(|id| !id.contains(TEMPLATE_SENTINEL))
        .collect()
}

/// Scan `tasks_dir` recursively for task ids.
///
/// Returns `None` if the directory does not exist. Results are de-duplicated
/// and sorted alphabetically, unlike remote listings which keep API order.
pub fn scan_tasks(tasks_dir: &Path, search: Option<&str>) -> Option<Vec<TaskEntry>> {
    if !tasks_dir.is_dir() {
        return None;
    }

    let mut ids = BTreeSet::new();

    for entry in WalkDir::new(tasks_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == TASK_FILE_EXT))
    {
        let content = match fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "Skipping unreadable file");
                continue;
            }
        };

        for id in extract_task_ids(&content) {
            if matches_search(&id, search) {
                ids.insert(id);
            }
        }
    }

    debug!(dir = %tasks_dir.display(), count = ids.len(), "Scanned local tasks");
    Some(ids.into_iter().map(TaskEntry::new).collect())
}
