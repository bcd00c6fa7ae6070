//! Client-side list filters.

use crate::RunEntry;

/// Case-insensitive substring match of `id` against an optional search term.
///
/// No search term (or an empty one) matches everything.
pub fn matches_search(id: &str, search: Option<&str>) -> bool {
    match search {
        Some(term) if !term.is_empty() => id.to_lowercase().contains(&term.to_lowercase()),
        _ => true,
    }
}

/// Keep only runs that have not reached a terminal status, preserving order.
pub fn active_runs(runs: Vec<RunEntry>) -> Vec<RunEntry> {
    runs.into_iter().filter(|r| r.status.is_active()).collect()
}
