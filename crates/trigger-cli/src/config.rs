//! Configuration from the environment.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use trigger_client::DEFAULT_BASE_URL;
use trigger_core::RunId;

use crate::error::CliError;

/// Secret API key (`tr_dev_...` / `tr_prod_...`).
pub const SECRET_KEY_VAR: &str = "TRIGGER_SECRET_KEY";

/// Project id, only used for dashboard links.
pub const PROJECT_ID_VAR: &str = "TRIGGER_PROJECT_ID";

/// Optional API host override (self-hosted instances).
pub const API_URL_VAR: &str = "TRIGGER_API_URL";

const DASHBOARD_URL: &str = "https://cloud.trigger.dev/projects/v3";
const TASKS_CACHE_FILE: &str = ".trigger_last_tasks.json";
const RUNS_CACHE_FILE: &str = ".trigger_last_runs.json";

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential for every API call.
    pub secret_key: String,

    /// Project id for dashboard URLs.
    pub project_id: Option<String>,

    /// API base URL.
    pub api_url: String,

    /// Where the last task listing is kept.
    pub tasks_cache: PathBuf,

    /// Where the last run listing is kept.
    pub runs_cache: PathBuf,
}

impl Config {
    /// Load `.env` files from the working directory, then read the process
    /// environment.
    ///
    /// `.env` never overrides variables already set in the shell;
    /// `.env.local` overrides everything.
    pub fn load() -> Result<Self, CliError> {
        load_env_file(Path::new(".env"), false);
        load_env_file(Path::new(".env.local"), true);

        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::from_lookup(|key| std::env::var(key).ok(), home)
    }

    /// Build the config from a variable lookup and a home directory.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        home: PathBuf,
    ) -> Result<Self, CliError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secret_key = non_empty(SECRET_KEY_VAR).ok_or(CliError::MissingCredential)?;

        Ok(Self {
            secret_key,
            project_id: non_empty(PROJECT_ID_VAR),
            api_url: non_empty(API_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            tasks_cache: home.join(TASKS_CACHE_FILE),
            runs_cache: home.join(RUNS_CACHE_FILE),
        })
    }
}

/// Load one env file into the process environment.
///
/// A missing file is not an error. Any other failure (typically a malformed
/// line) is logged and returned.
pub fn load_env_file(path: &Path, override_existing: bool) -> Option<dotenvy::Error> {
    let result = if override_existing {
        dotenvy::from_path_override(path)
    } else {
        dotenvy::from_path(path)
    };

    match result {
        Ok(()) => {
            debug!(path = %path.display(), "Loaded env file");
            None
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not load env file");
            Some(e)
        }
    }
}

/// Dashboard page of a run.
pub fn run_url(project_id: &str, run_id: &RunId) -> String {
    format!("{}/{}/runs/{}", DASHBOARD_URL, project_id, run_id)
}
