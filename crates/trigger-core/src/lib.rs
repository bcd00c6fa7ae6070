//! Trigger Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Filesystem
//! - Terminal I/O
//!
//! Both the API client and the CLI build on these.

pub mod error;
pub mod filter;
pub mod ids;
pub mod payload;
pub mod run;
pub mod schedule;
pub mod status;
pub mod task;

// Re-export commonly used types
pub use error::CoreError;
pub use filter::{active_runs, matches_search};
pub use ids::{RunId, TaskId};
pub use payload::{empty_payload, parse_payload};
pub use run::RunEntry;
pub use schedule::Schedule;
pub use status::RunStatus;
pub use task::TaskEntry;
