//! Client library for the task-execution API.
//!
//! Provides the [`TaskApi`] operations and an HTTP implementation of them.

pub mod api;
pub mod error;
pub mod http;
mod types;

pub use api::{TaskApi, TriggeredRun};
pub use error::ClientError;
pub use http::{HttpClient, DEFAULT_BASE_URL};
