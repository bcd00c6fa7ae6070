//! Core domain errors.

use thiserror::Error;

/// Core domain errors for the trigger CLI.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A payload given on the command line is not valid JSON.
    #[error("Invalid payload JSON: {0}")]
    InvalidPayload(String),
}
