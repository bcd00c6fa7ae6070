//! Errors surfaced to the user.

use std::process::ExitCode;

use thiserror::Error;
use trigger_client::ClientError;

/// Everything that ends a command early.
///
/// A declined confirmation is not an error; it never reaches this type.
#[derive(Debug, Error)]
pub enum CliError {
    /// No API credential configured.
    #[error("TRIGGER_SECRET_KEY not set")]
    MissingCredential,

    /// The API call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// An ordinal did not resolve against the last listing.
    #[error("Run '{hint}' first")]
    SelectionNotFound { hint: &'static str },

    /// Arguments that parse but cannot be acted on.
    #[error("{0}")]
    MalformedUsage(String),

    /// Writing to stdout failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::MissingCredential
            | Self::Client(_)
            | Self::SelectionNotFound { .. }
            | Self::MalformedUsage(_)
            | Self::Output(_) => ExitCode::FAILURE,
        }
    }
}
