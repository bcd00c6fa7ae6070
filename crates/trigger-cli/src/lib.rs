//! trigger - run tasks on a remote task-execution API from the command line.
//!
//! Listings are numbered and remembered, so a follow-up command can name an
//! entry by its number:
//!
//! ```text
//! $ trigger list send
//! Tasks matching 'send':
//!   1. send-email ✓
//!   2. send-sms ⏳
//! $ trigger 2 -y
//! ✔️ Triggered send-sms
//! ```

pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod interact;
pub mod render;
pub mod scan;
pub mod selection;

pub use command::{Action, Cli, Target};
pub use config::Config;
pub use dispatch::Dispatcher;
pub use error::CliError;
pub use interact::{Interaction, Terminal};
pub use selection::{FileSelection, MemorySelection, SelectionError, SelectionStore};
