//! trigger CLI entry point.

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use trigger_cli::{Action, Cli, CliError, Config, Dispatcher, FileSelection, Terminal};
use trigger_client::HttpClient;
use trigger_core::{RunEntry, TaskEntry};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr so listings on stdout stay clean
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    // Ctrl-C at a prompt (or anywhere else) is a decline, not a failure.
    // Stderr, since the main thread may be holding the stdout lock.
    if let Err(e) = ctrlc::set_handler(|| {
        eprintln!("\nCancelled");
        std::process::exit(0);
    }) {
        warn!(error = %e, "Could not install Ctrl-C handler");
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {}", e);
            e.exit_code()
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let action = cli.into_action()?;

    // Help never needs credentials
    if action == Action::Help {
        Cli::command().print_help()?;
        return Ok(());
    }

    let config = Config::load()?;
    debug!(api_url = %config.api_url, "Loaded config");

    let api = HttpClient::new(&config.api_url, config.secret_key.as_str());
    let tasks: FileSelection<TaskEntry> = FileSelection::new(&config.tasks_cache);
    let runs: FileSelection<RunEntry> = FileSelection::new(&config.runs_cache);
    let ui = Terminal;

    let mut dispatcher = Dispatcher::new(&api, &tasks, &runs, &ui, io::stdout())
        .with_project_id(config.project_id.clone());

    dispatcher.dispatch(action).await
}
