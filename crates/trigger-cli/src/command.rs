//! Command grammar.

use clap::{Parser, Subcommand};
use serde_json::Value;

use trigger_core::parse_payload;

use crate::error::CliError;

const ENV_HELP: &str = "\
Environment:
    TRIGGER_SECRET_KEY   API key (tr_dev_... / tr_prod_...)
    TRIGGER_PROJECT_ID   Project ID (for dashboard URLs)
    TRIGGER_API_URL      API base URL (default: https://api.trigger.dev)

Shorthand:
    trigger <number>     Run task by number from last list
    trigger <task_id>    Run a task by id";

/// trigger - run tasks from the command line
#[derive(Parser, Debug)]
#[command(name = "trigger")]
#[command(about = "Trigger.dev task runner", long_about = None)]
#[command(after_help = ENV_HELP)]
pub struct Cli {
    /// Skip the confirmation prompt
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,

    /// Open the run URL in a browser after triggering
    #[arg(long, global = true)]
    pub open: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tasks (numbered), optionally searching by name
    List {
        /// Scan ./tasks for task definitions instead of asking the API
        #[arg(long)]
        local: bool,

        /// Case-insensitive substring of the task id
        search: Option<String>,
    },

    /// List scheduled tasks (numbered)
    Schedules,

    /// List recent runs with run IDs (numbered)
    Runs {
        /// Only runs that have not finished
        #[arg(long)]
        active: bool,
    },

    /// Run a task by id or by number from the last list
    Run {
        /// Task id or number
        target: String,

        /// JSON payload
        #[arg(short = 'p', long = "payload")]
        payload: Option<String>,
    },

    /// Cancel an in-progress run by id or by number from the last `trigger runs`
    Cancel {
        /// Run id or number
        target: String,
    },

    #[command(external_subcommand)]
    Shorthand(Vec<String>),
}

/// A task or run named either directly or by its position in the last list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// 1-based position in the last listing.
    Ordinal(usize),
    /// Literal identifier.
    Id(String),
}

impl Target {
    /// All-digit tokens are ordinals; anything else is an identifier.
    pub fn parse(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            // Too large to index anything; resolves to nothing.
            Self::Ordinal(raw.parse().unwrap_or(usize::MAX))
        } else {
            Self::Id(raw.to_string())
        }
    }
}

/// What one invocation should do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Print usage.
    Help,
    /// List tasks from recent runs.
    ListTasks { search: Option<String> },
    /// List tasks declared under ./tasks.
    ListLocal { search: Option<String> },
    /// List schedules.
    Schedules,
    /// List runs.
    Runs { active_only: bool },
    /// Trigger a task.
    Run {
        target: Target,
        payload: Option<Value>,
        open: bool,
        skip_confirm: bool,
    },
    /// Cancel a run.
    Cancel { target: Target, skip_confirm: bool },
}

impl Cli {
    /// Resolve parsed arguments into an action.
    pub fn into_action(self) -> Result<Action, CliError> {
        let Cli { yes, open, command } = self;

        let action = match command {
            None => Action::ListTasks { search: None },
            Some(Commands::List { local: true, search }) => Action::ListLocal { search },
            Some(Commands::List { local: false, search }) => Action::ListTasks { search },
            Some(Commands::Schedules) => Action::Schedules,
            Some(Commands::Runs { active }) => Action::Runs {
                active_only: active,
            },
            Some(Commands::Run { target, payload }) => {
                let payload = payload
                    .as_deref()
                    .map(parse_payload)
                    .transpose()
                    .map_err(|e| {
                        CliError::MalformedUsage(format!(
                            "{}\nUsage: trigger run <task_id> -p '<json>'",
                            e
                        ))
                    })?;
                Action::Run {
                    target: Target::parse(&target),
                    payload,
                    open,
                    skip_confirm: yes,
                }
            }
            Some(Commands::Cancel { target }) => Action::Cancel {
                target: Target::parse(&target),
                skip_confirm: yes,
            },
            Some(Commands::Shorthand(args)) => shorthand(args, yes, open)?,
        };

        Ok(action)
    }
}

/// `trigger <number|task_id> [-y] [--open]`.
///
/// Flags after an external subcommand are not seen by clap, so they are picked
/// out here.
fn shorthand(args: Vec<String>, mut yes: bool, mut open: bool) -> Result<Action, CliError> {
    let mut target = None;

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Action::Help),
            "-y" | "--yes" => yes = true,
            "--open" => open = true,
            _ if target.is_none() => target = Some(arg),
            _ => {}
        }
    }

    let target =
        target.ok_or_else(|| CliError::MalformedUsage("Usage: trigger <task_id|number>".into()))?;

    Ok(Action::Run {
        target: Target::parse(&target),
        payload: None,
        open,
        skip_confirm: yes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(args: &[&str]) -> Action {
        let argv = std::iter::once("trigger").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().into_action().unwrap()
    }

    #[test]
    fn test_no_args_lists_tasks() {
        assert_eq!(parse(&[]), Action::ListTasks { search: None });
    }

    #[test]
    fn test_list_variants() {
        assert_eq!(
            parse(&["list", "send"]),
            Action::ListTasks {
                search: Some("send".into())
            }
        );
        assert_eq!(
            parse(&["list", "--local"]),
            Action::ListLocal { search: None }
        );
        assert_eq!(
            parse(&["list", "--local", "send"]),
            Action::ListLocal {
                search: Some("send".into())
            }
        );
    }

    #[test]
    fn test_runs_and_schedules() {
        assert_eq!(parse(&["schedules"]), Action::Schedules);
        assert_eq!(parse(&["runs"]), Action::Runs { active_only: false });
        assert_eq!(
            parse(&["runs", "--active"]),
            Action::Runs { active_only: true }
        );
    }

    #[test]
    fn test_run_with_flags_anywhere() {
        assert_eq!(
            parse(&["run", "sendEmail", "-p", r#"{"to":"a@b.c"}"#, "-y", "--open"]),
            Action::Run {
                target: Target::Id("sendEmail".into()),
                payload: Some(json!({"to": "a@b.c"})),
                open: true,
                skip_confirm: true,
            }
        );
        assert_eq!(
            parse(&["-y", "run", "3"]),
            Action::Run {
                target: Target::Ordinal(3),
                payload: None,
                open: false,
                skip_confirm: true,
            }
        );
    }

    #[test]
    fn test_run_invalid_payload() {
        let cli = Cli::try_parse_from(["trigger", "run", "sendEmail", "-p", "{oops"]).unwrap();
        assert!(matches!(
            cli.into_action(),
            Err(CliError::MalformedUsage(_))
        ));
    }

    #[test]
    fn test_run_requires_target() {
        assert!(Cli::try_parse_from(["trigger", "run"]).is_err());
        assert!(Cli::try_parse_from(["trigger", "cancel"]).is_err());
    }

    #[test]
    fn test_cancel() {
        assert_eq!(
            parse(&["cancel", "2", "-y"]),
            Action::Cancel {
                target: Target::Ordinal(2),
                skip_confirm: true,
            }
        );
        assert_eq!(
            parse(&["cancel", "run_abc"]),
            Action::Cancel {
                target: Target::Id("run_abc".into()),
                skip_confirm: false,
            }
        );
    }

    #[test]
    fn test_bare_ordinal_and_task_id() {
        assert_eq!(
            parse(&["3", "-y", "--open"]),
            Action::Run {
                target: Target::Ordinal(3),
                payload: None,
                open: true,
                skip_confirm: true,
            }
        );
        assert_eq!(
            parse(&["send-email"]),
            Action::Run {
                target: Target::Id("send-email".into()),
                payload: None,
                open: false,
                skip_confirm: false,
            }
        );
    }

    #[test]
    fn test_help_anywhere() {
        let err = Cli::try_parse_from(["trigger", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

        let err = Cli::try_parse_from(["trigger", "runs", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

        assert_eq!(parse(&["send-email", "-h"]), Action::Help);
    }

    #[test]
    fn test_target_parse() {
        assert_eq!(Target::parse("0"), Target::Ordinal(0));
        assert_eq!(Target::parse("12"), Target::Ordinal(12));
        assert_eq!(Target::parse("-1"), Target::Id("-1".into()));
        assert_eq!(Target::parse("1a"), Target::Id("1a".into()));
        assert_eq!(
            Target::parse("99999999999999999999999"),
            Target::Ordinal(usize::MAX)
        );
    }
}
