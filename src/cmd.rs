//! Command dispatch.
//!
//! The parsed command line is first checked and turned into a [`Command`]; executing a
//! `Command` opens the store, applies at most one mutation and returns the text to
//! print.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::config::StoreConfig;
use crate::db::TaskStore;
use crate::error::{Result, TaskError, ValidationError};
use crate::format::{render_list, render_report, USAGE};
use crate::task::Priority;

/// A validated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { priority: Priority, text: String },
    List,
    Delete { index: i64 },
    Done { index: i64 },
    Help,
    Report,
    Completions(Shell),
}

impl TryFrom<&Commands> for Command {
    type Error = TaskError;

    fn try_from(raw: &Commands) -> Result<Self> {
        let command = match raw {
            Commands::Add { priority, text } => {
                let priority = priority
                    .as_deref()
                    .and_then(Priority::parse)
                    .ok_or(ValidationError::MissingTask)?;
                let text = text.join(" ");
                if text.trim().is_empty() {
                    return Err(ValidationError::MissingTask.into());
                }
                Command::Add { priority, text }
            }
            Commands::Ls { .. } => Command::List,
            Commands::Del { index, .. } => Command::Delete {
                index: parse_index(index.as_deref()).ok_or(ValidationError::MissingDeleteIndex)?,
            },
            Commands::Done { index, .. } => Command::Done {
                index: parse_index(index.as_deref()).ok_or(ValidationError::MissingDoneIndex)?,
            },
            Commands::Help { .. } => Command::Help,
            Commands::Report { .. } => Command::Report,
            Commands::Completions { shell } => Command::Completions(*shell),
            Commands::Unknown(args) => {
                let name = args.first().cloned().unwrap_or_default();
                return Err(TaskError::UnknownCommand(name));
            }
        };
        Ok(command)
    }
}

fn parse_index(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

/// Parse the command line into a [`Command`]; no subcommand means `help`.
pub fn parse_command(cli: &Cli) -> Result<Command> {
    match &cli.command {
        Some(raw) => Command::try_from(raw),
        None => Ok(Command::Help),
    }
}

/// Run `cli` against the files described by `config`, returning stdout text.
pub fn execute_command(cli: &Cli, config: &StoreConfig) -> Result<String> {
    let command = parse_command(cli)?;
    debug!(?command, "dispatching");
    execute(command, config)
}

pub fn execute(command: Command, config: &StoreConfig) -> Result<String> {
    match command {
        Command::Help => Ok(USAGE.to_string()),
        Command::Completions(shell) => Ok(completions(shell)),
        Command::List => {
            let store = TaskStore::open(config.clone());
            Ok(render_list(store.pending()))
        }
        Command::Report => {
            let store = TaskStore::open(config.clone());
            Ok(render_report(store.pending(), store.completed()))
        }
        Command::Add { priority, text } => {
            let mut store = TaskStore::open(config.clone());
            let task = store.add(&text, priority)?;
            Ok(format!(
                "Added task: \"{}\" with priority {}\n",
                task.text, task.priority
            ))
        }
        Command::Delete { index } => {
            let mut store = TaskStore::open(config.clone());
            store.delete(index)?;
            Ok(format!("Deleted task #{index}\n"))
        }
        Command::Done { index } => {
            let mut store = TaskStore::open(config.clone());
            store.mark_done(index)?;
            Ok("Marked item as done.\n".to_string())
        }
    }
}

fn completions(shell: Shell) -> String {
    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    let mut buf = Vec::new();
    generate(shell, &mut app, app_name, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Command> {
        let cli = Cli::try_parse_from(std::iter::once("task").chain(args.iter().copied()))
            .expect("clap accepts the arguments");
        parse_command(&cli)
    }

    #[test]
    fn no_arguments_means_help() {
        assert_eq!(parse(&[]).unwrap(), Command::Help);
    }

    #[test]
    fn help_subcommand_is_handled_by_the_tracker() {
        assert_eq!(parse(&["help"]).unwrap(), Command::Help);
    }

    #[test]
    fn add_joins_words_with_single_spaces() {
        assert_eq!(
            parse(&["add", "2", "hello", "world"]).unwrap(),
            Command::Add {
                priority: Priority::new(2),
                text: "hello world".into()
            }
        );
    }

    #[test]
    fn add_keeps_hyphenated_words() {
        assert_eq!(
            parse(&["add", "1", "fix", "-x", "flag"]).unwrap(),
            Command::Add {
                priority: Priority::new(1),
                text: "fix -x flag".into()
            }
        );
    }

    #[test]
    fn add_accepts_priorities_beyond_u64() {
        assert_eq!(
            parse(&["add", "5000000000", "x"]).unwrap(),
            Command::Add {
                priority: Priority::parse("5000000000").unwrap(),
                text: "x".into()
            }
        );
    }

    #[rstest]
    #[case(&["ls", "extra"], Command::List)]
    #[case(&["report", "now"], Command::Report)]
    #[case(&["help", "add"], Command::Help)]
    #[case(&["del", "1", "2"], Command::Delete { index: 1 })]
    #[case(&["done", "3", "and", "more"], Command::Done { index: 3 })]
    fn trailing_arguments_are_ignored(#[case] args: &[&str], #[case] expected: Command) {
        assert_eq!(parse(args).unwrap(), expected);
    }

    #[rstest]
    #[case(&["add"])]
    #[case(&["add", "2"])]
    #[case(&["add", "two", "words"])]
    #[case(&["add", "-1", "negative"])]
    #[case(&["add", "3", " "])]
    fn add_without_priority_or_text_is_rejected(#[case] args: &[&str]) {
        let err = parse(args).unwrap_err();
        assert!(matches!(err, TaskError::Validation(ValidationError::MissingTask)));
        assert_eq!(err.to_string(), "Error: Missing tasks string. Nothing added!");
    }

    #[rstest]
    #[case(&["del"], "Error: Missing NUMBER for deleting tasks.")]
    #[case(&["del", "x"], "Error: Missing NUMBER for deleting tasks.")]
    #[case(&["done"], "Error: Missing NUMBER for marking tasks as done.")]
    #[case(&["done", "1.5"], "Error: Missing NUMBER for marking tasks as done.")]
    fn missing_index_is_rejected(#[case] args: &[&str], #[case] message: &str) {
        assert_eq!(parse(args).unwrap_err().to_string(), message);
    }

    #[test]
    fn negative_index_parses_and_is_range_checked_later() {
        assert_eq!(parse(&["del", "-2"]).unwrap(), Command::Delete { index: -2 });
    }

    #[test]
    fn unknown_command_is_reported() {
        let err = parse(&["frobnicate", "now"]).unwrap_err();
        assert!(matches!(err, TaskError::UnknownCommand(ref name) if name == "frobnicate"));
        assert_eq!(
            err.to_string(),
            "Error: Unknown command \"frobnicate\". Run \"task help\" for usage."
        );
    }

    #[test]
    fn help_does_not_touch_the_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = StoreConfig::in_dir(dir.path());
        assert_eq!(execute(Command::Help, &config).unwrap(), USAGE);
        assert!(!config.task_file.exists());
    }

    #[test]
    fn completions_mention_the_binary() {
        let script = completions(Shell::Bash);
        assert!(script.contains("task"));
    }
}
