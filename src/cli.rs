use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

/// Priority-ordered task tracker.
/// Pending tasks live in ./task.txt, finished ones in ./completed.txt.
#[derive(Parser, Debug)]
#[command(
    name = "task",
    version,
    about = "Personal task tracker",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Log diagnostics to stderr (-d info, -dd debug, -ddd trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Raw command line. Values stay strings here; they are checked when converted into
/// a [`crate::cmd::Command`] so that bad input gets the tracker's own messages.
/// Words after a command's own arguments are accepted and ignored.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new item with a priority, e.g. `add 2 hello world`.
    Add {
        /// Priority; lower numbers are listed first.
        #[arg(allow_hyphen_values = true)]
        priority: Option<String>,
        /// Task text. Words are joined with single spaces.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Show pending items sorted by priority.
    Ls {
        /// Ignored.
        #[arg(hide = true, trailing_var_arg = true)]
        extra: Vec<String>,
    },

    /// Delete the pending item at INDEX.
    Del {
        #[arg(allow_hyphen_values = true)]
        index: Option<String>,
        /// Ignored.
        #[arg(hide = true, trailing_var_arg = true)]
        extra: Vec<String>,
    },

    /// Mark the pending item at INDEX as complete.
    Done {
        #[arg(allow_hyphen_values = true)]
        index: Option<String>,
        /// Ignored.
        #[arg(hide = true, trailing_var_arg = true)]
        extra: Vec<String>,
    },

    /// Show usage.
    Help {
        /// Ignored.
        #[arg(hide = true, trailing_var_arg = true)]
        extra: Vec<String>,
    },

    /// Show pending and completed items with counts.
    Report {
        /// Ignored.
        #[arg(hide = true, trailing_var_arg = true)]
        extra: Vec<String>,
    },

    /// Generate shell completion scripts.
    #[command(hide = true)]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    #[command(external_subcommand)]
    Unknown(Vec<String>),
}
