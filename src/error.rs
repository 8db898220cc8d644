//! Error types reported to the user.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::exitcode;

/// The mutating operation an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Delete,
    Mark,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Operation::Add => "add",
            Operation::Delete => "delete",
            Operation::Mark => "mark",
        };
        f.write_str(verb)
    }
}

/// Malformed or missing command arguments.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Error: Missing tasks string. Nothing added!")]
    MissingTask,

    #[error("Error: Task text must fit on one line. Nothing added!")]
    MultilineText,

    #[error("Error: Missing NUMBER for deleting tasks.")]
    MissingDeleteIndex,

    #[error("Error: Missing NUMBER for marking tasks as done.")]
    MissingDoneIndex,
}

#[derive(Error, Debug)]
pub enum TaskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{}", out_of_range_message(.index, .op))]
    IndexOutOfRange { index: i64, op: Operation },

    #[error("Error: Unknown command \"{0}\". Run \"task help\" for usage.")]
    UnknownCommand(String),

    #[error("Cannot {op} the item.")]
    Write {
        op: Operation,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TaskError>;

fn out_of_range_message(index: &i64, op: &Operation) -> String {
    match op {
        Operation::Mark => format!("Error: no incomplete item with index #{index} exists."),
        Operation::Add | Operation::Delete => {
            format!("Error: task with index #{index} does not exist. Nothing deleted.")
        }
    }
}

impl TaskError {
    pub fn write(op: Operation, source: io::Error) -> Self {
        TaskError::Write { op, source }
    }

    /// Exit code for this error (sysexits-style).
    pub fn exit_code(&self) -> i32 {
        match self {
            TaskError::Validation(_)
            | TaskError::IndexOutOfRange { .. }
            | TaskError::UnknownCommand(_) => exitcode::USAGE,
            TaskError::Write { .. } => exitcode::IOERR,
        }
    }
}
