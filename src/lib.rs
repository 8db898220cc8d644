//! # task
//!
//! A personal task tracker for the terminal. Pending tasks carry a numeric priority
//! and are always shown lowest number first; finished tasks keep only their text.
//!
//! ```bash
//! task add 2 hello world   # Added task: "hello world" with priority 2
//! task add 1 second task
//! task ls                  # 1. second task [1]
//!                          # 2. hello world [2]
//! task done 1              # Marked item as done.
//! task report
//! ```
//!
//! State lives in two plain text files in the working directory: `task.txt` holds
//! `"<priority> <text>"` lines, `completed.txt` holds one finished task per line. Both
//! are read at the start of every command and rewritten in full after a change.
//! Indices are positions in the priority-sorted list and are recomputed on each run.

pub mod cli;
pub mod cmd;
pub mod codec;
pub mod config;
pub mod db;
pub mod error;
pub mod exitcode;
pub mod format;
pub mod journal;
pub mod logging;
pub mod task;

pub use cli::{Cli, Commands};
pub use cmd::{execute, execute_command, parse_command, Command};
pub use config::StoreConfig;
pub use db::TaskStore;
pub use error::{Operation, Result, TaskError, ValidationError};
