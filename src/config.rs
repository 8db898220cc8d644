//! Locations of the files the tracker reads and writes.
//!
//! There is no configuration file: the tracker always works on fixed file names in a
//! single directory, which is the current working directory for the binary.

use std::path::{Path, PathBuf};

pub const TASK_FILE: &str = "task.txt";
pub const COMPLETED_FILE: &str = "completed.txt";
pub const JOURNAL_FILE: &str = ".task.journal";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Pending tasks, one `"<priority> <text>"` per line.
    pub task_file: PathBuf,
    /// Completed task texts, one per line.
    pub completed_file: PathBuf,
    /// Write-ahead record of an in-flight `done`; absent when no commit is pending.
    pub journal_file: PathBuf,
}

impl StoreConfig {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        StoreConfig {
            task_file: dir.join(TASK_FILE),
            completed_file: dir.join(COMPLETED_FILE),
            journal_file: dir.join(JOURNAL_FILE),
        }
    }
}

impl Default for StoreConfig {
    /// Bare file names, resolved against the working directory on every access.
    fn default() -> Self {
        StoreConfig {
            task_file: PathBuf::from(TASK_FILE),
            completed_file: PathBuf::from(COMPLETED_FILE),
            journal_file: PathBuf::from(JOURNAL_FILE),
        }
    }
}
