//! Write-ahead journal for the two-file `done` commit.
//!
//! Marking a task done rewrites both `task.txt` and `completed.txt`. The new contents
//! of both files are first recorded in a single journal file; only then are the two
//! files rewritten and the journal removed. A journal found on startup means the
//! previous commit was interrupted, and replaying it finishes that commit.

use std::fs;
use std::io;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::db::write_atomic;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub created_at_utc: i64,
    /// Full new contents of the pending file.
    pub pending: String,
    /// Full new contents of the completed file.
    pub completed: String,
}

impl Journal {
    pub fn new(pending: String, completed: String) -> Self {
        Journal {
            created_at_utc: Utc::now().timestamp(),
            pending,
            completed,
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at_utc, 0)
    }
}

/// Record `journal`, apply it to both files, then discard it.
pub fn commit(config: &StoreConfig, journal: &Journal) -> io::Result<()> {
    let data = serde_json::to_string_pretty(journal).map_err(io::Error::other)?;
    write_atomic(&config.journal_file, &data)?;
    apply(config, journal)
}

/// Write both files from `journal` and remove the journal file. Idempotent.
pub fn apply(config: &StoreConfig, journal: &Journal) -> io::Result<()> {
    write_atomic(&config.completed_file, &journal.completed)?;
    write_atomic(&config.task_file, &journal.pending)?;
    if let Err(e) = fs::remove_file(&config.journal_file) {
        if e.kind() != io::ErrorKind::NotFound {
            return Err(e);
        }
    }
    debug!(path = %config.journal_file.display(), "journal applied");
    Ok(())
}

/// Load a leftover journal, if any. An unreadable journal is discarded: it is only
/// ever put in place by rename, so a broken one never described a started commit.
pub fn read(config: &StoreConfig) -> Option<Journal> {
    let data = match fs::read(&config.journal_file) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %config.journal_file.display(), error = %e, "cannot read journal");
            return None;
        }
    };
    match serde_json::from_str(&data) {
        Ok(journal) => Some(journal),
        Err(e) => {
            warn!(path = %config.journal_file.display(), error = %e, "discarding corrupt journal");
            if let Err(e) = fs::remove_file(&config.journal_file) {
                warn!(path = %config.journal_file.display(), error = %e, "cannot remove corrupt journal");
            }
            None
        }
    }
}
