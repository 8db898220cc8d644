//! Task store: loading, mutating and persisting the pending and completed lists.
//!
//! Both lists are read fresh when the store is opened and written back in full after
//! a mutation. Users address pending tasks by their 1-based position in the
//! priority-sorted list; the store resolves that position to a [`TaskId`] once and
//! mutates by id.
//!
//! There is no cross-process locking. Two invocations running at the same time race
//! and the last writer wins.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::codec;
use crate::config::StoreConfig;
use crate::error::{Operation, Result, TaskError, ValidationError};
use crate::journal::{self, Journal};
use crate::task::{sorted_by_priority, CompletedTask, Priority, Task, TaskId};

/// Pending and completed tasks as loaded from disk.
#[derive(Debug)]
pub struct TaskStore {
    config: StoreConfig,
    pending: Vec<Task>,
    completed: Vec<CompletedTask>,
    /// Set when a leftover journal could not be applied on open. The lists then come
    /// from the journal, and the next save rewrites both files through a new journal.
    unapplied_journal: bool,
    /// Files that exist but could not be read. Their lists loaded empty, so saving over
    /// them would discard whatever they hold.
    unreadable: Vec<PathBuf>,
}

impl TaskStore {
    /// Open the store, finishing any interrupted `done` commit first. Never fails:
    /// unreadable files load as empty lists.
    pub fn open(config: StoreConfig) -> Self {
        if let Some(leftover) = journal::read(&config) {
            let started = leftover
                .created_at()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| leftover.created_at_utc.to_string());
            warn!(started = %started, "completing interrupted mark-done");
            match journal::apply(&config, &leftover) {
                Ok(()) => info!("interrupted mark-done recovered"),
                Err(e) => {
                    error!(error = %e, "cannot apply journal; using journalled contents");
                    return TaskStore {
                        pending: codec::decode_pending(&leftover.pending, 1),
                        completed: codec::decode_completed(&leftover.completed),
                        config,
                        unapplied_journal: true,
                        unreadable: Vec::new(),
                    };
                }
            }
        }

        let mut unreadable = Vec::new();
        let pending = match read_text(&config.task_file) {
            Ok(content) => codec::decode_pending(&content.unwrap_or_default(), 1),
            Err(_) => {
                unreadable.push(config.task_file.clone());
                Vec::new()
            }
        };
        let completed = match read_text(&config.completed_file) {
            Ok(content) => codec::decode_completed(&content.unwrap_or_default()),
            Err(_) => {
                unreadable.push(config.completed_file.clone());
                Vec::new()
            }
        };

        TaskStore {
            config,
            pending,
            completed,
            unapplied_journal: false,
            unreadable,
        }
    }

    /// Pending tasks in storage order.
    pub fn pending(&self) -> &[Task] {
        &self.pending
    }

    pub fn completed(&self) -> &[CompletedTask] {
        &self.completed
    }

    /// Pending tasks in display order.
    pub fn sorted_pending(&self) -> Vec<&Task> {
        sorted_by_priority(&self.pending)
    }

    /// Resolve a 1-based display position to the task's id.
    pub fn resolve(&self, index: i64, op: Operation) -> Result<TaskId> {
        let out_of_range = || TaskError::IndexOutOfRange { index, op };
        let position = usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .ok_or_else(out_of_range)?;
        self.sorted_pending()
            .get(position)
            .map(|t| t.id)
            .ok_or_else(out_of_range)
    }

    fn next_id(&self) -> TaskId {
        TaskId(self.pending.iter().map(|t| t.id.0).max().unwrap_or(0) + 1)
    }

    /// Append a pending task and persist the pending file.
    pub fn add(&mut self, text: &str, priority: Priority) -> Result<Task> {
        if text.trim().is_empty() {
            return Err(ValidationError::MissingTask.into());
        }
        if text.contains(['\n', '\r']) {
            return Err(ValidationError::MultilineText.into());
        }

        let task = Task::with_priority(self.next_id(), text, priority);
        let mut pending = self.pending.clone();
        pending.push(task.clone());

        self.save(Operation::Add, pending, None)?;
        debug!(id = %task.id, priority = %task.priority, "task added");
        Ok(task)
    }

    /// Remove the pending task at display position `index`.
    pub fn delete(&mut self, index: i64) -> Result<Task> {
        let id = self.resolve(index, Operation::Delete)?;
        let (removed, pending) = self.without(id);

        self.save(Operation::Delete, pending, None)?;
        debug!(id = %id, index, "task deleted");
        Ok(removed)
    }

    /// Move the pending task at display position `index` to the completed list.
    /// Both files are rewritten through the journal.
    pub fn mark_done(&mut self, index: i64) -> Result<CompletedTask> {
        let id = self.resolve(index, Operation::Mark)?;
        let (task, pending) = self.without(id);
        let done = task.complete();
        let mut completed = self.completed.clone();
        completed.push(done.clone());

        self.save(Operation::Mark, pending, Some(completed))?;
        debug!(id = %id, index, "task marked done");
        Ok(done)
    }

    /// Split off task `id`, which must come from [`TaskStore::resolve`].
    fn without(&self, id: TaskId) -> (Task, Vec<Task>) {
        let (mut taken, rest): (Vec<Task>, Vec<Task>) =
            self.pending.iter().cloned().partition(|t| t.id == id);
        (taken.remove(0), rest)
    }

    /// Persist new lists, then adopt them. On failure the in-memory lists are kept; a
    /// two-file write that stopped halfway is finished by the next open.
    fn save(
        &mut self,
        op: Operation,
        pending: Vec<Task>,
        completed: Option<Vec<CompletedTask>>,
    ) -> Result<()> {
        let both_files = completed.is_some() || self.unapplied_journal;
        let completed = completed.unwrap_or_else(|| self.completed.clone());

        let targets = if both_files {
            vec![&self.config.task_file, &self.config.completed_file]
        } else {
            vec![&self.config.task_file]
        };
        if let Some(path) = targets.into_iter().find(|p| self.unreadable.contains(p)) {
            error!(operation = %op, path = %path.display(), "refusing to overwrite unreadable file");
            return Err(TaskError::write(
                op,
                io::Error::other(format!("{} could not be read", path.display())),
            ));
        }

        let written = if both_files {
            let journal = Journal::new(
                codec::encode_pending(&pending),
                codec::encode_completed(&completed),
            );
            journal::commit(&self.config, &journal)
        } else {
            write_atomic(&self.config.task_file, &codec::encode_pending(&pending))
        };
        if let Err(e) = written {
            error!(operation = %op, error = %e, "write failed");
            return Err(TaskError::write(op, e));
        }

        self.pending = pending;
        self.completed = completed;
        self.unapplied_journal = false;
        Ok(())
    }
}

/// Read the pending file. A missing or unreadable file is an empty list.
pub fn load_pending(path: &Path) -> Vec<Task> {
    read_text(path)
        .ok()
        .flatten()
        .map(|content| codec::decode_pending(&content, 1))
        .unwrap_or_default()
}

/// Read the completed file. A missing or unreadable file is an empty list.
pub fn load_completed(path: &Path) -> Vec<CompletedTask> {
    read_text(path)
        .ok()
        .flatten()
        .map(|content| codec::decode_completed(&content))
        .unwrap_or_default()
}

/// Read `path` as text, replacing invalid UTF-8 rather than rejecting the file.
/// `Ok(None)` when the file does not exist.
pub(crate) fn read_text(path: &Path) -> io::Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => {
            debug!(path = %path.display(), bytes = bytes.len(), "loaded");
            Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "not found, starting empty");
            Ok(None)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read, starting empty");
            Err(e)
        }
    }
}

/// Replace `path` with `contents` via a temp file and rename.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let tmp = temp_path(path);
    let mut f = fs::File::create(&tmp)?;
    f.write_all(contents.as_bytes())?;
    f.flush()?;
    f.sync_all()?;
    drop(f);
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    debug!(path = %path.display(), bytes = contents.len(), "saved");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
