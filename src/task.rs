//! Task data structures.
//!
//! A pending [`Task`] carries a priority and its text; a [`CompletedTask`] keeps the
//! text only. Users address pending tasks by their 1-based position in the
//! priority-sorted list, while the store tracks them by [`TaskId`] so that a position
//! is resolved exactly once per command.

use std::cmp::Ordering;
use std::fmt;

/// In-memory identity of a pending task. Assigned sequentially when the pending file
/// is loaded and never written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-negative integer priority of any size, lower sorts first.
///
/// Held as its decimal digits with leading zeros removed, so no value found in a
/// task file can overflow.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Priority(String);

impl Priority {
    pub fn new(value: u64) -> Self {
        Priority(value.to_string())
    }

    /// Parse a run of ASCII digits. Anything else, including a sign, is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = s.trim_start_matches('0');
        Some(Priority(if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pending work item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub priority: Priority,
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>, priority: u64) -> Self {
        Task::with_priority(id, text, Priority::new(priority))
    }

    pub fn with_priority(id: TaskId, text: impl Into<String>, priority: Priority) -> Self {
        Task {
            id,
            text: text.into(),
            priority,
        }
    }

    /// Drop the priority, producing the record stored in `completed.txt`.
    pub fn complete(self) -> CompletedTask {
        CompletedTask { text: self.text }
    }
}

/// A finished work item. Priority is discarded on completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTask {
    pub text: String,
}

impl CompletedTask {
    pub fn new(text: impl Into<String>) -> Self {
        CompletedTask { text: text.into() }
    }
}

/// Stable ascending-priority ordering; tasks with equal priority keep their
/// insertion order.
pub fn sorted_by_priority(tasks: &[Task]) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by(|a, b| a.priority.cmp(&b.priority));
    sorted
}
