//! Rendering of task lists and usage text for stdout.

use crate::task::{sorted_by_priority, CompletedTask, Task};

pub const NO_PENDING: &str = "There are no pending tasks!\n";

pub const USAGE: &str = "Usage :-
$ ./task add 2 hello world    # Add a new item with priority 2 and text \"hello world\" to the list
$ ./task ls                   # Show incomplete priority list items sorted by priority in ascending order
$ ./task del INDEX            # Delete the incomplete item with the given index
$ ./task done INDEX           # Mark the incomplete item with the given index as complete
$ ./task help                 # Show usage
$ ./task report               # Statistics
";

/// Numbered pending list in priority order, or [`NO_PENDING`] when empty.
pub fn render_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return NO_PENDING.to_string();
    }
    sorted_by_priority(tasks)
        .into_iter()
        .enumerate()
        .map(|(i, t)| format!("{}. {} [{}]\n", i + 1, t.text, t.priority))
        .collect()
}

/// Numbered completed list; empty input renders nothing.
pub fn render_stats(tasks: &[CompletedTask]) -> String {
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. {}\n", i + 1, t.text))
        .collect()
}

pub fn render_report(pending: &[Task], completed: &[CompletedTask]) -> String {
    format!(
        "Pending : {}\n{}\nCompleted : {}\n{}",
        pending.len(),
        render_list(pending),
        completed.len(),
        render_stats(completed)
    )
}
