//! Line codec for the two flat files.
//!
//! `task.txt` holds one `"<priority> <text>"` per line, `completed.txt` holds the bare
//! text of each finished task. Decoding is lenient: lines that do not match the
//! expected shape are skipped, never reported.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::task::{sorted_by_priority, CompletedTask, Priority, Task, TaskId};

static PENDING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\s(.*)$").expect("pending line pattern is valid"));

static COMPLETED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_].*$").expect("completed line pattern is valid"));

/// Decode the pending file. Ids are handed out from `first_id` upwards in file order.
pub fn decode_pending(content: &str, first_id: u64) -> Vec<Task> {
    let mut tasks = Vec::new();
    let mut next_id = first_id;
    for line in content.lines() {
        let Some(caps) = PENDING_LINE.captures(line) else {
            trace!(line, "skipping malformed pending line");
            continue;
        };
        let Some(priority) = Priority::parse(&caps[1]) else {
            trace!(line, "skipping pending line with unparsable priority");
            continue;
        };
        tasks.push(Task::with_priority(TaskId(next_id), &caps[2], priority));
        next_id += 1;
    }
    tasks
}

pub fn decode_completed(content: &str) -> Vec<CompletedTask> {
    content
        .lines()
        .filter(|line| COMPLETED_LINE.is_match(line))
        .map(CompletedTask::new)
        .collect()
}

/// Encode pending tasks in ascending-priority order.
pub fn encode_pending(tasks: &[Task]) -> String {
    sorted_by_priority(tasks)
        .into_iter()
        .map(|t| format!("{} {}\n", t.priority, t.text))
        .collect()
}

pub fn encode_completed(tasks: &[CompletedTask]) -> String {
    tasks.iter().map(|t| format!("{}\n", t.text)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn decodes_priority_and_verbatim_text() {
        let tasks = decode_pending("2 hello  world \n10 later\n", 1);
        assert_eq!(
            tasks,
            vec![
                Task::new(TaskId(1), "hello  world ", 2),
                Task::new(TaskId(2), "later", 10),
            ]
        );
    }

    #[rstest]
    #[case("no priority here")]
    #[case("-1 negative")]
    #[case("3")]
    #[case(" 3 leading space")]
    #[case("")]
    fn skips_malformed_pending_lines(#[case] line: &str) {
        assert!(decode_pending(line, 1).is_empty());
    }

    #[test]
    fn keeps_priorities_wider_than_u64() {
        let content = "5000000000 big one\n1 small\n123456789012345678901234567890 huge\n";
        let tasks = decode_pending(content, 1);

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].priority.to_string(), "5000000000");
        assert_eq!(
            encode_pending(&tasks),
            "1 small\n5000000000 big one\n123456789012345678901234567890 huge\n"
        );
    }

    #[test]
    fn handles_crlf_line_endings() {
        let tasks = decode_pending("1 a\r\n2 b\r\n", 1);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].text, "a");
        assert_eq!(tasks[1].text, "b");

        let done = decode_completed("x\r\ny\r\n");
        assert_eq!(done, vec![CompletedTask::new("x"), CompletedTask::new("y")]);
    }

    #[test]
    fn completed_lines_must_start_with_word_character() {
        let done = decode_completed("buy milk\n- bullet\n\n_under\n  indented\n9 lives\n");
        let texts: Vec<&str> = done.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["buy milk", "_under", "9 lives"]);
    }

    #[test]
    fn ids_start_at_requested_value() {
        let tasks = decode_pending("1 a\nbad\n1 b\n", 5);
        let ids: Vec<TaskId> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TaskId(5), TaskId(6)]);
    }

    #[test]
    fn pending_is_written_sorted() {
        let tasks = vec![
            Task::new(TaskId(1), "b", 2),
            Task::new(TaskId(2), "a", 1),
            Task::new(TaskId(3), "c", 2),
        ];
        assert_eq!(encode_pending(&tasks), "1 a\n2 b\n2 c\n");
    }

    #[test]
    fn pending_survives_a_write_and_reread() {
        let tasks = vec![
            Task::new(TaskId(1), "zeta", 9),
            Task::new(TaskId(2), "alpha beta", 0),
            Task::new(TaskId(3), "gamma", 9),
        ];
        let mut reread: Vec<(Priority, String)> = decode_pending(&encode_pending(&tasks), 1)
            .into_iter()
            .map(|t| (t.priority, t.text))
            .collect();
        let mut original: Vec<(Priority, String)> =
            tasks.into_iter().map(|t| (t.priority, t.text)).collect();
        reread.sort();
        original.sort();
        assert_eq!(reread, original);
    }

    #[test]
    fn completed_is_written_in_stored_order() {
        let done = vec![CompletedTask::new("second"), CompletedTask::new("first")];
        assert_eq!(encode_completed(&done), "second\nfirst\n");
        assert_eq!(encode_completed(&[]), "");
    }
}
