//! JSON encoding of the full task sequence.
//!
//! Records look like `{"id":1717171717171,"title":"..","notes":"..","status":"To Do"}`.

use std::collections::HashSet;

use anyhow::Result;
use log::warn;
use serde_json::Value;

use crate::model::task::Task;

pub fn encode(tasks: &[Task]) -> Result<String> {
    Ok(serde_json::to_string(tasks)?)
}

/// Parses a saved sequence. Only a blob that is not a JSON array fails as a
/// whole. Individual records that cannot be read (unknown status, bad id,
/// missing title) or that would break store invariants (blank title,
/// repeated id) are dropped; the first occurrence of an id wins.
pub fn decode(data: &str) -> Result<Vec<Task>> {
    let records: Vec<Value> = serde_json::from_str(data)?;
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let task: Task = match serde_json::from_value(record) {
            Ok(task) => task,
            Err(e) => {
                warn!("Dropping unreadable saved task #{}: {}", index, e);
                continue;
            }
        };
        if !task.is_valid() {
            warn!("Dropping saved task {} with an empty title", task.id());
            continue;
        }
        if !seen.insert(task.id()) {
            warn!("Dropping saved task with duplicate id {}", task.id());
            continue;
        }
        kept.push(task);
    }

    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{Status, TaskId};

    #[test]
    fn reads_the_browser_era_format() {
        let data = r#"[
            {"id": 1717000000000, "title": "Write spec", "notes": "", "status": "To Do"},
            {"id": "1717000000001", "title": "Ship", "notes": "friday", "status": "Done"}
        ]"#;
        let tasks = decode(data).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id(), TaskId::new(1_717_000_000_000));
        assert_eq!(tasks[0].status(), Status::ToDo);
        assert_eq!(tasks[1].notes(), "friday");
        assert_eq!(tasks[1].status(), Status::Done);
    }

    #[test]
    fn encode_then_decode_reproduces_the_sequence() {
        let mut done = Task::new(TaskId::new(3), "C", "").unwrap();
        done.advance();
        done.advance();
        let tasks = vec![
            Task::new(TaskId::new(1), "A", "first").unwrap(),
            Task::new(TaskId::new(2), "B \"quoted\"", "line\nbreak").unwrap(),
            done,
        ];
        let decoded = decode(&encode(&tasks).unwrap()).unwrap();
        assert_eq!(decoded, tasks);
    }

    #[test]
    fn drops_blank_titles_and_duplicate_ids() {
        let data = r#"[
            {"id": 1, "title": "A", "notes": "", "status": "To Do"},
            {"id": 2, "title": "   ", "notes": "", "status": "To Do"},
            {"id": 1, "title": "A again", "notes": "", "status": "Done"}
        ]"#;
        let tasks = decode(data).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title(), "A");
    }

    #[test]
    fn unreadable_records_do_not_take_their_neighbours_down() {
        let data = r#"[
            {"id": 1, "title": "Keep me", "notes": "", "status": "To Do"},
            {"id": 2, "title": "Blocked one", "notes": "", "status": "Blocked"},
            {"id": -3, "title": "Negative", "notes": "", "status": "To Do"},
            {"id": "x4", "title": "Bad id", "notes": "", "status": "To Do"},
            {"id": 5, "notes": "no title", "status": "To Do"},
            {"id": 6, "title": "Keep me too", "notes": "", "status": "Done"}
        ]"#;
        let tasks = decode(data).unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec!["Keep me", "Keep me too"]);
    }

    #[test]
    fn rejects_blobs_that_are_not_a_task_array() {
        assert!(decode("not json").is_err());
        assert!(decode(r#"{"id":1}"#).is_err());
    }
}
