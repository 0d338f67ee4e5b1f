use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Column a task sits in. Ordered: a task only ever moves towards `Done`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::ToDo, Status::InProgress, Status::Done];

    pub fn index(self) -> usize {
        match self {
            Status::ToDo => 0,
            Status::InProgress => 1,
            Status::Done => 2,
        }
    }

    /// The following status, saturating at `Done`.
    pub fn next(self) -> Status {
        let last = Status::ALL.len() - 1;
        Status::ALL[(self.index() + 1).min(last)]
    }

    pub fn is_terminal(self) -> bool {
        self.next() == self
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::ToDo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::ToDo
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(raw: u64) -> Self {
        TaskId(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TaskId)
    }
}

// Persisted ids may be numbers or numeric strings.
impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(TaskId(n)),
            RawId::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
    /// A saved task already holds the largest possible id.
    IdsExhausted,
}

impl fmt::Display for TaskValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskValidationError::EmptyTitle => f.write_str("task title must not be empty"),
            TaskValidationError::IdsExhausted => f.write_str("no task ids left to assign"),
        }
    }
}

impl std::error::Error for TaskValidationError {}

/// Trimmed title, or `EmptyTitle` if nothing is left.
pub fn validate_title(title: &str) -> Result<&str, TaskValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(title)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    status: Status,
}

impl Task {
    /// Builds a `ToDo` task from raw input. Title and notes are trimmed.
    pub fn new(id: TaskId, title: &str, notes: &str) -> Result<Self, TaskValidationError> {
        let title = validate_title(title)?;
        Ok(Self {
            id,
            title: title.to_string(),
            notes: notes.trim().to_string(),
            status: Status::default(),
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// True when the title survives the same check `new` applies.
    /// Decoded records bypass `new`, so the codec uses this to filter them.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Moves one step forward. Returns whether the status changed.
    pub(crate) fn advance(&mut self) -> bool {
        let next = self.status.next();
        let changed = next != self.status;
        self.status = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_progression_saturates_at_done() {
        assert_eq!(Status::ToDo.next(), Status::InProgress);
        assert_eq!(Status::InProgress.next(), Status::Done);
        assert_eq!(Status::Done.next(), Status::Done);
        assert!(Status::Done.is_terminal());
        assert!(!Status::ToDo.is_terminal());
    }

    #[test]
    fn status_next_never_goes_backwards() {
        for status in Status::ALL {
            assert!(status.next().index() >= status.index());
            assert!(status.next().index() - status.index() <= 1);
        }
    }

    #[test]
    fn new_trims_and_rejects_blank_titles() {
        let task = Task::new(TaskId::new(1), "  Write spec ", " some notes\n").unwrap();
        assert_eq!(task.title(), "Write spec");
        assert_eq!(task.notes(), "some notes");
        assert_eq!(task.status(), Status::ToDo);

        assert_eq!(
            Task::new(TaskId::new(2), "   ", "x").unwrap_err(),
            TaskValidationError::EmptyTitle
        );
    }

    #[test]
    fn advance_reports_change() {
        let mut task = Task::new(TaskId::new(1), "A", "").unwrap();
        assert!(task.advance());
        assert!(task.advance());
        assert!(!task.advance());
        assert_eq!(task.status(), Status::Done);
    }

    #[test]
    fn status_uses_display_labels_on_the_wire() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let parsed: Status = serde_json::from_str("\"To Do\"").unwrap();
        assert_eq!(parsed, Status::ToDo);
    }

    #[test]
    fn task_id_accepts_number_or_string() {
        let from_number: TaskId = serde_json::from_str("1717171717171").unwrap();
        let from_text: TaskId = serde_json::from_str("\"1717171717171\"").unwrap();
        assert_eq!(from_number, from_text);
        assert!(serde_json::from_str::<TaskId>("\"abc\"").is_err());
    }
}
