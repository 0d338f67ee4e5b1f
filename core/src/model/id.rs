use chrono::Utc;

use crate::model::task::TaskId;

/// Hands out strictly increasing ids.
///
/// Ids follow the wall clock in milliseconds, but two tasks created within
/// the same millisecond still get distinct ids: a new id is always at least
/// one past the previous one.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts after every id in `existing`, so loaded tasks never collide
    /// with new ones even if the clock moved backwards since they were saved.
    pub fn seeded<I>(existing: I) -> Self
    where
        I: IntoIterator<Item = TaskId>,
    {
        let last = existing.into_iter().map(|id| id.get()).max().unwrap_or(0);
        Self { last }
    }

    /// `None` once the id space is used up; the generator never repeats an id.
    pub fn next_id(&mut self) -> Option<TaskId> {
        self.next_at(now_millis())
    }

    fn next_at(&mut self, now: u64) -> Option<TaskId> {
        let after_last = self.last.checked_add(1)?;
        self.last = now.max(after_last);
        Some(TaskId::new(self.last))
    }
}

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}
