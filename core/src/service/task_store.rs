use log::{debug, error, warn};

use crate::codec;
use crate::model::id::IdGenerator;
use crate::model::task::{validate_title, Task, TaskId, TaskValidationError};
use crate::storage::TaskStorage;

/// Receives new tasks. Implemented by [`TaskStore`]; the intake form only
/// needs this much of it.
pub trait TaskSink {
    fn add(&mut self, title: &str, notes: &str) -> Result<Task, TaskValidationError>;
}

/// Actions a board offers on a single card.
pub trait TaskActions {
    /// Returns whether anything changed.
    fn advance(&mut self, id: TaskId) -> bool;
    /// Returns whether anything changed.
    fn delete(&mut self, id: TaskId) -> bool;
}

type Subscriber = Box<dyn FnMut(&[Task])>;

/// Owner of the task sequence.
///
/// Loads once from its storage when opened and writes the whole sequence back
/// after every change. Subscribers run after the save, with the new snapshot.
pub struct TaskStore<S: TaskStorage> {
    storage: S,
    tasks: Vec<Task>,
    ids: IdGenerator,
    subscribers: Vec<Subscriber>,
}

impl<S: TaskStorage> TaskStore<S> {
    /// Unreadable or malformed saved data leaves the store empty.
    pub fn open(storage: S) -> Self {
        let tasks = match storage.load() {
            Some(data) => match codec::decode(&data) {
                Ok(tasks) => tasks,
                Err(e) => {
                    warn!("Ignoring saved tasks that could not be parsed: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        debug!("Opened task store with {} task(s)", tasks.len());

        let ids = IdGenerator::seeded(tasks.iter().map(Task::id));
        Self {
            storage,
            tasks,
            ids,
            subscribers: Vec::new(),
        }
    }

    /// Appends a `ToDo` task. A blank title is rejected and nothing changes,
    /// not even the id sequence.
    pub fn add(&mut self, title: &str, notes: &str) -> Result<Task, TaskValidationError> {
        let title = validate_title(title)?;
        let id = self.ids.next_id().ok_or(TaskValidationError::IdsExhausted)?;
        let task = Task::new(id, title, notes)?;
        debug!("Adding task {} '{}'", task.id(), task.title());
        self.tasks.push(task.clone());
        self.changed();
        Ok(task)
    }

    /// Moves the task one status forward. Unknown ids and finished tasks are left alone.
    pub fn advance(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id() == id) else {
            debug!("Advance ignored, no task {}", id);
            return false;
        };
        if !task.advance() {
            return false;
        }
        debug!("Task {} moved to {}", id, task.status());
        self.changed();
        true
    }

    pub fn delete(&mut self, id: TaskId) -> bool {
        let initial_len = self.tasks.len();
        self.tasks.retain(|t| t.id() != id);
        if self.tasks.len() == initial_len {
            debug!("Delete ignored, no task {}", id);
            return false;
        }
        debug!("Deleted task {}", id);
        self.changed();
        true
    }

    /// Current tasks in insertion order.
    pub fn snapshot(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Registers a callback run after every change.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&[Task]) + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    fn changed(&mut self) {
        self.persist();
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&self.tasks);
        }
    }

    // A failed write leaves the in-memory state authoritative.
    fn persist(&self) {
        let result = codec::encode(&self.tasks).and_then(|data| self.storage.save(&data));
        if let Err(e) = result {
            error!("Failed to save tasks: {:#}", e);
        }
    }
}

impl<S: TaskStorage> TaskSink for TaskStore<S> {
    fn add(&mut self, title: &str, notes: &str) -> Result<Task, TaskValidationError> {
        TaskStore::add(self, title, notes)
    }
}

impl<S: TaskStorage> TaskActions for TaskStore<S> {
    fn advance(&mut self, id: TaskId) -> bool {
        TaskStore::advance(self, id)
    }

    fn delete(&mut self, id: TaskId) -> bool {
        TaskStore::delete(self, id)
    }
}
