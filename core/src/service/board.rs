use crate::model::task::{Status, Task};

/// Tasks sharing one status, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Column<'a> {
    status: Status,
    tasks: Vec<&'a Task>,
}

impl<'a> Column<'a> {
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn tasks(&self) -> &[&'a Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Rendered as "No tasks".
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn titles(&self) -> Vec<&'a str> {
        self.tasks.iter().map(|t| t.title()).collect()
    }
}

/// Read-only projection of a snapshot into one column per status.
///
/// Holds no state of its own; re-project after every store change.
#[derive(Debug, Clone, PartialEq)]
pub struct Board<'a> {
    columns: Vec<Column<'a>>,
}

impl<'a> Board<'a> {
    pub fn project(tasks: &'a [Task]) -> Self {
        let columns = Status::ALL
            .iter()
            .map(|&status| Column {
                status,
                tasks: tasks.iter().filter(|t| t.status() == status).collect(),
            })
            .collect();
        Self { columns }
    }

    /// Columns in status order.
    pub fn columns(&self) -> &[Column<'a>] {
        &self.columns
    }

    pub fn column(&self, status: Status) -> &Column<'a> {
        &self.columns[status.index()]
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Whether the card should offer "Move Forward".
    pub fn can_advance(task: &Task) -> bool {
        !task.status().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::task_store::TaskStore;
    use crate::storage::MemoryTaskStorage;

    #[test]
    fn groups_by_status_in_insertion_order() {
        let mut store = TaskStore::open(MemoryTaskStorage::new());
        store.add("A", "").unwrap();
        let b = store.add("B", "").unwrap();
        store.add("C", "").unwrap();
        store.advance(b.id());

        let board = Board::project(store.snapshot());
        assert_eq!(board.column(Status::ToDo).titles(), vec!["A", "C"]);
        assert_eq!(board.column(Status::InProgress).titles(), vec!["B"]);
        assert!(board.column(Status::Done).is_empty());
        assert_eq!(board.total(), 3);
    }

    #[test]
    fn two_new_tasks_land_in_todo_in_order() {
        let mut store = TaskStore::open(MemoryTaskStorage::new());
        store.add("A", "").unwrap();
        store.add("B", "").unwrap();

        let board = Board::project(store.snapshot());
        assert_eq!(board.column(Status::ToDo).titles(), vec!["A", "B"]);
    }

    #[test]
    fn empty_snapshot_has_three_empty_columns() {
        let board = Board::project(&[]);
        let statuses: Vec<Status> = board.columns().iter().map(Column::status).collect();
        assert_eq!(statuses, Status::ALL.to_vec());
        assert!(board.columns().iter().all(Column::is_empty));
    }

    #[test]
    fn done_cards_cannot_advance() {
        let mut store = TaskStore::open(MemoryTaskStorage::new());
        let task = store.add("A", "").unwrap();
        assert!(Board::can_advance(store.get(task.id()).unwrap()));
        store.advance(task.id());
        store.advance(task.id());
        assert!(!Board::can_advance(store.get(task.id()).unwrap()));
    }
}
