use crossterm::event::KeyCode;
use ratatui::widgets::ListState;
use taskboard_core::{Board, IntakeForm, Status, TaskActions, TaskId, TaskStorage, TaskStore};

pub enum InputMode {
    Normal,
    Adding,
}

pub struct App<S: TaskStorage> {
    pub store: TaskStore<S>,
    pub form: IntakeForm,
    pub input_mode: InputMode,
    pub selected_column: usize,
    pub column_states: [ListState; 3],
    pub message: Option<String>,
}

impl<S: TaskStorage> App<S> {
    pub fn new(store: TaskStore<S>) -> App<S> {
        let mut app = App {
            store,
            form: IntakeForm::new(),
            input_mode: InputMode::Normal,
            selected_column: 0,
            column_states: Default::default(),
            message: None,
        };
        app.clamp_selection();
        app
    }

    /// Returns `true` when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.input_mode {
            InputMode::Normal => match code {
                KeyCode::Char('q') => return true,
                KeyCode::Left | KeyCode::Char('h') => self.previous_column(),
                KeyCode::Right | KeyCode::Char('l') => self.next_column(),
                KeyCode::Down | KeyCode::Char('j') => self.next(),
                KeyCode::Up | KeyCode::Char('k') => self.previous(),
                KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('f') => self.advance_selected(),
                KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
                KeyCode::Char('a') => self.enter_add_mode(),
                _ => {}
            },
            InputMode::Adding => match code {
                KeyCode::Enter => self.submit_form(),
                KeyCode::Esc => self.exit_input_mode(),
                KeyCode::Tab | KeyCode::BackTab => self.form.focus_next(),
                KeyCode::Char(c) => self.form.input_char(c),
                KeyCode::Backspace => self.form.delete_char(),
                KeyCode::Left => self.form.move_cursor_left(),
                KeyCode::Right => self.form.move_cursor_right(),
                _ => {}
            },
        }
        false
    }

    pub fn selected_status(&self) -> Status {
        Status::ALL[self.selected_column]
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        let row = self.column_states[self.selected_column].selected()?;
        let board = Board::project(self.store.snapshot());
        board
            .column(self.selected_status())
            .tasks()
            .get(row)
            .map(|t| t.id())
    }

    pub fn next(&mut self) {
        let len = self.column_len(self.selected_column);
        if len == 0 {
            return;
        }
        let state = &mut self.column_states[self.selected_column];
        let i = match state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.column_len(self.selected_column);
        if len == 0 {
            return;
        }
        let state = &mut self.column_states[self.selected_column];
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }

    pub fn next_column(&mut self) {
        self.selected_column = (self.selected_column + 1) % Status::ALL.len();
    }

    pub fn previous_column(&mut self) {
        self.selected_column = (self.selected_column + Status::ALL.len() - 1) % Status::ALL.len();
    }

    pub fn advance_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if self.selected_status().is_terminal() {
            self.message = Some("Task is already done".to_string());
            return;
        }
        if TaskActions::advance(&mut self.store, id) {
            self.message = self
                .store
                .get(id)
                .map(|t| format!("Moved '{}' to {}", t.title(), t.status()));
        }
        self.clamp_selection();
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let title = self.store.get(id).map(|t| t.title().to_string());
        if TaskActions::delete(&mut self.store, id) {
            self.message = title.map(|t| format!("Deleted '{}'", t));
        }
        self.clamp_selection();
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
        self.message = None;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Enter with a blank title does nothing; the form stays open.
    pub fn submit_form(&mut self) {
        if let Some(task) = self.form.submit(&mut self.store) {
            self.message = Some(format!("Added '{}'", task.title()));
            self.selected_column = Status::ToDo.index();
            let last = self.column_len(self.selected_column).saturating_sub(1);
            self.column_states[self.selected_column].select(Some(last));
            self.exit_input_mode();
        }
    }

    fn column_len(&self, column: usize) -> usize {
        Board::project(self.store.snapshot())
            .column(Status::ALL[column])
            .len()
    }

    // Keep every column's selection inside its current bounds.
    fn clamp_selection(&mut self) {
        for column in 0..Status::ALL.len() {
            let len = self.column_len(column);
            let state = &mut self.column_states[column];
            let selected = match (len, state.selected()) {
                (0, _) => None,
                (_, None) => Some(0),
                (len, Some(i)) => Some(i.min(len - 1)),
            };
            state.select(selected);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::MemoryTaskStorage;

    fn app_with(titles: &[&str]) -> App<MemoryTaskStorage> {
        let mut store = TaskStore::open(MemoryTaskStorage::new());
        for title in titles {
            store.add(title, "").unwrap();
        }
        App::new(store)
    }

    fn type_str(app: &mut App<MemoryTaskStorage>, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn adding_through_the_form() {
        let mut app = app_with(&[]);
        app.handle_key(KeyCode::Char('a'));
        type_str(&mut app, "Write spec");
        app.handle_key(KeyCode::Tab);
        type_str(&mut app, "draft first");
        app.handle_key(KeyCode::Enter);

        assert!(matches!(app.input_mode, InputMode::Normal));
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.snapshot()[0].notes(), "draft first");
        assert_eq!(app.form.title(), "");
        assert!(app.selected_task_id().is_some());
    }

    #[test]
    fn blank_submit_keeps_the_form_open() {
        let mut app = app_with(&[]);
        app.handle_key(KeyCode::Char('a'));
        type_str(&mut app, "   ");
        app.handle_key(KeyCode::Enter);

        assert!(matches!(app.input_mode, InputMode::Adding));
        assert!(app.store.is_empty());
    }

    #[test]
    fn advancing_moves_the_card_to_the_next_column() {
        let mut app = app_with(&["A", "B"]);
        app.handle_key(KeyCode::Enter);

        let board = Board::project(app.store.snapshot());
        assert_eq!(board.column(Status::ToDo).titles(), vec!["B"]);
        assert_eq!(board.column(Status::InProgress).titles(), vec!["A"]);
        assert_eq!(app.column_states[0].selected(), Some(0));
        assert_eq!(app.column_states[1].selected(), Some(0));
    }

    #[test]
    fn done_column_refuses_to_advance() {
        let mut app = app_with(&["A"]);
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.store.snapshot()[0].status(), Status::Done);
        assert_eq!(app.message.as_deref(), Some("Task is already done"));
    }

    #[test]
    fn deleting_the_last_card_clears_selection() {
        let mut app = app_with(&["A", "B"]);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.column_states[0].selected(), Some(0));
        app.handle_key(KeyCode::Char('d'));
        assert!(app.store.is_empty());
        assert_eq!(app.column_states[0].selected(), None);
        assert_eq!(app.selected_task_id(), None);
    }

    #[test]
    fn navigation_wraps() {
        let mut app = app_with(&["A", "B", "C"]);
        app.handle_key(KeyCode::Up);
        assert_eq!(app.column_states[0].selected(), Some(2));
        app.handle_key(KeyCode::Down);
        assert_eq!(app.column_states[0].selected(), Some(0));
        app.handle_key(KeyCode::Left);
        assert_eq!(app.selected_status(), Status::Done);
    }

    #[test]
    fn q_quits_only_outside_the_form() {
        let mut app = app_with(&[]);
        app.handle_key(KeyCode::Char('a'));
        assert!(!app.handle_key(KeyCode::Char('q')));
        assert_eq!(app.form.title(), "q");
        app.handle_key(KeyCode::Esc);
        assert!(app.handle_key(KeyCode::Char('q')));
    }
}
