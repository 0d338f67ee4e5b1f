use crate::model::task::Task;
use crate::service::task_store::TaskSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Notes,
}

/// Text fields for a new task. Holds nothing but the pending input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeForm {
    title: String,
    notes: String,
    focus: FormField,
    cursor_position: usize,
}

impl IntakeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    /// Cursor position in the focused field, counted in chars.
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        if self.focus == FormField::Title {
            self.cursor_position = self.title.chars().count();
        }
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        if self.focus == FormField::Notes {
            self.cursor_position = self.notes.chars().count();
        }
    }

    /// Submit is only possible with a non-blank title.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::Notes,
            FormField::Notes => FormField::Title,
        };
        self.cursor_position = self.focused().chars().count();
    }

    pub fn input_char(&mut self, c: char) {
        let cursor = self.cursor_position;
        let field = self.focused_mut();
        let byte_index = byte_offset(field, cursor);
        field.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let cursor = self.cursor_position - 1;
        let field = self.focused_mut();
        let byte_index = byte_offset(field, cursor);
        field.remove(byte_index);
        self.cursor_position -= 1;
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.focused().chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Hands the trimmed input to `sink`. An invalid form never reaches the
    /// sink. On success both fields are cleared and focus returns to the title.
    pub fn submit<S: TaskSink + ?Sized>(&mut self, sink: &mut S) -> Option<Task> {
        if !self.is_valid() {
            return None;
        }
        let task = sink.add(self.title.trim(), self.notes.trim()).ok()?;
        self.reset();
        Some(task)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn focused(&self) -> &String {
        match self.focus {
            FormField::Title => &self.title,
            FormField::Notes => &self.notes,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Notes => &mut self.notes,
        }
    }
}

fn byte_offset(s: &str, char_index: usize) -> usize {
    s.chars().take(char_index).map(char::len_utf8).sum()
}
