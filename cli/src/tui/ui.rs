use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};
use taskboard_core::{Board, FormField, Status, Task, TaskStorage};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::app::{App, InputMode};

pub fn draw<S: TaskStorage>(f: &mut Frame, app: &mut App<S>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Intake form
            Constraint::Min(1),    // Board
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let header = Paragraph::new("TASK TRACKER")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    draw_form(f, app, main_chunks[1]);
    draw_board(f, app, main_chunks[2]);

    let help = match app.input_mode {
        InputMode::Normal => "h/l: Column | j/k: Card | Enter: Move Forward | d: Delete | a: Add | q: Quit",
        InputMode::Adding => "Tab: Switch field | Enter: Add Task | Esc: Cancel",
    };
    let footer_text = match &app.message {
        Some(msg) => format!("{}  ·  {}", msg, help),
        None => help.to_string(),
    };
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);
}

fn draw_form<S: TaskStorage>(f: &mut Frame, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Percentage(20),
        ])
        .split(area);

    let adding = matches!(app.input_mode, InputMode::Adding);
    let form = &app.form;

    let field_block = |title: &'static str, focused: bool| {
        let style = if adding && focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style)
    };

    let title_focused = form.focus() == FormField::Title;
    let title = if form.title().is_empty() && !adding {
        Paragraph::new("Task title (required)").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(form.title())
    };
    f.render_widget(title.block(field_block(" Title ", title_focused)), chunks[0]);

    let notes = if form.notes().is_empty() && !adding {
        Paragraph::new("Notes (optional)").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(form.notes())
    };
    f.render_widget(notes.block(field_block(" Notes ", !title_focused)), chunks[1]);

    // Mirrors a disabled submit button.
    let button_style = if form.is_valid() {
        Style::default().fg(Color::White).bg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let button = Paragraph::new("Add Task")
        .style(button_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(button, chunks[2]);

    if adding {
        let field_area = if title_focused { chunks[0] } else { chunks[1] };
        let text = if title_focused { form.title() } else { form.notes() };
        let before: String = text.chars().take(form.cursor_position()).collect();
        let x = field_area.x + 1 + before.width() as u16;
        f.set_cursor_position((x.min(field_area.right().saturating_sub(2)), field_area.y + 1));
    }
}

fn draw_board<S: TaskStorage>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let board = Board::project(app.store.snapshot());
    for (i, column) in board.columns().iter().enumerate() {
        let selected = i == app.selected_column;
        let border_style = if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let block = Block::default()
            .title(format!(" {} ({}) ", column.status().label().to_uppercase(), column.len()))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);

        if column.is_empty() {
            let empty = Paragraph::new("No tasks")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(empty, chunks[i]);
            continue;
        }

        let inner_width = chunks[i].width.saturating_sub(5) as usize;
        let items: Vec<ListItem> = column
            .tasks()
            .iter()
            .map(|task| card(task, inner_width))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(if selected {
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            })
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, chunks[i], &mut app.column_states[i]);
    }
}

fn card(task: &Task, width: usize) -> ListItem<'static> {
    let marker = match task.status() {
        Status::ToDo => "☐ ",
        Status::InProgress => "▶ ",
        Status::Done => "✔ ",
    };
    let mut lines = vec![Line::from(vec![
        Span::raw(marker),
        Span::styled(
            truncate_to_width(task.title(), width.saturating_sub(2)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])];
    if !task.notes().is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", truncate_to_width(task.notes(), width.saturating_sub(2))),
            Style::default().fg(Color::Gray),
        )));
    }
    if Board::can_advance(task) {
        lines.push(Line::from(Span::styled(
            "  [Move Forward] [Delete]",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled("  [Delete]", Style::default().fg(Color::DarkGray))));
    }
    ListItem::new(lines)
}

/// Cuts `text` to at most `max` display columns, marking the cut with `…`.
fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::truncate_to_width;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("abc", 3), "abc");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("abcdef", 0), "");
    }

    #[test]
    fn wide_chars_count_double() {
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
    }
}
