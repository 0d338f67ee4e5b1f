use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use taskboard_core::{Board, Column, Task};

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl From<&Task> for CardRow {
    fn from(task: &Task) -> Self {
        CardRow {
            id: task.id().to_string(),
            title: task.title().to_string(),
            notes: if task.notes().is_empty() {
                "-".to_string()
            } else {
                task.notes().to_string()
            },
        }
    }
}

pub fn show_board(tasks: &[Task]) {
    let board = Board::project(tasks);
    for column in board.columns() {
        print!("{}", render_column(column));
    }
}

fn render_column(column: &Column) -> String {
    let header = format!(
        "\n\x1b[1;36m{}\x1b[0m ({})\n",
        column.status().label().to_uppercase(),
        column.len()
    );
    if column.is_empty() {
        return format!("{}  No tasks\n", header);
    }

    let rows: Vec<CardRow> = column.tasks().iter().map(|t| CardRow::from(*t)).collect();
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

    format!("{}{}\n", header, table)
}
