pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::error;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use taskboard_core::{TaskStorage, TaskStore};

use crate::tui::app::App;

pub fn run<S: TaskStorage>(store: TaskStore<S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    loop_outcome(res)
}

// Reported only once the terminal is back to normal.
fn loop_outcome(res: io::Result<()>) -> Result<()> {
    if let Err(err) = &res {
        error!("TUI loop failed: {:?}", err);
    }
    Ok(res?)
}

fn run_app<B: Backend, S: TaskStorage>(terminal: &mut Terminal<B>, app: &mut App<S>) -> io::Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too.
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_key(key.code) {
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_errors_reach_the_caller() {
        let err = loop_outcome(Err(io::Error::other("terminal gone"))).unwrap_err();
        assert!(err.to_string().contains("terminal gone"));
        assert!(loop_outcome(Ok(())).is_ok());
    }
}
