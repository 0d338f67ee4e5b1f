mod list;
mod logging;
mod tui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use taskboard_core::{
    default_data_dir, FileTaskStorage, MemoryTaskStorage, TaskId, TaskStorage, TaskStore,
    DEFAULT_STORAGE_KEY,
};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "A three-column task board for the terminal", long_about = None)]
struct Cli {
    /// Where tasks and logs are kept (default: ~/.taskboard)
    #[arg(long, global = true, env = "TASKBOARD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Keep tasks in memory only; nothing is read or saved
    #[arg(long, global = true)]
    ephemeral: bool,

    /// trace, debug, info, warn or error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a new task (usage: add Buy milk --notes "2 litres")
    Add {
        /// Task title
        #[arg(required = true)]
        title: Vec<String>,
        /// Optional notes
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// Move a task to the next status
    Advance { id: TaskId },
    /// Delete a task
    Delete { id: TaskId },
    /// Print the board
    List,
    /// Open the Terminal User Interface
    Tui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir, cli.ephemeral)?;

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or_else(|| logging::default_log_level());
    let _logger = match &data_dir {
        Some(dir) => match logging::init(level, &dir.join("logs")) {
            Ok(handle) => Some(handle),
            Err(e) => {
                eprintln!("Warning: logging disabled: {:#}", e);
                None
            }
        },
        None => None,
    };

    let storage: Box<dyn TaskStorage> = match data_dir {
        Some(dir) => Box::new(FileTaskStorage::new(Some(dir), DEFAULT_STORAGE_KEY)?),
        None => Box::new(MemoryTaskStorage::new()),
    };
    let mut store = TaskStore::open(storage);

    match cli.command {
        Some(Commands::Add { title, notes }) => match store.add(&title.join(" "), &notes) {
            Ok(task) => {
                println!("Task added: {} (ID: {})", task.title(), task.id());
                if !task.notes().is_empty() {
                    println!("  Notes: {}", task.notes());
                }
                println!("  Status: {}", task.status());
            }
            Err(e) => println!("Error: {}.", e),
        },
        Some(Commands::Advance { id }) => {
            if store.advance(id) {
                if let Some(task) = store.get(id) {
                    println!("Task {} moved to {}", id, task.status());
                }
            } else if let Some(task) = store.get(id) {
                println!("Task {} is already {}", id, task.status());
            } else {
                println!("No task with ID {}", id);
            }
        }
        Some(Commands::Delete { id }) => {
            if store.delete(id) {
                println!("Task {} deleted", id);
            } else {
                println!("No task with ID {}", id);
            }
        }
        Some(Commands::List) => list::show_board(store.snapshot()),
        Some(Commands::Tui) | None => tui::run(store)?,
    }
    Ok(())
}

/// Ephemeral runs touch no directory at all, not even for logs.
fn resolve_data_dir(flag: Option<PathBuf>, ephemeral: bool) -> Result<Option<PathBuf>> {
    if ephemeral {
        return Ok(None);
    }
    match flag {
        Some(dir) => Ok(Some(dir)),
        None => default_data_dir().map(Some),
    }
}
