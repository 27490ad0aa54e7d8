use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Context, Result};
use std::fs;
use std::path::PathBuf;
use taskpad::exchange;
use taskpad::filter::{Filter, project};
use taskpad::models::Priority;
use taskpad::storage::JsonStorage;
use taskpad::store::{Store, TaskPatch};
use taskpad::ui;

#[derive(Parser)]
#[command(name = "taskpad")]
#[command(about = "Taskpad CLI - local task list with JSON persistence")]
#[command(version)]
struct Cli {
    /// Path to the store directory (default: per-user data directory)
    #[arg(short, long)]
    store_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task text
        text: String,

        /// Clock time, free form (e.g. "09:00")
        #[arg(long, default_value = "")]
        time: String,

        /// Calendar date, free form (e.g. "2024-01-01")
        #[arg(long, default_value = "")]
        date: String,

        /// Task priority
        #[arg(short, long, default_value_t = Priority::Medium)]
        priority: Priority,
    },

    /// List tasks
    List {
        /// View mode: all, active or completed
        #[arg(short, long, default_value_t = Filter::All)]
        filter: Filter,
    },

    /// Mark a task as completed
    Done {
        /// Task id
        id: i64,
    },

    /// Mark a task as active again
    Undone {
        /// Task id
        id: i64,
    },

    /// Edit a task's fields
    Edit {
        /// Task id
        id: i64,

        /// Replacement text
        #[arg(long)]
        text: Option<String>,

        /// Replacement time (empty keeps the current value)
        #[arg(long)]
        time: Option<String>,

        /// Replacement date (empty keeps the current value)
        #[arg(long)]
        date: Option<String>,

        /// Replacement priority
        #[arg(long)]
        priority: Option<Priority>,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Remove every completed task
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show task counts
    Count,

    /// Write all tasks to a JSON document
    Export {
        /// Output file (default: tasks-<date>.json in the current directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Replace all tasks from a JSON document
    Import {
        /// Document to import
        file: PathBuf,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let dir = cli.store_path.unwrap_or_else(JsonStorage::default_dir);
    let mut store = Store::open(JsonStorage::open(&dir)?)?;

    match cli.command {
        Commands::Add {
            text,
            time,
            date,
            priority,
        } => match store.add(&text, &time, &date, priority)? {
            Some(task) => println!("Added: {}", ui::task_line(&task)),
            None => println!("{}", "Task text cannot be empty".red()),
        },

        Commands::List { filter } => {
            let view = project(store.tasks(), filter);
            if view.is_empty() {
                println!("{}", filter.empty_message().dimmed());
            } else {
                for task in &view {
                    println!("{}", ui::task_line(task));
                }
            }
            println!("{}", ui::remaining_line(store.active_count()).dimmed());
        }

        Commands::Done { id } => report_toggle(store.toggle(id, true)?, id, "done"),
        Commands::Undone { id } => report_toggle(store.toggle(id, false)?, id, "active"),

        Commands::Edit {
            id,
            text,
            time,
            date,
            priority,
        } => {
            let patch = TaskPatch {
                text,
                time,
                date,
                priority,
            };
            if store.edit(id, &patch)? {
                if let Some(task) = store.find(id) {
                    println!("Updated: {}", ui::task_line(task));
                }
            } else {
                println!("{}", format!("Task {} not changed", id).yellow());
            }
        }

        Commands::Rm { id, yes } => {
            if !ui::confirm("Are you sure you want to delete this task?", yes)? {
                println!("Cancelled");
            } else if store.remove(id)? {
                println!("Deleted task {}", id);
            } else {
                println!("{}", format!("No task with id {}", id).yellow());
            }
        }

        Commands::Clear { yes } => {
            if !ui::confirm("Are you sure you want to clear all completed tasks?", yes)? {
                println!("Cancelled");
            } else {
                let removed = store.clear_completed()?;
                println!("Removed {} completed task(s)", removed);
            }
        }

        Commands::Count => {
            println!(
                "{} active, {} completed, {} total",
                store.active_count(),
                store.completed_count(),
                store.len()
            );
        }

        Commands::Export { out } => {
            let path = out
                .unwrap_or_else(|| PathBuf::from(exchange::export_filename(Utc::now().date_naive())));
            let doc = exchange::export_document(store.tasks())?;
            fs::write(&path, doc)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Exported {} task(s) to {}", store.len(), path.display());
        }

        Commands::Import { file, yes } => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            match exchange::import_document(&raw) {
                Ok(tasks) => {
                    if ui::confirm("Import tasks? This will replace your current tasks.", yes)? {
                        let count = store.replace_all(tasks)?;
                        println!("{} task(s) imported successfully", count);
                    } else {
                        println!("Cancelled");
                    }
                }
                Err(e) => println!("{}", format!("Import failed: {}", e).red()),
            }
        }
    }

    Ok(())
}

fn report_toggle(applied: bool, id: i64, state: &str) {
    if applied {
        println!("Marked task {} as {}", id, state);
    } else {
        println!("{}", format!("No task with id {}", id).yellow());
    }
}
