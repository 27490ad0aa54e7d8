// Terminal rendering helpers for the task list

use colored::Colorize;
use dialoguer::Confirm;
use eyre::Result;

use crate::models::{Priority, Task};

/// Get colored priority string
pub fn priority_colored(priority: Priority) -> String {
    match priority {
        Priority::Low => "low".dimmed().to_string(),
        Priority::Medium => "medium".normal().to_string(),
        Priority::High => "high".red().bold().to_string(),
    }
}

/// One rendered line per task: checkbox, id, text, annotations
pub fn task_line(task: &Task) -> String {
    let check = if task.completed { "[x]" } else { "[ ]" };
    let text = if task.completed {
        task.text.strikethrough().dimmed().to_string()
    } else {
        task.text.clone()
    };

    let mut line = format!("{} {}  {} ({})", check, task.id, text, priority_colored(task.priority));
    if !task.time.is_empty() {
        line.push_str(&format!("  @ {}", task.time));
    }
    if !task.date.is_empty() {
        line.push_str(&format!("  on {}", task.date));
    }
    line
}

/// Summary line under the list
pub fn remaining_line(active: usize) -> String {
    let noun = if active == 1 { "task" } else { "tasks" };
    format!("{} {} remaining", active, noun)
}

/// Yes/no gate for destructive operations. `assume_yes` (the `--yes`
/// flag) bypasses the prompt.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(confirmed)
}
