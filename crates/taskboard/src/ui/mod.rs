//! Terminal UI helpers for task display.
//!
//! This module uses println! for CLI output, which is appropriate
//! for terminal user interfaces.

#![allow(clippy::disallowed_macros)]

use chrono::{DateTime, Local};
use colored::Colorize;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use crate::domain::due_date::classify;
use crate::domain::suggestions::format_duration;
use crate::domain::{DueDateInfo, DueStatus, Subtask, Suggestions, TaskStats};
use crate::entities::{Task, TaskPriority, TaskStatus};

/// Width of the identifier prefix shown in tables.
const SHORT_ID_LEN: usize = 8;

/// Get colored status string
pub fn status_colored(status: TaskStatus) -> String {
    match status {
        TaskStatus::Todo => status.label().yellow().to_string(),
        TaskStatus::InProgress => status.label().cyan().to_string(),
        TaskStatus::Done => status.label().green().to_string(),
    }
}

/// Get colored priority string
pub fn priority_colored(priority: TaskPriority) -> String {
    let config = priority.config();
    let text = format!("{} {}", config.icon, config.label);
    match priority {
        TaskPriority::High => text.red().bold().to_string(),
        TaskPriority::Medium => text.yellow().to_string(),
        TaskPriority::Low => text.green().to_string(),
    }
}

/// Due-date label coloured by urgency.
pub fn due_colored(info: &DueDateInfo) -> String {
    match info.status {
        DueStatus::Overdue => info.label.red().bold().to_string(),
        DueStatus::Today => info.label.yellow().bold().to_string(),
        DueStatus::Tomorrow | DueStatus::Soon => info.label.yellow().to_string(),
        DueStatus::Upcoming => info.label.normal().to_string(),
        DueStatus::None => info.label.dimmed().to_string(),
    }
}

fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Todo => Color::Yellow,
        TaskStatus::InProgress => Color::Cyan,
        TaskStatus::Done => Color::Green,
    }
}

fn priority_color(priority: TaskPriority) -> Color {
    match priority {
        TaskPriority::High => Color::Red,
        TaskPriority::Medium => Color::Yellow,
        TaskPriority::Low => Color::Green,
    }
}

fn due_color(info: &DueDateInfo) -> Color {
    match info.urgency {
        3 => Color::Red,
        1 | 2 => Color::Yellow,
        _ => Color::DarkGrey,
    }
}

/// Leading characters of a task id, enough to tell cards apart.
pub fn short_id(id: &str) -> &str {
    id.char_indices()
        .nth(SHORT_ID_LEN)
        .map_or(id, |(end, _)| &id[..end])
}

/// `1h 30m`, or `-` when no estimate is set.
pub fn estimate_display(minutes: Option<u32>) -> String {
    minutes.map_or_else(|| "-".to_string(), format_duration)
}

/// Create a table for displaying tasks
pub fn task_table(tasks: &[Task], now: &DateTime<Local>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Title").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Priority").fg(Color::Cyan),
        Cell::new("Due").fg(Color::Cyan),
        Cell::new("Estimate").fg(Color::Cyan),
    ]);

    for task in tasks {
        let due = classify(task.due_date, now);
        table.add_row(vec![
            Cell::new(short_id(&task.id)),
            Cell::new(&task.title),
            Cell::new(task.status.label()).fg(status_color(task.status)),
            Cell::new(task.priority.config().label).fg(priority_color(task.priority)),
            Cell::new(&due.label).fg(due_color(&due)),
            Cell::new(estimate_display(task.estimated_time)),
        ]);
    }

    table
}

/// Create a kanban table with one column per status.
pub fn board_table(columns: &[(TaskStatus, Vec<Task>)], now: &DateTime<Local>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(
        columns
            .iter()
            .map(|(status, tasks)| {
                Cell::new(format!("{} ({})", status.label(), tasks.len())).fg(status_color(*status))
            })
            .collect::<Vec<_>>(),
    );

    let depth = columns.iter().map(|(_, tasks)| tasks.len()).max().unwrap_or(0);
    for row in 0..depth {
        table.add_row(
            columns
                .iter()
                .map(|(_, tasks)| tasks.get(row).map_or_else(|| Cell::new(""), |t| card(t, now)))
                .collect::<Vec<_>>(),
        );
    }

    table
}

fn card(task: &Task, now: &DateTime<Local>) -> Cell {
    let config = task.priority.config();
    let mut text = format!("{} {}\n{}", config.icon, task.title, short_id(&task.id));

    let due = classify(task.due_date, now);
    if due.status != DueStatus::None {
        text.push_str(&format!("\n{}", due.label));
    }
    if let Some(minutes) = task.estimated_time {
        text.push_str(&format!("\n⏱ {}", format_duration(minutes)));
    }

    Cell::new(text).fg(due_color(&due))
}

/// Display task details in a formatted way
pub fn display_task_details(task: &Task, now: &DateTime<Local>) {
    println!("{}", "═".repeat(60).dimmed());
    println!(
        "{} {} {}",
        "Task".cyan().bold(),
        task.id.cyan().bold(),
        format!("[{}]", task.status).yellow()
    );
    println!("{}", "═".repeat(60).dimmed());
    println!();

    println!("{}: {}", "Title".bold(), task.title);
    println!("{}: {}", "Status".bold(), status_colored(task.status));
    println!(
        "{}: {}",
        "Priority".bold(),
        priority_colored(task.priority)
    );
    println!(
        "{}: {}",
        "Due".bold(),
        due_colored(&classify(task.due_date, now))
    );
    println!(
        "{}: {}",
        "Estimate".bold(),
        estimate_display(task.estimated_time)
    );
    println!(
        "{}: {}",
        "Created".bold(),
        task.created_at.with_timezone(now.offset()).format("%b %d, %Y %H:%M")
    );

    if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
        println!();
        println!("{}", "Description".bold().underline());
        println!("{description}");
    }

    println!();
}

/// Display board statistics
pub fn display_stats(stats: &TaskStats) {
    println!("{}", "Board Statistics".bold().underline());
    println!();
    println!("  Total tasks: {}", stats.total.to_string().bold());
    for status in TaskStatus::ALL {
        println!(
            "  {}: {}",
            status_colored(status),
            stats.by_status.get(status)
        );
    }
    println!();
    for priority in TaskPriority::ALL {
        println!(
            "  {}: {}",
            priority_colored(priority),
            stats.by_priority.get(priority)
        );
    }
    println!();
    println!("  Completion: {:.1}%", stats.completion_rate);
    if stats.overdue > 0 {
        println!("  {}", format!("Overdue: {}", stats.overdue).red().bold());
    } else {
        println!("  Overdue: 0");
    }
    println!(
        "  Estimated: {} total, {} done, {} remaining",
        minutes_display(stats.total_estimated_time),
        minutes_display(stats.completed_estimated_time),
        minutes_display(stats.remaining_estimated_time)
    );
}

fn minutes_display(minutes: u64) -> String {
    format_duration(u32::try_from(minutes).unwrap_or(u32::MAX))
}

/// Display generated subtasks as a numbered list
pub fn display_subtasks(subtasks: &[Subtask]) {
    if subtasks.is_empty() {
        print_warning("No subtasks were generated");
        return;
    }

    println!(
        "{} ({})",
        "Subtasks".bold().underline(),
        subtasks.len()
    );
    for (i, subtask) in subtasks.iter().enumerate() {
        println!("  {}. {}", i + 1, subtask.title.bold());
        if !subtask.description.is_empty() {
            println!("     {}", subtask.description.dimmed());
        }
    }
}

/// Display the combined suggestion set
pub fn display_suggestions(suggestions: &Suggestions) {
    println!(
        "{}: {}",
        "Suggested priority".bold(),
        priority_colored(suggestions.priority)
    );
    println!(
        "{}: {}",
        "Estimated time".bold(),
        suggestions.estimate.estimated_time_display
    );
    println!();
    display_subtasks(&suggestions.subtasks);
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::NewTask;
    use chrono::{TimeZone, Utc};

    fn task(id: &str, title: &str, status: TaskStatus) -> Task {
        let mut new = NewTask::new(title);
        new.status = status;
        Task::from_new(id, new, Utc::now())
    }

    #[test]
    fn test_short_id_truncates_long_ids() {
        assert_eq!(short_id("0b7c9f3e-1111-2222"), "0b7c9f3e");
        assert_eq!(short_id("42"), "42");
    }

    #[test]
    fn test_estimate_display() {
        assert_eq!(estimate_display(None), "-");
        assert_eq!(estimate_display(Some(90)), "1h 30m");
    }

    #[test]
    fn test_task_table_has_row_per_task() {
        let now = Local.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let tasks = vec![
            task("1", "Write docs", TaskStatus::Todo),
            task("2", "Ship", TaskStatus::Done),
        ];
        let table = task_table(&tasks, &now);
        assert_eq!(table.row_iter().count(), 2);
        assert!(table.to_string().contains("Write docs"));
    }

    #[test]
    fn test_board_table_is_as_deep_as_longest_column() {
        let now = Local.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let columns = vec![
            (
                TaskStatus::Todo,
                vec![
                    task("1", "a", TaskStatus::Todo),
                    task("2", "b", TaskStatus::Todo),
                ],
            ),
            (TaskStatus::InProgress, vec![]),
            (TaskStatus::Done, vec![task("3", "c", TaskStatus::Done)]),
        ];
        let table = board_table(&columns, &now);
        assert_eq!(table.row_iter().count(), 2);
        assert!(table.to_string().contains("To Do (2)"));
    }
}
