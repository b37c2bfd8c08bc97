//! Taskboard CLI - kanban board over the task REST API.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::disallowed_macros)]
#![allow(clippy::uninlined_format_args)]

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use taskboard::client::{seed, ApiClient, BoardState, DEFAULT_API_URL};
use taskboard::domain::due_date::sort_by_due_date;
use taskboard::domain::priority::sort_by_priority;
use taskboard::entities::{Patch, TaskPriority, TaskStatus};
use taskboard::{TaskFilter, TaskPayload};
use taskboard::ui;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Kanban task board with AI-assisted planning", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Task API base URL
    #[arg(long, global = true, env = "TASKBOARD_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortOrder {
    /// Newest first, as returned by the server
    Created,
    /// High priority first
    Priority,
    /// Overdue first, then soonest due
    Due,
}

#[derive(Clone, Copy, ValueEnum)]
enum Hint {
    All,
    Breakdown,
    Priority,
    Estimate,
}

#[derive(Subcommand)]
enum Commands {
    /// List tasks in a table
    List {
        /// Filter by status (todo, in_progress, done)
        #[arg(short, long)]
        status: Option<TaskStatus>,

        /// Filter by priority (low, medium, high)
        #[arg(short, long)]
        priority: Option<TaskPriority>,

        /// Free-text search over title and description
        #[arg(long)]
        search: Option<String>,

        /// Sort order
        #[arg(long, value_enum, default_value = "created")]
        sort: SortOrder,
    },

    /// Show the kanban board
    Board {
        /// Free-text search over title and description
        #[arg(long)]
        search: Option<String>,

        /// Only show cards with this priority
        #[arg(short, long)]
        priority: Option<TaskPriority>,
    },

    /// Show details of a specific task
    Show {
        /// Task ID
        id: String,
    },

    /// Create a new task
    Create {
        /// Task title
        #[arg(short, long)]
        title: String,

        /// Task description
        #[arg(short, long)]
        description: Option<String>,

        /// Status (todo, in_progress, done)
        #[arg(short, long)]
        status: Option<String>,

        /// Priority (low, medium, high)
        #[arg(short, long)]
        priority: Option<String>,

        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,

        /// Estimated time in minutes
        #[arg(long)]
        estimate: Option<u32>,
    },

    /// Update fields of a task
    Update {
        /// Task ID
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        status: Option<String>,

        #[arg(short, long)]
        priority: Option<String>,

        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,

        /// Estimated time in minutes
        #[arg(long, conflicts_with = "clear_estimate")]
        estimate: Option<u32>,

        /// Remove the time estimate
        #[arg(long)]
        clear_estimate: bool,
    },

    /// Move a task to another column
    Move {
        /// Task ID
        id: String,

        /// Target status (todo, in_progress, done)
        status: TaskStatus,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },

    /// Show board statistics
    Stats,

    /// Ask for AI planning hints for a description
    Suggest {
        /// Task description
        description: String,

        /// Due date to take into account for priority
        #[arg(long)]
        due: Option<String>,

        /// Which hint to request
        #[arg(long, value_enum, default_value = "all")]
        only: Hint,
    },

    /// Insert the sample task set
    Seed,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let client = ApiClient::new(&cli.api_url, Duration::from_secs(cli.timeout))
        .context("Failed to create API client")?;
    let now = Local::now();

    match cli.command {
        Commands::List {
            status,
            priority,
            search,
            sort,
        } => {
            let filter = TaskFilter {
                search: search.unwrap_or_default(),
                status,
                priority,
            };
            let mut tasks = client.list_tasks(&filter).await?;

            match sort {
                SortOrder::Created => {}
                SortOrder::Priority => sort_by_priority(&mut tasks),
                SortOrder::Due => sort_by_due_date(&mut tasks, &now),
            }

            if tasks.is_empty() {
                ui::print_info("No tasks found");
                return Ok(());
            }

            println!("{}", ui::task_table(&tasks, &now));
            println!();
            println!("{} task(s)", tasks.len());
        }

        Commands::Board { search, priority } => {
            let mut board = BoardState::new(client);
            board.refresh().await?;
            if let Some(search) = search {
                board.set_search(search);
            }
            board.set_priority_filter(priority);

            println!("{}", ui::board_table(&board.columns(), &now));
            let shown = board.visible().len();
            let total = board.tasks().len();
            if shown == total {
                println!("{} task(s)", total);
            } else {
                println!("{} of {} task(s) match the filter", shown, total);
            }
        }

        Commands::Show { id } => {
            let task = client.get_task(&id).await?;
            ui::display_task_details(&task, &now);
        }

        Commands::Create {
            title,
            description,
            status,
            priority,
            due,
            estimate,
        } => {
            let mut payload = TaskPayload::default().title(title);
            if let Some(description) = description {
                payload = payload.description(description);
            }
            if let Some(status) = status {
                payload = payload.status(status);
            }
            if let Some(priority) = priority {
                payload = payload.priority(priority);
            }
            if let Some(due) = due {
                payload = payload.due_date(due);
            }
            if let Some(minutes) = estimate {
                payload = payload.estimated_time(minutes);
            }

            let task = client.create_task(&payload).await?;
            ui::print_success(&format!("Created task {}: {}", task.id, task.title));
        }

        Commands::Update {
            id,
            title,
            description,
            status,
            priority,
            due,
            clear_due,
            estimate,
            clear_estimate,
        } => {
            let mut payload = TaskPayload::default();
            if let Some(title) = title {
                payload = payload.title(title);
            }
            if let Some(description) = description {
                payload = payload.description(description);
            }
            if let Some(status) = status {
                payload = payload.status(status);
            }
            if let Some(priority) = priority {
                payload = payload.priority(priority);
            }
            if let Some(due) = due {
                payload = payload.due_date(due);
            }
            if clear_due {
                payload.due_date = Patch::Null;
            }
            if let Some(minutes) = estimate {
                payload = payload.estimated_time(minutes);
            }
            if clear_estimate {
                payload.estimated_time = Patch::Null;
            }

            if payload == TaskPayload::default() {
                ui::print_warning("Nothing to update");
                return Ok(());
            }

            let task = client.update_task(&id, &payload).await?;
            ui::print_success(&format!("Updated task {}", task.id));
            ui::display_task_details(&task, &now);
        }

        Commands::Move { id, status } => {
            let mut board = BoardState::new(client);
            board.refresh().await?;

            if board.move_task(&id, status).await? {
                ui::print_success(&format!("Moved task {} to {}", id, status.label()));
            } else if board.tasks().iter().any(|t| t.id == id) {
                ui::print_info(&format!("Task {} is already in {}", id, status.label()));
            } else {
                anyhow::bail!("Task '{id}' not found");
            }
        }

        Commands::Delete { id } => {
            client.delete_task(&id).await?;
            ui::print_success(&format!("Deleted task {id}"));
        }

        Commands::Stats => {
            let stats = client.analytics().await?;
            ui::display_stats(&stats);
        }

        Commands::Suggest {
            description,
            due,
            only,
        } => match only {
            Hint::All => {
                let suggestions = client.suggestions(&description, due.as_deref()).await?;
                ui::display_suggestions(&suggestions);
            }
            Hint::Breakdown => {
                let subtasks = client.breakdown(&description).await?;
                ui::display_subtasks(&subtasks);
            }
            Hint::Priority => {
                let priority = client.suggest_priority(&description, due.as_deref()).await?;
                println!(
                    "{}: {}",
                    "Suggested priority".bold(),
                    ui::priority_colored(priority)
                );
            }
            Hint::Estimate => {
                let estimate = client.estimate_time(&description).await?;
                println!(
                    "{}: {} ({} minutes)",
                    "Estimated time".bold(),
                    estimate.estimated_time_display,
                    estimate.estimated_time
                );
            }
        },

        Commands::Seed => {
            let samples = seed::sample_tasks(Utc::now());
            ui::print_info(&format!("Seeding {} sample tasks...", samples.len()));
            for payload in &samples {
                client
                    .create_task(payload)
                    .await
                    .context("Failed to insert sample task")?;
            }
            ui::print_success(&format!("Inserted {} tasks", samples.len()));

            let stats = client.analytics().await?;
            println!();
            ui::display_stats(&stats);
        }
    }

    Ok(())
}
