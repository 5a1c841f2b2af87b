use chrono::Local;
use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{info, warn};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

mod cli;
mod config;

use cli::Cli;
use cli::commands::{Commands, EditArgs};
use config::Config;
use taskplanner::domain::{Category, Priority, Task, TaskFields, TaskPatch};
use taskplanner::storage::FileKvStore;
use taskplanner::store::{SortKey, StatusFilter, TaskFilter, TaskStore};
use taskplanner::view::{CounterTween, format_due_date, is_overdue};

type Store = TaskStore<FileKvStore>;

fn setup_logging(level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskplanner")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("taskplanner.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::new()
        .parse_filters(level.unwrap_or("info"))
        .parse_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn open_store(config: &Config) -> Result<Store> {
    let kv = FileKvStore::new(&config.storage.data_dir)
        .with_context(|| format!("Failed to open data directory {}", config.storage.data_dir.display()))?;
    TaskStore::open_with_key(kv, &config.storage.key).context("Failed to load tasks")
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{} {}", "Data directory:".yellow(), config.storage.data_dir.display());
    }

    let mut store = open_store(config)?;

    match &cli.command {
        Commands::Add {
            title,
            category,
            priority,
            due,
            description,
        } => {
            let mut fields = TaskFields::new(title.as_str(), *category, *priority, *due);
            fields.description = description.clone();
            handle_add_command(&mut store, fields)
        }
        Commands::Edit { id, fields } => handle_edit_command(&mut store, id, fields),
        Commands::Show { id } => handle_show_command(&store, id),
        Commands::Done { id } => handle_done_command(&mut store, id),
        Commands::Rm { id, yes } => handle_rm_command(&mut store, id, *yes, config),
        Commands::Clear { yes } => handle_clear_command(&mut store, *yes, config),
        Commands::Mv { ids } => handle_mv_command(&mut store, ids),
        Commands::List {
            category,
            priority,
            status,
            sort,
        } => {
            let filter = build_filter(category.as_deref(), priority.as_deref(), *status)?;
            handle_list_command(&store, &filter, sort.unwrap_or(config.display.default_sort))
        }
        Commands::Stats { animate } => handle_stats_command(&store, *animate, config),
    }
}

fn build_filter(category: Option<&str>, priority: Option<&str>, status: StatusFilter) -> Result<TaskFilter> {
    let mut filter = TaskFilter::all().status(status);
    if let Some(c) = category.filter(|c| !c.eq_ignore_ascii_case("all")) {
        filter = filter.category(c.parse::<Category>()?);
    }
    if let Some(p) = priority.filter(|p| !p.eq_ignore_ascii_case("all")) {
        filter = filter.priority(p.parse::<Priority>()?);
    }
    Ok(filter)
}

fn warn_if_past_due(task: &Task) {
    if task.due_date < Local::now().date_naive() {
        warn!("Task {} has a due date in the past: {}", task.id, task.due_date);
        eprintln!(
            "{} due date {} is already in the past",
            "Warning:".yellow(),
            format_due_date(task.due_date)
        );
    }
}

fn handle_add_command(store: &mut Store, fields: TaskFields) -> Result<()> {
    let task = store.create(fields).context("Failed to add task")?;
    warn_if_past_due(&task);
    println!("{} {}", "Task added successfully!".green(), task.id.dimmed());
    Ok(())
}

fn handle_edit_command(store: &mut Store, id: &str, args: &EditArgs) -> Result<()> {
    let patch = TaskPatch {
        title: args.title.clone(),
        category: args.category,
        priority: args.priority,
        due_date: args.due,
        description: args.description.clone(),
    };
    if patch.is_empty() {
        println!("{}", "Nothing to change".yellow());
        return Ok(());
    }

    let task = store.update(id, patch).context("Failed to update task")?;
    warn_if_past_due(&task);
    println!("{}", "Task updated successfully!".green());
    print_task(&task);
    Ok(())
}

fn handle_show_command(store: &Store, id: &str) -> Result<()> {
    let task = store.get(id)?;
    print_task(task);
    println!("  {} {}", "created:".dimmed(), task.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
    if let Some(updated) = task.updated_at {
        println!("  {} {}", "updated:".dimmed(), updated.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
    }
    if let Some(done) = task.completed_at {
        println!("  {} {}", "completed:".dimmed(), done.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
    }
    Ok(())
}

fn handle_done_command(store: &mut Store, id: &str) -> Result<()> {
    let task = store.toggle_complete(id).context("Failed to toggle task")?;
    if task.completed {
        println!("{}", "✅ Task completed!".green());
    } else {
        println!("{}", "🔄 Task marked as pending".cyan());
    }
    Ok(())
}

fn handle_rm_command(store: &mut Store, id: &str, yes: bool, config: &Config) -> Result<()> {
    let title = store.get(id)?.title.clone();
    if needs_confirmation(yes, config) && !confirm(&format!("Are you sure you want to delete \"{}\"?", title))? {
        println!("{}", "Aborted".yellow());
        return Ok(());
    }

    store.delete(id).context("Failed to delete task")?;
    println!("{}", "Task deleted successfully!".green());
    Ok(())
}

fn handle_clear_command(store: &mut Store, yes: bool, config: &Config) -> Result<()> {
    if needs_confirmation(yes, config)
        && !confirm("Are you sure you want to delete ALL tasks? This cannot be undone!")?
    {
        println!("{}", "Aborted".yellow());
        return Ok(());
    }

    store.clear_all().context("Failed to clear tasks")?;
    println!("{}", "All tasks cleared!".green());
    Ok(())
}

fn handle_mv_command(store: &mut Store, ids: &[String]) -> Result<()> {
    store.reorder(ids).context("Failed to reorder tasks")?;
    println!("{}", "Tasks reordered!".green());
    Ok(())
}

fn handle_list_command(store: &Store, filter: &TaskFilter, sort: SortKey) -> Result<()> {
    let tasks = store.query(filter, sort);
    if tasks.is_empty() {
        println!("{}", "No tasks found".dimmed());
        return Ok(());
    }

    for task in tasks {
        print_task(task);
    }
    Ok(())
}

fn handle_stats_command(store: &Store, animate: bool, config: &Config) -> Result<()> {
    let stats = store.stats();
    let counters = [
        ("Total", stats.total),
        ("Completed", stats.completed),
        ("Pending", stats.pending),
    ];

    let duration = Duration::from_millis(config.display.animation_ms);
    for (label, value) in counters {
        let target = i64::try_from(value).unwrap_or(i64::MAX);
        if animate && target > 0 {
            let tween = CounterTween::new(0, target, duration);
            let delay = tween.step_delay();
            for frame in tween {
                print!("\r{:>10}: {}", label.bold(), frame);
                io::stdout().flush()?;
                thread::sleep(delay);
            }
            println!();
        } else {
            println!("{:>10}: {}", label.bold(), target);
        }
    }
    Ok(())
}

fn print_task(task: &Task) {
    let check = if task.completed { "[x]".green() } else { "[ ]".normal() };
    let title = if task.completed {
        task.title.strikethrough().dimmed()
    } else {
        task.title.bold()
    };
    let priority = match task.priority {
        Priority::High => format!("{} priority", task.priority).red(),
        Priority::Medium => format!("{} priority", task.priority).yellow(),
        Priority::Low => format!("{} priority", task.priority).green(),
    };

    let overdue = is_overdue(task, Local::now().date_naive());
    let mut due = format_due_date(task.due_date);
    if overdue {
        due.push_str(" (Overdue)");
    }
    let due = if overdue { due.red() } else { due.normal() };

    println!("{} {} {}", check, title, task.id.dimmed());
    println!(
        "    {} {}  {}  {}",
        task.category.emoji(),
        task.category,
        priority,
        due
    );
    if let Some(description) = &task.description {
        println!("    {}", description.italic());
    }
}

fn needs_confirmation(yes: bool, config: &Config) -> bool {
    !yes && config.display.confirm_destructive
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;

    for warning in &config.warnings {
        warn!("{}", warning);
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }
    match &config.source {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
