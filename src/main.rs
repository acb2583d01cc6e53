mod app;
mod cli;
mod ui;

use due_tui::config;
use due_tui::datetime;
use due_tui::reminder;
use due_tui::storage;
use due_tui::task;
use due_tui::utils;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use cli::{Cli, Commands, FilterArg};
use config::Config;
use datetime::split_date_time;
use std::fs;
use std::io::Write;
use std::panic;
use storage::UiCache;
use task::{Filter, Task};
use utils::paths::{get_crash_log_path, get_logs_dir};

/// Install a panic hook that writes crash information to a log file
fn install_crash_handler() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if let Ok(crash_log_path) = get_crash_log_path() {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            let mut crash_report = format!("=== CRASH at {} ===\n", timestamp);

            if let Some(message) = panic_info.payload().downcast_ref::<&str>() {
                crash_report.push_str(&format!("Message: {}\n", message));
            } else if let Some(message) = panic_info.payload().downcast_ref::<String>() {
                crash_report.push_str(&format!("Message: {}\n", message));
            }

            if let Some(location) = panic_info.location() {
                crash_report.push_str(&format!(
                    "Location: {}:{}:{}\n",
                    location.file(),
                    location.line(),
                    location.column()
                ));
            }

            crash_report.push_str(&format!(
                "\nBacktrace:\n{}\n",
                std::backtrace::Backtrace::force_capture()
            ));
            crash_report.push('\n');

            if let Ok(mut file) = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log_path)
            {
                let _ = file.write_all(crash_report.as_bytes());
                eprintln!("\nCrash logged to: {}", crash_log_path.display());
            }
        }

        default_hook(panic_info);
    }));
}

/// Initialize file-based logging for the TUI mode.
///
/// Logs are written to ~/.due-tui/logs/duetui.log
/// Log level can be controlled with RUST_LOG env var (default: info).
fn init_file_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = match get_logs_dir() {
        Ok(dir) => dir,
        Err(_) => return None,
    };

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Could not create logs directory: {}", e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "duetui.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI colors in log files
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Some(guard)
}

fn main() -> Result<()> {
    install_crash_handler();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Add { text }) => handle_add(text)?,
        Some(Commands::Show { filter }) => handle_show(filter)?,
        Some(Commands::ClearCompleted) => handle_clear_completed()?,
        None => {
            // Guard must be kept alive for the duration of the app
            let _log_guard = init_file_logging();

            tracing::info!("duetui starting");

            let config = Config::load()?;
            let conn = storage::get_connection()?;
            storage::init_database(&conn)?;

            let ui_cache = UiCache::load().ok();

            let state = app::AppState::new(conn, &config, ui_cache)?;
            ui::run_tui(state)?;

            tracing::info!("duetui exiting gracefully");
        }
    }

    Ok(())
}

fn handle_add(text: String) -> Result<()> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        println!("Nothing to add.");
        return Ok(());
    }

    let conn = storage::get_connection()?;
    storage::init_database(&conn)?;

    let today = Local::now().date_naive();
    let (clean, user_date) = split_date_time(trimmed, today);
    let clean = if clean.is_empty() {
        trimmed.to_string()
    } else {
        clean
    };

    let task = Task::new(clean, user_date);
    let id = storage::insert_task(&conn, &task)?;

    match &task.user_date {
        Some(date) => println!("Added task {id}: {} (due {date})", task.text),
        None => println!("Added task {id}: {}", task.text),
    }

    Ok(())
}

fn handle_show(filter: FilterArg) -> Result<()> {
    let conn = storage::get_connection()?;
    storage::init_database(&conn)?;

    let tasks = storage::load_all_tasks(&conn)?;
    let filter: Filter = filter.into();
    let visible = filter.apply(&tasks);

    if visible.is_empty() {
        println!("No tasks.");
        return Ok(());
    }

    let now = Local::now().naive_local();
    for task in visible {
        let checkbox = if task.completed { "[x]" } else { "[ ]" };
        match &task.user_date {
            Some(date) => {
                let overdue = !task.completed
                    && task.due_instant().map(|due| due < now).unwrap_or(false);
                let marker = if overdue { ", overdue" } else { "" };
                println!("{} {} {} (due {}{})", checkbox, task.id, task.text, date, marker);
            }
            None => println!("{} {} {}", checkbox, task.id, task.text),
        }
    }

    Ok(())
}

fn handle_clear_completed() -> Result<()> {
    let conn = storage::get_connection()?;
    storage::init_database(&conn)?;

    let count = storage::clear_completed(&conn)?;
    println!(
        "Cleared {count} completed task{}",
        if count == 1 { "" } else { "s" }
    );

    Ok(())
}
