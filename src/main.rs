use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use taskrank::TaskRankError;
use taskrank::domain::{CanonicalTask, PriorityLevel, Suggestion};
use taskrank::ranking::{self, SortStrategy};
use taskrank::scoring::PriorityEngine;

mod cli;
mod config;

use cli::Cli;
use cli::commands::{BatchArgs, Commands};
use config::Config;

const EXIT_INVALID_INPUT: i32 = 2;
const EXIT_FAILURE: i32 = 1;

fn setup_logging(config: &Config) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskrank")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("taskrank.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // Config level first, RUST_LOG wins when set
    let mut builder = env_logger::Builder::new();
    if let Some(level) = &config.log_level {
        builder.parse_filters(level);
    }
    builder
        .parse_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).context(format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn build_engine(batch: &BatchArgs, config: &Config) -> Result<PriorityEngine> {
    let engine = PriorityEngine::new(config.scoring_config()?);
    let engine = match batch.today {
        Some(today) => engine.with_today(today),
        None => engine,
    };
    info!("Scoring relative to {}", engine.today());
    Ok(engine)
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

fn level_label(level: PriorityLevel) -> ColoredString {
    let label = format!("[{}]", level);
    match level {
        PriorityLevel::Critical => label.as_str().red().bold(),
        PriorityLevel::High => label.as_str().yellow(),
        PriorityLevel::Medium => label.as_str().cyan(),
        PriorityLevel::Low => label.as_str().normal(),
    }
}

fn print_task_table(tasks: &[CanonicalTask], strategy: SortStrategy) {
    if tasks.is_empty() {
        println!("{}", "No tasks found.".dimmed());
        return;
    }
    for (rank, task) in tasks.iter().enumerate() {
        let score = task.priority_score.unwrap_or(0.0);
        let due = task
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "no due date".to_string());
        println!(
            "{:>3}. {} {:.2} {} ({}, {})",
            rank + 1,
            level_label(ranking::display_level(score, strategy)),
            score,
            task.display_title().bold(),
            task.id.as_str().dimmed(),
            due
        );
        println!("     {}", task.explanation.as_deref().unwrap_or_default());
    }
}

fn print_suggestion_table(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("{}", "No tasks found.".dimmed());
        return;
    }
    for (rank, suggestion) in suggestions.iter().enumerate() {
        println!(
            "{:>3}. {} {:.2} {} ({})",
            rank + 1,
            level_label(PriorityLevel::from_score(suggestion.priority_score)),
            suggestion.priority_score,
            suggestion.title.as_deref().unwrap_or("<no title>").bold(),
            suggestion.id.as_str().dimmed()
        );
        println!("     {}", suggestion.explanation);
    }
}

/// Report a failed batch on stdout and pick the exit code.
fn report_failure(err: &TaskRankError, pretty: bool) -> Result<i32> {
    log::error!("Batch failed: {}", err);
    write_json(&err.to_body(), pretty)?;
    eprintln!("{} {}", "Error:".red(), err);
    Ok(if err.is_invalid_input() {
        EXIT_INVALID_INPUT
    } else {
        EXIT_FAILURE
    })
}

fn handle_analyze_command(batch: &BatchArgs, strategy: SortStrategy, config: &Config) -> Result<i32> {
    info!("Analyzing batch from {:?} with {} ordering", batch.input, strategy);
    let engine = build_engine(batch, config)?;
    let pretty = batch.pretty || config.output.pretty;
    let input = read_input(batch.input.as_deref())?;

    let result = ranking::parse_document(&input).and_then(|doc| ranking::analyze(&doc, &engine, strategy));
    match result {
        Ok(tasks) if batch.table => {
            print_task_table(&tasks, strategy);
            Ok(0)
        }
        Ok(tasks) => {
            write_json(&tasks, pretty)?;
            Ok(0)
        }
        Err(err) => report_failure(&err, pretty),
    }
}

fn handle_suggest_command(batch: &BatchArgs, limit: Option<usize>, config: &Config) -> Result<i32> {
    let limit = limit.unwrap_or(config.output.suggest_limit);
    info!("Suggesting top {} from {:?}", limit, batch.input);
    let engine = build_engine(batch, config)?;
    let pretty = batch.pretty || config.output.pretty;
    let input = read_input(batch.input.as_deref())?;

    let result = ranking::parse_document(&input).and_then(|doc| ranking::suggest(&doc, &engine, limit));
    match result {
        Ok(suggestions) if batch.table => {
            print_suggestion_table(&suggestions);
            Ok(0)
        }
        Ok(suggestions) => {
            write_json(&suggestions, pretty)?;
            Ok(0)
        }
        Err(err) => report_failure(&err, pretty),
    }
}

fn run_application(cli: &Cli, config: &Config) -> Result<i32> {
    info!("Starting application");

    if cli.is_verbose() {
        let today = cli
            .command
            .batch()
            .today
            .map(|d| d.to_string())
            .unwrap_or_else(|| "local date".to_string());
        eprintln!("{} (scoring relative to {})", "Verbose mode enabled".yellow(), today);
    }

    match &cli.command {
        Commands::Analyze { batch, strategy } => handle_analyze_command(batch, *strategy, config),
        Commands::Suggest { batch, limit } => handle_suggest_command(batch, *limit, config),
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging at the configured level
    setup_logging(&config).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    let code = run_application(&cli, &config).context("Application failed")?;
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
