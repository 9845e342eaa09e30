//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - analyze: score and order a whole batch
//! - suggest: show the top few tasks to work on next

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use taskrank::ranking::SortStrategy;

/// TaskRank - rank tasks by urgency, importance, effort and dependencies
#[derive(Parser, Debug)]
#[command(name = "taskrank")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Options shared by every subcommand that reads a batch
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// JSON file holding an array of tasks (reads stdin when omitted)
    pub input: Option<PathBuf>,

    /// Score as if today were this date (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Print a colored listing instead of JSON
    #[arg(long)]
    pub table: bool,
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score every task and print the ordered batch
    Analyze {
        #[command(flatten)]
        batch: BatchArgs,

        /// Ordering of the output
        #[arg(short, long, value_enum, default_value_t = SortStrategy::Smart)]
        strategy: SortStrategy,
    },

    /// Print the highest-priority tasks
    Suggest {
        #[command(flatten)]
        batch: BatchArgs,

        /// How many tasks to return (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

impl Commands {
    pub fn batch(&self) -> &BatchArgs {
        match self {
            Commands::Analyze { batch, .. } | Commands::Suggest { batch, .. } => batch,
        }
    }
}
