//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::task;
use crate::storage::{Config, TodoDir};

#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about = "Plain-text task list manager (todo.txt format)")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Directory holding todo.txt and done.txt
    #[arg(long, short = 'd', global = true, env = "TODO_DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    ///
    /// Examples:
    ///   todo add "Invade Planet Earth @SolarSystem +KillAllHumans"
    ///   todo add "(A) Call mom DUE:2021-07-07"
    Add {
        /// Task text; words are joined with single spaces
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// List tasks, optionally filtered by a case-insensitive term
    #[command(alias = "ls")]
    List {
        /// Only show tasks containing this text
        filter: Option<String>,
    },

    /// Mark a task as done
    Do {
        /// Task number (as shown by list)
        number: usize,
    },

    /// Set the priority of a task
    Pri {
        /// Task number (as shown by list)
        number: usize,

        /// Priority letter (A-Z)
        priority: String,
    },

    /// Remove the priority of a task
    Depri {
        /// Task number (as shown by list)
        number: usize,
    },

    /// Move completed tasks to done.txt
    Archive,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let format = cli.format.unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("todo starting");

    let dir = config.resolve_todo_dir(cli.dir)?;
    output.verbose_ctx("store", &format!("Using todo directory: {}", dir.display()));
    let store = TodoDir::open(dir)?;

    match cli.command {
        Commands::Add { words } => {
            output.verbose_ctx("add", &format!("Adding {} word(s)", words.len()));
            task::add(&output, &store, &words)?
        }
        Commands::List { filter } => {
            output.verbose_ctx("list", &format!("Listing tasks, filter: {:?}", filter));
            task::list(&output, &store, filter.as_deref())?
        }
        Commands::Do { number } => task::complete(&output, &store, number)?,
        Commands::Pri { number, priority } => {
            task::prioritize(&output, &store, number, &priority)?
        }
        Commands::Depri { number } => task::deprioritize(&output, &store, number)?,
        Commands::Archive => task::archive(&output, &store)?,
    }

    Ok(())
}
