//! # task-cli
//!
//! A small command-line task tracker. Tasks live in a single JSON file and
//! every command loads the whole file, applies one change and writes it back.
//!
//! ## Usage
//!
//! ```bash
//! task-cli add "Buy milk"
//! task-cli list
//! task-cli list done
//! task-cli update 1 "Buy oat milk"
//! task-cli mark-in-progress 1
//! task-cli mark-done 1
//! task-cli delete 1
//! task-cli search milk
//! task-cli export csv --output tasks.csv
//! ```
//!
//! ## Data Storage
//!
//! Tasks are saved to `tasks.json` in the current directory. Override it with
//! `--file <PATH>` or the `TASKS_DB` environment variable.
//!
//! Only one invocation should touch the file at a time: there is no locking,
//! so overlapping runs race and the last save wins.
//!
//! Set `RUST_LOG=debug` to see what the store reads and writes.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};

use task_cli::commands::*;
use task_cli::models::Status;
use task_cli::storage::DEFAULT_DB_FILE;

#[derive(Parser)]
#[command(name = "task-cli")]
#[command(about = "Track your tasks from the terminal", long_about = None)]
struct Cli {
    /// Path to the tasks file
    #[arg(short, long, global = true, env = "TASKS_DB", default_value = DEFAULT_DB_FILE)]
    file: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task description (quoted if it has spaces)
        #[arg(allow_hyphen_values = true)]
        description: String,
    },
    /// List tasks, optionally filtered by status
    List {
        #[arg(value_enum, ignore_case = true)]
        status: Option<Status>,
    },
    /// Change a task's description
    Update {
        id: u64,
        /// New description
        #[arg(allow_hyphen_values = true)]
        description: String,
    },
    /// Delete a task
    Delete {
        id: u64,
    },
    /// Mark a task as in progress
    MarkInProgress {
        id: u64,
    },
    /// Mark a task as done
    MarkDone {
        id: u64,
    },
    /// Move a task back to todo
    MarkTodo {
        id: u64,
    },
    /// Search task descriptions (case-insensitive)
    Search {
        #[arg(allow_hyphen_values = true)]
        keyword: String,
    },
    /// Export all tasks
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

#[derive(ValueEnum, Clone, Copy)]
enum ExportFormat {
    Csv,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let path = cli.file.as_path();
    let result = match cli.command {
        Commands::Add { description } => cmd_add(path, &description).map(|_| ()),
        Commands::List { status } => cmd_list(path, status),
        Commands::Update { id, description } => cmd_update(path, id, &description),
        Commands::Delete { id } => cmd_delete(path, id),
        Commands::MarkInProgress { id } => cmd_mark(path, id, Status::InProgress).map(|_| ()),
        Commands::MarkDone { id } => cmd_mark(path, id, Status::Done).map(|_| ()),
        Commands::MarkTodo { id } => cmd_mark(path, id, Status::Todo).map(|_| ()),
        Commands::Search { keyword } => cmd_search(path, &keyword),
        Commands::Export { format: ExportFormat::Csv, output } => {
            cmd_export_csv(path, output.as_deref())
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "task-cli", &mut io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
