use std::path::PathBuf;

use clap::{Parser, Subcommand};
use priotask_core::config::{DATA_FILE_ENV, DEFAULT_DATA_FILE};

/// Personal task tracker ordered by priority and due date.
///
/// Runs the interactive menu when no subcommand is given.
#[derive(Debug, Parser)]
#[command(name = "priotask", version)]
pub struct Cli {
    /// JSON file holding the pending tasks.
    #[arg(long, env = DATA_FILE_ENV, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a pending task.
    Add {
        name: String,
        /// Integer priority; lower is more urgent.
        #[arg(long, allow_hyphen_values = true)]
        priority: String,
        /// Due date as YYYY-MM-DD.
        #[arg(long)]
        due: String,
        /// Comma-separated names of tasks this one waits for.
        #[arg(long, default_value = "")]
        depends: String,
    },
    /// List pending tasks.
    List {
        /// `priority` or `due_date` (also `fecha`).
        #[arg(long, default_value = "priority")]
        sort: String,
        #[arg(long)]
        json: bool,
    },
    /// Mark a task as completed, removing it from the pending set.
    Complete { name: String },
    /// Show the most urgent pending task.
    Next {
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Command};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_accepts_negative_priority() {
        let cli = Cli::try_parse_from([
            "priotask",
            "--data-file",
            "x.json",
            "add",
            "pay rent",
            "--priority",
            "-1",
            "--due",
            "2025-01-01",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Add {
                name,
                priority,
                depends,
                ..
            }) => {
                assert_eq!(name, "pay rent");
                assert_eq!(priority, "-1");
                assert_eq!(depends, "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
