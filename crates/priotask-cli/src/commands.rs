use std::io::{self, Write};

use priotask_core::TaskStore;
use priotask_core::models::parse_priority;

use crate::cli::Command;
use crate::menu::split_dependencies;
use crate::render;

/// Runs one subcommand. Returns `false` when the operation was rejected.
pub fn run(store: &mut TaskStore, command: Command, out: &mut impl Write) -> io::Result<bool> {
    match command {
        Command::Add {
            name,
            priority,
            due,
            depends,
        } => {
            let added = parse_priority(&priority).and_then(|priority| {
                store.add_task(&name, priority, &due, split_dependencies(&depends))
            });
            match added {
                Ok(task) => {
                    writeln!(
                        out,
                        "Added '{}' with priority {} due {}.",
                        task.name,
                        task.priority,
                        task.due_date_text()
                    )?;
                    Ok(true)
                }
                Err(error) => {
                    writeln!(out, "{}", render::error_line(&error))?;
                    Ok(false)
                }
            }
        }
        Command::List { sort, json } => {
            let listing = store.list_tasks(&sort);
            if json {
                if let Some(fallback) = listing.fallback() {
                    tracing::warn!("{fallback}");
                }
                let encoded = render::listing_json(&listing).map_err(io::Error::other)?;
                writeln!(out, "{encoded}")?;
            } else {
                for line in render::listing_lines(&listing) {
                    writeln!(out, "{line}")?;
                }
            }
            Ok(true)
        }
        Command::Complete { name } => match store.complete_task(&name) {
            Ok(task) => {
                writeln!(out, "Completed '{}'.", task.name)?;
                Ok(true)
            }
            Err(error) => {
                writeln!(out, "{}", render::error_line(&error))?;
                Ok(false)
            }
        },
        Command::Next { json } => {
            let top = store.peek_highest_priority();
            if json {
                let view = top.as_ref().map(render::SummaryView::from);
                let encoded = serde_json::to_string_pretty(&view).map_err(io::Error::other)?;
                writeln!(out, "{encoded}")?;
            } else {
                writeln!(out, "{}", render::next_line(top.as_ref()))?;
            }
            Ok(true)
        }
    }
}
