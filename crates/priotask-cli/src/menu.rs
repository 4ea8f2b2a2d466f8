use std::io::{self, BufRead, Write};

use priotask_core::TaskStore;
use priotask_core::models::parse_priority;

use crate::render;

enum Step {
    Continue,
    Quit,
}

/// Numbered interactive menu. Holds no task state of its own.
pub struct Menu<'a, R, W> {
    store: &'a mut TaskStore,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(store: &'a mut TaskStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Runs until the user picks "quit" or input is exhausted.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "--- Task tracker ---")?;
            writeln!(self.output, "1. Add task")?;
            writeln!(self.output, "2. List tasks")?;
            writeln!(self.output, "3. Complete task")?;
            writeln!(self.output, "4. Show highest priority task")?;
            writeln!(self.output, "5. Quit")?;

            let step = match self.prompt("Choose an option: ")? {
                None => Step::Quit,
                Some(choice) => match choice.trim() {
                    "1" => self.add()?,
                    "2" => self.list()?,
                    "3" => self.complete()?,
                    "4" => self.next()?,
                    "5" => Step::Quit,
                    _ => {
                        writeln!(self.output, "Invalid option, try again.")?;
                        Step::Continue
                    }
                },
            };

            if let Step::Quit = step {
                writeln!(self.output, "Goodbye.")?;
                return Ok(());
            }
        }
    }

    fn add(&mut self) -> io::Result<Step> {
        let Some(name) = self.prompt("Task name: ")? else {
            return Ok(Step::Quit);
        };
        let Some(priority) = self.prompt("Priority (integer): ")? else {
            return Ok(Step::Quit);
        };
        let priority = match parse_priority(&priority) {
            Ok(priority) => priority,
            Err(error) => {
                writeln!(self.output, "{}", render::error_line(&error))?;
                return Ok(Step::Continue);
            }
        };
        let Some(due_date) = self.prompt("Due date (YYYY-MM-DD): ")? else {
            return Ok(Step::Quit);
        };
        let Some(dependencies) = self.prompt("Dependencies (comma-separated, optional): ")?
        else {
            return Ok(Step::Quit);
        };

        match self.store.add_task(
            name.trim(),
            priority,
            &due_date,
            split_dependencies(&dependencies),
        ) {
            Ok(task) => writeln!(
                self.output,
                "Added '{}' with priority {} due {}.",
                task.name,
                task.priority,
                task.due_date_text()
            )?,
            Err(error) => writeln!(self.output, "{}", render::error_line(&error))?,
        }
        Ok(Step::Continue)
    }

    fn list(&mut self) -> io::Result<Step> {
        let Some(sort) = self.prompt("Sort by 'priority' or 'due_date': ")? else {
            return Ok(Step::Quit);
        };
        let listing = self.store.list_tasks(&sort);
        for line in render::listing_lines(&listing) {
            writeln!(self.output, "{line}")?;
        }
        Ok(Step::Continue)
    }

    fn complete(&mut self) -> io::Result<Step> {
        let Some(name) = self.prompt("Name of the task to complete: ")? else {
            return Ok(Step::Quit);
        };
        match self.store.complete_task(name.trim()) {
            Ok(task) => writeln!(self.output, "Completed '{}'.", task.name)?,
            Err(error) => writeln!(self.output, "{}", render::error_line(&error))?,
        }
        Ok(Step::Continue)
    }

    fn next(&mut self) -> io::Result<Step> {
        let top = self.store.peek_highest_priority();
        writeln!(self.output, "{}", render::next_line(top.as_ref()))?;
        Ok(Step::Continue)
    }

    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Splits a comma-separated list, trimming names and dropping empty ones.
pub fn split_dependencies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use priotask_core::TaskStore;
    use priotask_core::persistence::MemoryRecordStore;

    use super::{Menu, split_dependencies};

    fn run_session(store: &mut TaskStore, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(store, Cursor::new(script.as_bytes()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn empty_store() -> (TaskStore, Arc<MemoryRecordStore>) {
        let backend = Arc::new(MemoryRecordStore::new());
        (TaskStore::open(backend.clone()).unwrap(), backend)
    }

    #[test]
    fn dependencies_are_split_and_trimmed() {
        assert_eq!(split_dependencies(" a , ,b,, c "), vec!["a", "b", "c"]);
        assert!(split_dependencies("").is_empty());
        assert!(split_dependencies(" , ").is_empty());
    }

    #[test]
    fn add_list_complete_session() {
        let (mut store, backend) = empty_store();
        let script = "1\nA\n2\n2025-01-01\n\n\
                      1\nB\n1\n2025-02-01\nA\n\
                      2\nfecha\n\
                      3\nB\n\
                      4\n\
                      3\nA\n\
                      5\n";
        let output = run_session(&mut store, script);

        assert!(output.contains("Added 'A' with priority 2 due 2025-01-01."));
        assert!(output.contains("A - priority: 2, due: 2025-01-01, status: executable"));
        assert!(output.contains("B - priority: 1, due: 2025-02-01, status: blocked"));
        assert!(output.contains("Error (blocked): task 'B' still depends on pending task(s): A"));
        assert!(output.contains("Highest priority task: B (priority: 1"));
        assert!(output.contains("Completed 'A'."));
        assert!(output.trim_end().ends_with("Goodbye."));

        let saved: Vec<String> = backend
            .saved_tasks()
            .into_iter()
            .map(|task| task.name)
            .collect();
        assert_eq!(saved, vec!["B"]);
    }

    #[test]
    fn bad_priority_returns_to_menu() {
        let (mut store, _) = empty_store();
        let output = run_session(&mut store, "1\nA\nsoon\n4\n5\n");

        assert!(output.contains("Error (invalid input): priority 'soon' must be an integer"));
        assert!(output.contains("No pending tasks."));
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_option_and_unknown_sort_are_reported() {
        let (mut store, _) = empty_store();
        let output = run_session(&mut store, "9\n2\nsideways\n5\n");

        assert!(output.contains("Invalid option, try again."));
        assert!(output.contains("note: unknown sort key 'sideways'"));
    }

    #[test]
    fn end_of_input_quits() {
        let (mut store, _) = empty_store();
        let output = run_session(&mut store, "1\nhalf");

        assert!(output.trim_end().ends_with("Goodbye."));
        assert!(store.is_empty());
    }
}
