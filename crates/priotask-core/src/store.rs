use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::sync::Arc;

use crate::config::StoreConfig;
use crate::json::JsonFileStore;
use crate::models::{
    CoreError, CoreErrorKind, CoreResult, LoadWarning, SortFallback, SortKey, Task, TaskSummary,
    parse_due_date,
};
use crate::persistence::TaskRecordStore;

/// The pending set, ordered by `(priority, due_date)` with the most urgent
/// task on top, mirrored to a `TaskRecordStore` after every mutation.
///
/// Mutations take `&mut self`; callers that share one store between threads
/// must wrap it in their own lock.
pub struct TaskStore {
    pending: BinaryHeap<Reverse<Task>>,
    backend: Arc<dyn TaskRecordStore>,
    load_warnings: Vec<LoadWarning>,
}

/// Snapshot of the pending set taken by `TaskStore::list_tasks`. Iterating
/// does not touch the store and can be repeated.
#[derive(Clone, Debug)]
pub struct TaskListing {
    sort_key: SortKey,
    fallback: Option<SortFallback>,
    tasks: Vec<Task>,
    pending_names: HashSet<String>,
}

impl TaskListing {
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn fallback(&self) -> Option<&SortFallback> {
        self.fallback.as_ref()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Pairs each task with its executability flag as the iterator advances.
    pub fn iter(&self) -> impl Iterator<Item = TaskSummary> + '_ {
        self.tasks.iter().map(|task| TaskSummary {
            task: task.clone(),
            executable: task
                .dependencies
                .iter()
                .all(|dependency| !self.pending_names.contains(dependency)),
        })
    }
}

impl TaskStore {
    /// Loads the persisted pending set. Missing or corrupt storage yields an
    /// empty store; the problems are logged and kept in `load_warnings`.
    pub fn open(backend: Arc<dyn TaskRecordStore>) -> CoreResult<Self> {
        let outcome = backend.load_all()?;
        let location = backend.location();

        for warning in &outcome.warnings {
            tracing::warn!(location = %location, "{warning}");
        }
        tracing::info!(
            location = %location,
            pending = outcome.tasks.len(),
            skipped = outcome.warnings.len(),
            "opened task store"
        );

        Ok(Self {
            pending: outcome.tasks.into_iter().map(Reverse).collect(),
            backend,
            load_warnings: outcome.warnings,
        })
    }

    pub fn from_config(config: &StoreConfig) -> CoreResult<Self> {
        Self::open(Arc::new(JsonFileStore::new(config.data_file.clone())))
    }

    pub fn load_warnings(&self) -> &[LoadWarning] {
        &self.load_warnings
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending tasks in internal heap order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.pending.iter().map(|Reverse(task)| task)
    }

    pub fn add_task(
        &mut self,
        name: &str,
        priority: i64,
        due_date: &str,
        dependencies: Vec<String>,
    ) -> CoreResult<Task> {
        if name.trim().is_empty() {
            return Err(CoreError::invalid_input(None, "task name must not be empty"));
        }
        let due_date = parse_due_date(due_date).map_err(|error| CoreError {
            task: Some(name.to_string()),
            ..error
        })?;

        let task = Task {
            name: name.to_string(),
            priority,
            due_date,
            dependencies,
        };
        self.pending.push(Reverse(task.clone()));

        if let Err(error) = self.save_all() {
            self.take_first(|candidate| candidate == &task);
            tracing::error!(
                task = %task.name,
                message = %error.message,
                "failed to persist added task; rolled back"
            );
            return Err(error);
        }

        tracing::info!(
            task = %task.name,
            priority = task.priority,
            due_date = %task.due_date_text(),
            "added task"
        );
        Ok(task)
    }

    /// Snapshot sorted by `sort_key`. Unknown keys list by priority and carry
    /// a `SortFallback` advisory.
    pub fn list_tasks(&self, sort_key: &str) -> TaskListing {
        let (key, fallback) = SortKey::resolve(sort_key);
        if let Some(fallback) = &fallback {
            tracing::debug!(requested = %fallback.requested, "sort key fallback");
        }

        let mut tasks: Vec<Task> = self.tasks().cloned().collect();
        key.sort(&mut tasks);

        TaskListing {
            sort_key: key,
            fallback,
            pending_names: tasks.iter().map(|task| task.name.clone()).collect(),
            tasks,
        }
    }

    /// Removes the first pending task named `name` (internal order, not
    /// urgency order) once none of its dependencies is pending.
    pub fn complete_task(&mut self, name: &str) -> CoreResult<Task> {
        let candidate = self
            .tasks()
            .find(|task| task.name == name)
            .cloned()
            .ok_or_else(|| CoreError {
                kind: CoreErrorKind::NotFound,
                task: Some(name.to_string()),
                message: format!("no pending task named '{name}'"),
            })?;

        let blocking = self.blocking_dependencies(&candidate.dependencies);
        if !blocking.is_empty() {
            return Err(CoreError {
                kind: CoreErrorKind::DependencyUnresolved,
                task: Some(name.to_string()),
                message: format!(
                    "task '{name}' still depends on pending task(s): {}",
                    blocking.join(", ")
                ),
            });
        }

        let removed = self
            .take_first(|task| task.name == name)
            .unwrap_or(candidate);

        if let Err(error) = self.save_all() {
            self.pending.push(Reverse(removed));
            tracing::error!(
                task = %name,
                message = %error.message,
                "failed to persist completed task; rolled back"
            );
            return Err(error);
        }

        tracing::info!(task = %name, remaining = self.pending.len(), "completed task");
        Ok(removed)
    }

    pub fn peek_highest_priority(&self) -> Option<TaskSummary> {
        self.pending.peek().map(|Reverse(task)| TaskSummary {
            task: task.clone(),
            executable: self.is_executable(&task.dependencies),
        })
    }

    /// A dependency counts as resolved when no pending task carries its name,
    /// whether or not such a task ever existed.
    pub fn is_executable(&self, dependencies: &[String]) -> bool {
        dependencies
            .iter()
            .all(|dependency| !self.is_pending(dependency))
    }

    /// Dependencies that still name a pending task, in declaration order.
    pub fn blocking_dependencies(&self, dependencies: &[String]) -> Vec<String> {
        dependencies
            .iter()
            .filter(|dependency| self.is_pending(dependency))
            .cloned()
            .collect()
    }

    /// Overwrites the backing store with the full pending set.
    pub fn save_all(&self) -> CoreResult<()> {
        let snapshot: Vec<Task> = self.tasks().cloned().collect();
        self.backend.save_all(&snapshot)
    }

    fn is_pending(&self, name: &str) -> bool {
        self.tasks().any(|task| task.name == name)
    }

    fn take_first(&mut self, matches: impl Fn(&Task) -> bool) -> Option<Task> {
        let mut entries = std::mem::take(&mut self.pending).into_vec();
        let removed = entries
            .iter()
            .position(|Reverse(task)| matches(task))
            .map(|index| entries.swap_remove(index).0);
        self.pending = BinaryHeap::from(entries);
        removed
    }
}
