use std::sync::Mutex;

use crate::models::{CoreError, CoreErrorKind, Task};
use crate::persistence::{LoadOutcome, PersistenceResult, TaskRecordStore};

/// Keeps the saved record list in process memory.
#[derive(Default)]
pub struct MemoryRecordStore {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    tasks: Vec<Task>,
    fail_saves: bool,
    save_count: usize,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                tasks,
                ..MemoryState::default()
            }),
        }
    }

    /// Makes every following `save_all` fail with `StorageFailure`.
    pub fn set_fail_saves(&self, fail: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_saves = fail;
        }
    }

    pub fn saved_tasks(&self) -> Vec<Task> {
        self.state
            .lock()
            .map(|state| state.tasks.clone())
            .unwrap_or_default()
    }

    pub fn save_count(&self) -> usize {
        self.state.lock().map(|state| state.save_count).unwrap_or(0)
    }

    fn lock_state(&self) -> PersistenceResult<std::sync::MutexGuard<'_, MemoryState>> {
        self.state.lock().map_err(|_| CoreError {
            kind: CoreErrorKind::StorageFailure,
            task: None,
            message: "memory record store mutex poisoned".to_string(),
        })
    }
}

impl TaskRecordStore for MemoryRecordStore {
    fn load_all(&self) -> PersistenceResult<LoadOutcome> {
        let state = self.lock_state()?;
        Ok(LoadOutcome {
            tasks: state.tasks.clone(),
            warnings: Vec::new(),
        })
    }

    fn save_all(&self, tasks: &[Task]) -> PersistenceResult<()> {
        let mut state = self.lock_state()?;
        if state.fail_saves {
            return Err(CoreError {
                kind: CoreErrorKind::StorageFailure,
                task: None,
                message: "memory record store is configured to reject saves".to_string(),
            });
        }
        state.tasks = tasks.to_vec();
        state.save_count += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
