pub mod memory;

use crate::models::{CoreError, LoadWarning, Task};

pub use memory::MemoryRecordStore;

pub type PersistenceResult<T> = Result<T, CoreError>;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LoadOutcome {
    pub tasks: Vec<Task>,
    pub warnings: Vec<LoadWarning>,
}

/// Durable home of the pending set. Every save replaces the previous content
/// in full.
pub trait TaskRecordStore: Send + Sync {
    /// Reads every persisted record. A missing store is an empty outcome;
    /// corrupt content is reported through `LoadOutcome::warnings`.
    fn load_all(&self) -> PersistenceResult<LoadOutcome>;

    fn save_all(&self, tasks: &[Task]) -> PersistenceResult<()>;

    fn location(&self) -> String;
}
