pub mod error;
pub mod listing;
pub mod task;

pub use error::{CoreError, CoreErrorKind, CoreResult, LoadWarning};
pub use listing::{SortFallback, SortKey, TaskSummary};
pub use task::{Task, format_due_date, parse_due_date, parse_priority};
