use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CoreErrorKind {
    InvalidInput,
    NotFound,
    DependencyUnresolved,
    StorageFailure,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CoreError {
    pub kind: CoreErrorKind,
    pub task: Option<String>,
    pub message: String,
}

impl CoreError {
    pub fn invalid_input(task: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            kind: CoreErrorKind::InvalidInput,
            task: task.map(str::to_string),
            message: message.into(),
        }
    }
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for CoreError {}

pub type CoreResult<T> = Result<T, CoreError>;

/// Problems found while loading persisted records. Loading carries on past
/// every one of these.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LoadWarning {
    #[error("task file '{}' is unreadable as a record list ({reason}); starting empty", .path.display())]
    CorruptStore { path: PathBuf, reason: String },

    #[error("skipping malformed task record #{index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
}
