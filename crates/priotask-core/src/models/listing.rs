use std::fmt::{Display, Formatter};

use crate::models::Task;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Default)]
pub enum SortKey {
    /// `(priority, due_date)` ascending.
    #[default]
    Priority,
    /// `(due_date, priority)` ascending.
    DueDate,
}

/// Advisory produced when a requested sort key was not recognised and
/// `SortKey::Priority` was used instead.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortFallback {
    pub requested: String,
}

impl Display for SortFallback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown sort key '{}'; listing by priority instead",
            self.requested
        )
    }
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::DueDate => "due_date",
        }
    }

    pub fn resolve(raw: &str) -> (Self, Option<SortFallback>) {
        match raw.trim().to_ascii_lowercase().as_str() {
            "priority" | "prioridad" => (Self::Priority, None),
            "due_date" | "due" | "date" | "fecha" => (Self::DueDate, None),
            _ => (
                Self::Priority,
                Some(SortFallback {
                    requested: raw.trim().to_string(),
                }),
            ),
        }
    }

    pub(crate) fn sort(self, tasks: &mut [Task]) {
        match self {
            Self::Priority => tasks.sort_by(|a, b| a.urgency_key().cmp(&b.urgency_key())),
            Self::DueDate => tasks.sort_by(|a, b| {
                (a.due_date, a.priority).cmp(&(b.due_date, b.priority))
            }),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaskSummary {
    pub task: Task,
    pub executable: bool,
}

#[cfg(test)]
mod tests {
    use super::SortKey;

    #[test]
    fn resolves_known_spellings() {
        assert_eq!(SortKey::resolve("priority"), (SortKey::Priority, None));
        assert_eq!(SortKey::resolve(" Prioridad "), (SortKey::Priority, None));
        assert_eq!(SortKey::resolve("fecha"), (SortKey::DueDate, None));
        assert_eq!(SortKey::resolve("DUE_DATE"), (SortKey::DueDate, None));
    }

    #[test]
    fn unknown_key_falls_back_with_advisory() {
        let (key, fallback) = SortKey::resolve("unknown");
        assert_eq!(key, SortKey::Priority);
        let fallback = fallback.expect("expected an advisory for an unknown key");
        assert_eq!(fallback.requested, "unknown");
        assert!(fallback.to_string().contains("'unknown'"));
    }

    #[test]
    fn empty_key_is_reported_too() {
        let (key, fallback) = SortKey::resolve("");
        assert_eq!(key, SortKey::Priority);
        assert!(fallback.is_some());
    }
}
