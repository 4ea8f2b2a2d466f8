use std::cmp::Ordering;

use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::models::{CoreError, CoreResult};

const DUE_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// A pending unit of work. Never mutated once it enters the store.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Task {
    pub name: String,
    /// Lower values are more urgent.
    pub priority: i64,
    pub due_date: Date,
    /// Names of tasks that must leave the pending set first. Kept verbatim.
    pub dependencies: Vec<String>,
}

impl Task {
    pub fn urgency_key(&self) -> (i64, Date) {
        (self.priority, self.due_date)
    }

    pub fn due_date_text(&self) -> String {
        format_due_date(self.due_date)
    }
}

// Urgency first; name and dependencies only break ties so the heap order is total.
impl Ord for Task {
    fn cmp(&self, other: &Self) -> Ordering {
        self.urgency_key()
            .cmp(&other.urgency_key())
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.dependencies.cmp(&other.dependencies))
    }
}

impl PartialOrd for Task {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn parse_due_date(raw: &str) -> CoreResult<Date> {
    let trimmed = raw.trim();
    // `[year]` alone would also accept a sign, which cannot be written back.
    let unsigned_year = trimmed.len() == 10
        && trimmed.as_bytes()[..4].iter().all(u8::is_ascii_digit);
    if !unsigned_year {
        return Err(CoreError::invalid_input(
            None,
            format!("due date '{trimmed}' must use the YYYY-MM-DD format"),
        ));
    }

    Date::parse(trimmed, DUE_DATE_FORMAT).map_err(|error| {
        CoreError::invalid_input(
            None,
            format!("due date '{trimmed}' must use the YYYY-MM-DD format ({error})"),
        )
    })
}

pub fn format_due_date(date: Date) -> String {
    date.format(DUE_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

pub fn parse_priority(raw: &str) -> CoreResult<i64> {
    let trimmed = raw.trim();
    trimmed.parse::<i64>().map_err(|_| {
        CoreError::invalid_input(None, format!("priority '{trimmed}' must be an integer"))
    })
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{Task, format_due_date, parse_due_date, parse_priority};
    use crate::models::CoreErrorKind;

    fn task(name: &str, priority: i64, due: time::Date) -> Task {
        Task {
            name: name.to_string(),
            priority,
            due_date: due,
            dependencies: Vec::new(),
        }
    }

    #[test]
    fn due_date_parses_fixed_format_and_formats_back() {
        let parsed = parse_due_date(" 2025-03-09 ").unwrap();
        assert_eq!(parsed, date!(2025 - 03 - 09));
        assert_eq!(format_due_date(parsed), "2025-03-09");
    }

    #[test]
    fn due_date_rejects_other_shapes() {
        for raw in ["", "2025/03/09", "09-03-2025", "2025-13-01", "2025-02-30", "soon"] {
            let error = parse_due_date(raw).unwrap_err();
            assert_eq!(error.kind, CoreErrorKind::InvalidInput, "input {raw:?}");
        }
    }

    #[test]
    fn due_date_rejects_signed_years() {
        for raw in ["-0001-01-01", "+2025-01-01", "+202-01-01", "02025-01-01"] {
            let error = parse_due_date(raw).unwrap_err();
            assert_eq!(error.kind, CoreErrorKind::InvalidInput, "input {raw:?}");
        }
    }

    #[test]
    fn formatted_due_date_parses_back() {
        for raw in ["0001-01-01", "0999-12-31", "2024-02-29", "9999-12-31"] {
            let parsed = parse_due_date(raw).unwrap();
            assert_eq!(format_due_date(parsed), raw);
            assert_eq!(parse_due_date(&format_due_date(parsed)).unwrap(), parsed);
        }
    }

    #[test]
    fn priority_must_be_an_integer() {
        assert_eq!(parse_priority(" -3 ").unwrap(), -3);
        assert_eq!(
            parse_priority("high").unwrap_err().kind,
            CoreErrorKind::InvalidInput
        );
        assert_eq!(
            parse_priority("1.5").unwrap_err().kind,
            CoreErrorKind::InvalidInput
        );
    }

    #[test]
    fn ordering_is_priority_then_due_date() {
        let urgent_late = task("z", 1, date!(2025 - 12 - 31));
        let relaxed_early = task("a", 2, date!(2025 - 01 - 01));
        let urgent_early = task("m", 1, date!(2025 - 06 - 01));

        let mut tasks = vec![relaxed_early.clone(), urgent_late.clone(), urgent_early.clone()];
        tasks.sort();
        assert_eq!(tasks, vec![urgent_early, urgent_late, relaxed_early]);
    }
}
