//! Calendar-day classification of due dates relative to "today".
//!
//! Every function takes the current local calendar day explicitly so the
//! predicates stay pure; callers obtain it from their clock.

use time::Date;
use time::macros::format_description;

use crate::task::Task;

/// True when `date` is the same calendar day as `today`. Unset dates are never today.
#[must_use]
pub fn is_today(date: Option<Date>, today: Date) -> bool {
    date == Some(today)
}

/// True when `date` falls strictly before the start of `today`.
#[must_use]
pub fn is_past(date: Option<Date>, today: Date) -> bool {
    date.is_some_and(|d| d < today)
}

/// True when `date` falls strictly after the start of `today`.
///
/// A date equal to `today` is neither past nor future.
#[must_use]
pub fn is_future(date: Option<Date>, today: Date) -> bool {
    date.is_some_and(|d| d > today)
}

/// Parse a persisted due date.
///
/// Accepts `YYYY-MM-DD` and full ISO-8601 timestamps (only the date part is
/// kept). Empty or unparseable input yields `None`.
#[must_use]
pub fn parse_due_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let iso = format_description!("[year]-[month]-[day]");
    Date::parse(raw, iso)
        .ok()
        .or_else(|| raw.get(..10).and_then(|prefix| Date::parse(prefix, iso).ok()))
}

/// Render a due date in its persisted `YYYY-MM-DD` form.
#[must_use]
pub fn format_iso_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Human-readable due date such as `Jan 10, 2024`. Unset dates render empty.
#[must_use]
pub fn format_due_date(date: Option<Date>) -> String {
    date.map_or_else(String::new, |d| {
        d.format(format_description!("[month repr:short] [day padding:none], [year]"))
            .unwrap_or_else(|_| format_iso_date(d))
    })
}

/// Badge classification of a task's due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    /// Due before today and still pending.
    Overdue,
    /// Due today.
    Today,
    /// Due after today, or past due but already completed.
    Upcoming,
    /// No due date.
    Unscheduled,
}

impl DueStatus {
    /// Classify a task against the given calendar day.
    #[must_use]
    pub fn classify(task: &Task, today: Date) -> Self {
        match task.due_date {
            None => Self::Unscheduled,
            Some(_) if is_today(task.due_date, today) => Self::Today,
            Some(_) if is_past(task.due_date, today) && !task.completed => Self::Overdue,
            Some(_) => Self::Upcoming,
        }
    }
}
