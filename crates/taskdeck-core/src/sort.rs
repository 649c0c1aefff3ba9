//! Sort options and the comparators they select.

use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, str::FromStr};

use crate::error::ParseError;
use crate::task::Task;

/// One of the eight (field, direction) display orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOption {
    /// Earliest due date first.
    #[default]
    #[serde(rename = "dueDate-asc")]
    DueDateAsc,
    /// Latest due date first.
    #[serde(rename = "dueDate-desc")]
    DueDateDesc,
    /// Highest priority first.
    #[serde(rename = "priority-desc")]
    PriorityDesc,
    /// Lowest priority first.
    #[serde(rename = "priority-asc")]
    PriorityAsc,
    /// Title A to Z.
    #[serde(rename = "alphabetical-asc")]
    AlphabeticalAsc,
    /// Title Z to A.
    #[serde(rename = "alphabetical-desc")]
    AlphabeticalDesc,
    /// Newest first.
    #[serde(rename = "createdAt-desc")]
    CreatedAtDesc,
    /// Oldest first.
    #[serde(rename = "createdAt-asc")]
    CreatedAtAsc,
}

impl SortOption {
    /// Every option in menu order.
    pub const ALL: [Self; 8] = [
        Self::DueDateAsc,
        Self::DueDateDesc,
        Self::PriorityDesc,
        Self::PriorityAsc,
        Self::AlphabeticalAsc,
        Self::AlphabeticalDesc,
        Self::CreatedAtDesc,
        Self::CreatedAtAsc,
    ];

    /// Wire representation, e.g. `dueDate-asc`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DueDateAsc => "dueDate-asc",
            Self::DueDateDesc => "dueDate-desc",
            Self::PriorityDesc => "priority-desc",
            Self::PriorityAsc => "priority-asc",
            Self::AlphabeticalAsc => "alphabetical-asc",
            Self::AlphabeticalDesc => "alphabetical-desc",
            Self::CreatedAtDesc => "createdAt-desc",
            Self::CreatedAtAsc => "createdAt-asc",
        }
    }

    /// Human-readable menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DueDateAsc => "Due Date (Earliest First)",
            Self::DueDateDesc => "Due Date (Latest First)",
            Self::PriorityDesc => "Priority (High to Low)",
            Self::PriorityAsc => "Priority (Low to High)",
            Self::AlphabeticalAsc => "Title (A-Z)",
            Self::AlphabeticalDesc => "Title (Z-A)",
            Self::CreatedAtDesc => "Created (Newest First)",
            Self::CreatedAtAsc => "Created (Oldest First)",
        }
    }

    /// Compare two tasks under this option.
    ///
    /// Tasks without a due date are placed after every dated task in both
    /// due-date directions.
    #[must_use]
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::DueDateAsc => compare_due(a, b, false),
            Self::DueDateDesc => compare_due(a, b, true),
            Self::PriorityAsc => a.priority.rank().cmp(&b.priority.rank()),
            Self::PriorityDesc => b.priority.rank().cmp(&a.priority.rank()),
            Self::AlphabeticalAsc => compare_titles(&a.title, &b.title),
            Self::AlphabeticalDesc => compare_titles(&b.title, &a.title),
            Self::CreatedAtAsc => a.created_at().cmp(&b.created_at()),
            Self::CreatedAtDesc => b.created_at().cmp(&a.created_at()),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|option| option.as_str() == trimmed)
            .ok_or_else(|| ParseError::new("sort option", s))
    }
}

fn compare_due(a: &Task, b: &Task, descending: bool) -> Ordering {
    match (a.due_date, b.due_date) {
        (Some(left), Some(right)) if descending => right.cmp(&left),
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// Case-insensitive first; on a tie lowercase sorts before uppercase.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Return a newly ordered copy of `tasks`. The input is left untouched and
/// tasks with equal keys keep their relative order.
#[must_use]
pub fn sort_tasks(tasks: &[Task], option: SortOption) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| option.compare(a, b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::TaskId;
    use crate::priority::Priority;
    use crate::task::NewTask;
    use time::macros::{date, datetime};
    use time::{Date, Duration, OffsetDateTime};

    fn task(title: &str, priority: Priority, due: Option<Date>, offset_secs: i64) -> Task {
        Task::new(
            TaskId::from(title),
            datetime!(2024-01-01 00:00 UTC) + Duration::seconds(offset_secs),
            NewTask {
                priority,
                due_date: due,
                ..NewTask::titled(title)
            },
        )
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn priority_and_due_date_scenario() {
        let tasks = vec![
            task("A", Priority::Low, Some(date!(2024 - 01 - 10)), 0),
            task("B", Priority::High, Some(date!(2024 - 01 - 05)), 1),
        ];
        assert_eq!(titles(&sort_tasks(&tasks, SortOption::PriorityDesc)), vec!["B", "A"]);
        assert_eq!(titles(&sort_tasks(&tasks, SortOption::DueDateAsc)), vec!["B", "A"]);
        assert_eq!(titles(&sort_tasks(&tasks, SortOption::DueDateDesc)), vec!["A", "B"]);
        assert_eq!(titles(&tasks), vec!["A", "B"]);
    }

    #[test]
    fn undated_tasks_sort_last_in_both_directions() {
        let tasks = vec![
            task("none", Priority::Medium, None, 0),
            task("early", Priority::Medium, Some(date!(2024 - 01 - 01)), 1),
            task("late", Priority::Medium, Some(date!(2024 - 02 - 01)), 2),
        ];
        assert_eq!(
            titles(&sort_tasks(&tasks, SortOption::DueDateAsc)),
            vec!["early", "late", "none"]
        );
        assert_eq!(
            titles(&sort_tasks(&tasks, SortOption::DueDateDesc)),
            vec!["late", "early", "none"]
        );
    }

    #[test]
    fn every_option_is_stable_for_equal_keys() {
        let tasks: Vec<Task> = ["x1", "x2", "x3", "x4"]
            .into_iter()
            .map(|id| {
                Task::new(
                    TaskId::from(id),
                    OffsetDateTime::UNIX_EPOCH,
                    NewTask {
                        due_date: Some(date!(2024 - 05 - 05)),
                        ..NewTask::titled("same")
                    },
                )
            })
            .collect();
        for option in SortOption::ALL {
            let sorted = sort_tasks(&tasks, option);
            let ids: Vec<&str> = sorted.iter().map(|t| t.id().as_str()).collect();
            assert_eq!(ids, vec!["x1", "x2", "x3", "x4"], "{option}");
        }
    }

    #[test]
    fn alphabetical_ignores_case() {
        let tasks = vec![
            task("banana", Priority::Medium, None, 0),
            task("Apple", Priority::Medium, None, 1),
            task("cherry", Priority::Medium, None, 2),
        ];
        assert_eq!(
            titles(&sort_tasks(&tasks, SortOption::AlphabeticalAsc)),
            vec!["Apple", "banana", "cherry"]
        );
        assert_eq!(
            titles(&sort_tasks(&tasks, SortOption::AlphabeticalDesc)),
            vec!["cherry", "banana", "Apple"]
        );
    }

    #[test]
    fn created_at_orders_by_timestamp() {
        let tasks = vec![
            task("second", Priority::Medium, None, 10),
            task("first", Priority::Medium, None, 0),
        ];
        assert_eq!(
            titles(&sort_tasks(&tasks, SortOption::CreatedAtAsc)),
            vec!["first", "second"]
        );
        assert_eq!(
            titles(&sort_tasks(&tasks, SortOption::CreatedAtDesc)),
            vec!["second", "first"]
        );
    }

    #[test]
    fn wire_names_round_trip_through_from_str() {
        for option in SortOption::ALL {
            assert_eq!(option.as_str().parse::<SortOption>(), Ok(option));
            let json = serde_json::to_string(&option).unwrap_or_else(|err| panic!("serialize: {err}"));
            assert_eq!(json, format!("\"{option}\""));
        }
        assert!("title-asc".parse::<SortOption>().is_err());
        assert_eq!(SortOption::default(), SortOption::DueDateAsc);
    }
}
