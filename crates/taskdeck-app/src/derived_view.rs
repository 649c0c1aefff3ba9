//! Filtered-then-sorted projection of the task collection.

use taskdeck_core::{FilterOptions, SortOption, Task, TaskId, matches_filter, sort_tasks};
use time::Date;

/// The task sequence currently presented to the user.
///
/// Always rebuilt from scratch; never edited in place.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DerivedView {
    tasks: Vec<Task>,
}

impl DerivedView {
    /// Apply `filters` and then `sort` to the full task collection.
    #[must_use]
    pub fn build(tasks: &[Task], filters: &FilterOptions, sort: SortOption, today: Date) -> Self {
        let matching: Vec<Task> = tasks
            .iter()
            .filter(|task| matches_filter(task, filters, today))
            .cloned()
            .collect();
        Self {
            tasks: sort_tasks(&matching, sort),
        }
    }

    /// Tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Identifiers in display order.
    pub fn ids(&self) -> impl Iterator<Item = &TaskId> {
        self.tasks.iter().map(Task::id)
    }

    /// Number of visible tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when nothing is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
