use crate::task::Task;

/// Completion counters over a task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of tasks.
    pub total: usize,
    /// Tasks marked completed.
    pub completed: usize,
    /// Tasks still pending.
    pub pending: usize,
}

impl TaskStats {
    /// Count tasks by completion state.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
        }
    }

    /// Share of completed tasks as a whole percentage (0 for an empty set).
    #[must_use]
    pub fn completion_percent(self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let percent = (self.completed * 100 + self.total / 2) / self.total;
        u8::try_from(percent).unwrap_or(100)
    }
}
