use taskdeck_core::{CategoryId, Priority, Task};
use time::Date;

/// Patch for the due date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueDatePatch {
    /// Set the due date to the provided day.
    Set {
        /// Calendar day the task is due.
        date: Date,
    },
    /// Clear the due date.
    Clear,
}

/// Patch for the category reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryPatch {
    /// Reference the provided category.
    Set {
        /// Category identifier.
        category: CategoryId,
    },
    /// Mark the task uncategorized.
    Clear,
}

/// Field-by-field task update. Only present fields overwrite.
///
/// Identity and creation time are not part of the patch and can never change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Overwrite the title.
    pub title: Option<String>,
    /// Overwrite the description.
    pub description: Option<String>,
    /// Patch applied to the due date.
    pub due_date: Option<DueDatePatch>,
    /// Overwrite the priority.
    pub priority: Option<Priority>,
    /// Overwrite the completion flag.
    pub completed: Option<bool>,
    /// Patch applied to the category reference.
    pub category: Option<CategoryPatch>,
}

impl TaskPatch {
    /// Returns true when the patch would not change any field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.completed.is_none()
            && self.category.is_none()
    }

    /// Merge the present fields onto `task`.
    pub fn apply_to(self, task: &mut Task) {
        let Self {
            title,
            description,
            due_date,
            priority,
            completed,
            category,
        } = self;

        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = description {
            task.description = description;
        }
        match due_date {
            Some(DueDatePatch::Set { date }) => task.due_date = Some(date),
            Some(DueDatePatch::Clear) => task.due_date = None,
            None => {}
        }
        if let Some(priority) = priority {
            task.priority = priority;
        }
        if let Some(completed) = completed {
            task.completed = completed;
        }
        match category {
            Some(CategoryPatch::Set { category }) => task.category = Some(category),
            Some(CategoryPatch::Clear) => task.category = None,
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_core::{NewTask, TaskId};
    use time::macros::{date, datetime};

    fn sample() -> Task {
        Task::new(
            TaskId::from("t1"),
            datetime!(2024-01-01 09:00 UTC),
            NewTask {
                description: "first draft".into(),
                due_date: Some(date!(2024 - 01 - 10)),
                category: Some(CategoryId::from("work")),
                ..NewTask::titled("Write report")
            },
        )
    }

    #[test]
    fn empty_patch_leaves_task_untouched() {
        let mut task = sample();
        let patch = TaskPatch::default();
        assert!(patch.is_empty());
        patch.apply_to(&mut task);
        assert_eq!(task, sample());
    }

    #[test]
    fn present_fields_overwrite_and_clears_unset() {
        let mut task = sample();
        TaskPatch {
            title: Some("Send report".into()),
            priority: Some(Priority::High),
            due_date: Some(DueDatePatch::Clear),
            category: Some(CategoryPatch::Set {
                category: CategoryId::from("personal"),
            }),
            ..TaskPatch::default()
        }
        .apply_to(&mut task);

        assert_eq!(task.title, "Send report");
        assert_eq!(task.description, "first draft");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due_date, None);
        assert_eq!(task.category, Some(CategoryId::from("personal")));
        assert_eq!(task.id(), sample().id());
        assert_eq!(task.created_at(), sample().created_at());
    }
}
