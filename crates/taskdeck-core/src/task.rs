use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::id::{CategoryId, TaskId};
use crate::priority::Priority;

/// A single to-do item.
///
/// `id` and `created_at` are fixed at creation and only readable afterwards.
/// On the wire the record is flat camelCase; an unset due date or category
/// is stored as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    /// Short summary shown in lists.
    pub title: String,
    /// Free-form details (may be empty).
    #[serde(default)]
    pub description: String,
    /// Calendar day the task is due.
    #[serde(default, with = "due_date_wire")]
    pub due_date: Option<Date>,
    /// Urgency.
    #[serde(default)]
    pub priority: Priority,
    /// Completion flag.
    #[serde(default)]
    pub completed: bool,
    /// Referenced category (`None` = uncategorized).
    #[serde(default, with = "category_wire")]
    pub category: Option<CategoryId>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl Task {
    /// Materialize a task from caller-supplied fields plus generated identity.
    #[must_use]
    pub fn new(id: TaskId, created_at: OffsetDateTime, fields: NewTask) -> Self {
        let NewTask {
            title,
            description,
            due_date,
            priority,
            completed,
            category,
        } = fields;
        Self {
            id,
            title,
            description,
            due_date,
            priority,
            completed,
            category,
            created_at,
        }
    }

    /// Identifier of the task.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}

/// Fields supplied when adding a task; the store generates `id` and `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    /// Short summary shown in lists.
    pub title: String,
    /// Free-form details.
    pub description: String,
    /// Calendar day the task is due.
    pub due_date: Option<Date>,
    /// Urgency.
    pub priority: Priority,
    /// Completion flag.
    pub completed: bool,
    /// Referenced category.
    pub category: Option<CategoryId>,
}

impl NewTask {
    /// Start a pending, medium priority, uncategorized task with the given title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// A named, colored label that tasks can reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Display color (e.g. `#9b87f5`).
    pub color: String,
}

impl Category {
    /// The categories available on first run.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        [
            ("work", "Work", "#9b87f5"),
            ("personal", "Personal", "#7E69AB"),
            ("shopping", "Shopping", "#4682B4"),
            ("health", "Health", "#6A5ACD"),
        ]
        .into_iter()
        .map(|(id, name, color)| Self {
            id: CategoryId::from(id),
            name: name.to_owned(),
            color: color.to_owned(),
        })
        .collect()
    }
}

/// Fields supplied when adding a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Display name.
    pub name: String,
    /// Display color.
    pub color: String,
}

#[allow(clippy::ref_option)]
mod due_date_wire {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    use crate::dates::{format_iso_date, parse_due_date};

    pub fn serialize<S: Serializer>(value: &Option<Date>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => s.serialize_str(&format_iso_date(*date)),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Date>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.as_deref().and_then(parse_due_date))
    }
}

#[allow(clippy::ref_option)]
mod category_wire {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::id::CategoryId;

    pub fn serialize<S: Serializer>(value: &Option<CategoryId>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_ref().map_or("", CategoryId::as_str))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<CategoryId>, D::Error> {
        let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
        Ok((!raw.is_empty()).then(|| CategoryId::from(raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use time::macros::{date, datetime};

    fn sample() -> Task {
        Task::new(
            TaskId::from("t1"),
            datetime!(2024-01-02 03:04:05 UTC),
            NewTask {
                title: "Buy groceries".into(),
                description: "Go shopping".into(),
                due_date: Some(date!(2024 - 01 - 10)),
                priority: Priority::High,
                completed: false,
                category: Some(CategoryId::from("shopping")),
            },
        )
    }

    #[test]
    fn task_serializes_as_flat_camel_case_record() {
        let value = serde_json::to_value(sample()).unwrap_or_else(|err| panic!("serialize: {err}"));
        assert_eq!(
            value,
            json!({
                "id": "t1",
                "title": "Buy groceries",
                "description": "Go shopping",
                "dueDate": "2024-01-10",
                "priority": "high",
                "completed": false,
                "category": "shopping",
                "createdAt": "2024-01-02T03:04:05Z",
            })
        );
    }

    #[test]
    fn unset_fields_use_empty_strings() {
        let mut task = sample();
        task.due_date = None;
        task.category = None;
        let value = serde_json::to_value(&task).unwrap_or_else(|err| panic!("serialize: {err}"));
        assert_eq!(value["dueDate"], Value::String(String::new()));
        assert_eq!(value["category"], Value::String(String::new()));

        let back: Task = serde_json::from_value(value).unwrap_or_else(|err| panic!("deserialize: {err}"));
        assert_eq!(back, task);
    }

    #[test]
    fn deserializes_browser_style_timestamps() {
        let raw = json!({
            "id": "abc123xyz",
            "title": "Legacy",
            "description": "",
            "dueDate": "",
            "priority": "low",
            "completed": true,
            "category": "",
            "createdAt": "2024-05-01T10:20:30.123Z",
        });
        let task: Task = serde_json::from_value(raw).unwrap_or_else(|err| panic!("deserialize: {err}"));
        assert_eq!(task.id().as_str(), "abc123xyz");
        assert!(task.completed);
        assert_eq!(task.due_date, None);
        assert_eq!(task.category, None);
        assert_eq!(task.created_at().year(), 2024);
    }

    #[test]
    fn default_categories_are_fixed() {
        let ids: Vec<String> = Category::defaults().into_iter().map(|c| c.id.to_string()).collect();
        assert_eq!(ids, vec!["work", "personal", "shopping", "health"]);
    }
}
