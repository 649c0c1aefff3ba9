//! User-facing confirmations and the observer registry that delivers them.
//!
//! Observers run synchronously after a mutation has been applied, the
//! derived view rebuilt and the change handed to persistence. They cannot
//! veto or alter the mutation.

use std::fmt;

use tracing::trace;

/// How a notification surface should style a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral confirmation.
    Info,
    /// Confirmation of a removal.
    Destructive,
}

/// Human-readable confirmation emitted by task and category mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Short headline.
    pub title: String,
    /// One-sentence detail.
    pub description: String,
    /// Presentation hint.
    pub severity: Severity,
}

impl Notice {
    fn new(title: &str, description: String, severity: Severity) -> Self {
        Self {
            title: title.to_owned(),
            description,
            severity,
        }
    }

    pub(crate) fn task_added(title: &str) -> Self {
        Self::new(
            "Task added",
            format!("\"{title}\" has been added to your tasks."),
            Severity::Info,
        )
    }

    pub(crate) fn task_updated() -> Self {
        Self::new(
            "Task updated",
            "Your task has been updated successfully.".to_owned(),
            Severity::Info,
        )
    }

    pub(crate) fn task_deleted(title: Option<&str>) -> Self {
        let description = title.map_or_else(
            || "Task has been deleted.".to_owned(),
            |title| format!("\"{title}\" has been deleted."),
        );
        Self::new("Task deleted", description, Severity::Destructive)
    }

    pub(crate) fn category_added(name: &str) -> Self {
        Self::new(
            "Category added",
            format!("\"{name}\" category has been created."),
            Severity::Info,
        )
    }

    pub(crate) fn category_deleted(name: Option<&str>) -> Self {
        let description = name.map_or_else(
            || "Category has been deleted.".to_owned(),
            |name| format!("\"{name}\" category has been deleted."),
        );
        Self::new("Category deleted", description, Severity::Destructive)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Something observers are told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A confirmation for the user.
    Notice(Notice),
    /// The derived view was rebuilt.
    ViewChanged,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Callback invoked for every [`StoreEvent`].
pub type Observer = Box<dyn FnMut(&StoreEvent)>;

/// Ordered set of observers.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer)>,
}

impl Observers {
    /// Register `observer`; it receives events in subscription order.
    pub fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Remove a registration. Returns false for unknown ids.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Deliver `event` to every observer.
    pub fn emit(&mut self, event: &StoreEvent) {
        trace!(observers = self.entries.len(), ?event, "Emitting store event");
        for (_, observer) in &mut self.entries {
            observer(event);
        }
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("next_id", &self.next_id)
            .field("len", &self.entries.len())
            .finish()
    }
}
