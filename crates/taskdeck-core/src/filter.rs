//! Filter configuration and the composite task predicate.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use time::Date;

use crate::dates::{is_future, is_past, is_today};
use crate::error::ParseError;
use crate::id::CategoryId;
use crate::priority::Priority;
use crate::task::{Category, Task};
use crate::text_matcher::TextMatcher;

/// Completion-status constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// No constraint.
    #[default]
    All,
    /// Only completed tasks.
    Completed,
    /// Only tasks not yet completed.
    Pending,
}

impl StatusFilter {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }

    const fn matches(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Completed => completed,
            Self::Pending => !completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            _ => Err(ParseError::new("status filter", s)),
        }
    }
}

/// Priority constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PriorityFilter {
    /// No constraint.
    #[default]
    All,
    /// Only tasks with exactly this priority.
    Only(Priority),
}

impl PriorityFilter {
    fn matches(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == priority,
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(priority) => fmt::Display::fmt(priority, f),
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<Priority>()
            .map(Self::Only)
            .map_err(|_| ParseError::new("priority filter", s))
    }
}

impl TryFrom<String> for PriorityFilter {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PriorityFilter> for String {
    fn from(value: PriorityFilter) -> Self {
        value.to_string()
    }
}

/// Due-date bucket constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DueDateFilter {
    /// No constraint.
    #[default]
    All,
    /// Due today.
    Today,
    /// Due after today.
    Upcoming,
    /// Due before today and not completed.
    Overdue,
}

impl DueDateFilter {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Upcoming => "upcoming",
            Self::Overdue => "overdue",
        }
    }

    fn matches(self, task: &Task, today: Date) -> bool {
        match self {
            Self::All => true,
            Self::Today => is_today(task.due_date, today),
            Self::Upcoming => is_future(task.due_date, today),
            Self::Overdue => is_past(task.due_date, today) && !task.completed,
        }
    }
}

impl FromStr for DueDateFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "upcoming" => Ok(Self::Upcoming),
            "overdue" => Ok(Self::Overdue),
            _ => Err(ParseError::new("due date filter", s)),
        }
    }
}

/// Category constraint. Both `"all"` and `""` mean unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// No constraint.
    #[default]
    All,
    /// Only tasks referencing this category.
    Only(CategoryId),
}

impl CategoryFilter {
    fn matches(&self, category: Option<&CategoryId>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => category == Some(wanted),
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value.is_empty() || value == "all" {
            Self::All
        } else {
            Self::Only(CategoryId::from(value))
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => "all".to_owned(),
            CategoryFilter::Only(id) => id.to_string(),
        }
    }
}

/// The single live filter configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    /// Completion-status constraint.
    pub status: StatusFilter,
    /// Priority constraint.
    pub priority: PriorityFilter,
    /// Due-date bucket constraint.
    pub due_date: DueDateFilter,
    /// Category constraint.
    pub category: CategoryFilter,
    /// Free-text query (empty = no constraint).
    pub search_query: String,
}

impl FilterOptions {
    /// Overwrite only the fields present in `patch`.
    pub fn apply(&mut self, patch: FilterPatch) {
        let FilterPatch {
            status,
            priority,
            due_date,
            category,
            search_query,
        } = patch;
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(due_date) = due_date {
            self.due_date = due_date;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(search_query) = search_query {
            self.search_query = search_query;
        }
    }

    /// True when any of the status, priority, due-date or category
    /// constraints is active. The search query is not counted.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.status != StatusFilter::All
            || self.priority != PriorityFilter::All
            || self.due_date != DueDateFilter::All
            || self.category != CategoryFilter::All
    }

    /// Short labels describing each active constraint, e.g. `Status: pending`.
    #[must_use]
    pub fn active_labels(&self, categories: &[Category]) -> Vec<String> {
        let mut labels = Vec::new();
        if self.status != StatusFilter::All {
            labels.push(format!("Status: {}", self.status.as_str()));
        }
        if self.priority != PriorityFilter::All {
            labels.push(format!("Priority: {}", self.priority));
        }
        if self.due_date != DueDateFilter::All {
            labels.push(format!("Due: {}", self.due_date.as_str()));
        }
        if let CategoryFilter::Only(id) = &self.category {
            let name = categories
                .iter()
                .find(|category| category.id == *id)
                .map_or("", |category| category.name.as_str());
            labels.push(format!("Category: {name}"));
        }
        labels
    }
}

/// Field-by-field patch for [`FilterOptions`]; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    /// New completion-status constraint.
    pub status: Option<StatusFilter>,
    /// New priority constraint.
    pub priority: Option<PriorityFilter>,
    /// New due-date constraint.
    pub due_date: Option<DueDateFilter>,
    /// New category constraint.
    pub category: Option<CategoryFilter>,
    /// New search query.
    pub search_query: Option<String>,
}

impl FilterPatch {
    /// Returns true when the patch would not change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.category.is_none()
            && self.search_query.is_none()
    }
}

/// Evaluate every active constraint against `task`.
///
/// Constraints are checked in a fixed order (status, priority, category,
/// due date, search) and evaluation stops at the first violation.
#[must_use]
pub fn matches_filter(task: &Task, filters: &FilterOptions, today: Date) -> bool {
    filters.status.matches(task.completed)
        && filters.priority.matches(task.priority)
        && filters.category.matches(task.category.as_ref())
        && filters.due_date.matches(task, today)
        && TextMatcher::new(&filters.search_query).is_none_or(|matcher| matcher.matches(task))
}
