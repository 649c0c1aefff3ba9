//! Domain types, predicates and comparators for taskdeck tasks.
//!
//! Everything here is pure: functions that depend on the current day take it
//! as an argument instead of reading a clock.

/// Due-date classification and formatting.
pub mod dates;
/// Parse errors for user-facing tokens.
pub mod error;
/// Filter configuration and the composite predicate.
pub mod filter;
/// Identifier types.
pub mod id;
/// Task priority.
pub mod priority;
/// Sort options and comparators.
pub mod sort;
/// Completion counters.
pub mod stats;
/// Task and category records.
pub mod task;
/// Search query matching.
pub mod text_matcher;

pub use dates::DueStatus;
pub use error::ParseError;
pub use filter::{
    CategoryFilter, DueDateFilter, FilterOptions, FilterPatch, PriorityFilter, StatusFilter, matches_filter,
};
pub use id::{CategoryId, TaskId};
pub use priority::Priority;
pub use sort::{SortOption, sort_tasks};
pub use stats::TaskStats;
pub use task::{Category, NewCategory, NewTask, Task};
pub use text_matcher::TextMatcher;
