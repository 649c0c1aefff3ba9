use crate::task::Task;

/// Case-insensitive substring matcher for task title and description.
pub struct TextMatcher {
    needle: String,
}

impl TextMatcher {
    /// Build a matcher for a search query. Returns `None` for an empty query,
    /// which places no constraint on tasks.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        Some(Self {
            needle: query.to_lowercase(),
        })
    }

    /// Determine whether the title or the description contains the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_field(&task.title) || self.matches_field(&task.description)
    }

    fn matches_field(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }
}
