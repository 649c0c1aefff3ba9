use taskdeck_core::{
    CategoryFilter, DueDateFilter, FilterPatch, ParseError, PriorityFilter, SortOption, StatusFilter,
};
use thiserror::Error;

/// Error type returned while constructing filter patches from user-facing inputs.
#[derive(Debug, Error)]
pub enum FilterBuildError {
    /// A token did not name a value of the given field.
    #[error("invalid {field} filter: {source}")]
    InvalidToken {
        /// Filter field being parsed.
        field: &'static str,
        /// Underlying parse error.
        #[source]
        source: ParseError,
    },
    /// Sort token was not one of the known options.
    #[error("invalid sort option: {source}")]
    InvalidSort {
        /// Underlying parse error.
        #[source]
        source: ParseError,
    },
}

/// Result alias for filter construction helpers.
pub type FilterBuildResult<T> = Result<T, FilterBuildError>;

/// Builder that accepts user-facing strings and normalizes them into a [`FilterPatch`].
///
/// `None` inputs leave the corresponding field out of the patch.
#[derive(Debug, Clone, Default)]
pub struct FilterPatchBuilder {
    patch: FilterPatch,
}

impl FilterPatchBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the status constraint (`all`, `completed`, `pending`).
    ///
    /// # Errors
    /// Returns an error if the token is not a known status.
    pub fn with_status(mut self, token: Option<&str>) -> FilterBuildResult<Self> {
        self.patch.status = parse_optional::<StatusFilter>("status", token)?;
        Ok(self)
    }

    /// Configure the priority constraint (`all`, `low`, `medium`, `high`).
    ///
    /// # Errors
    /// Returns an error if the token is not a known priority.
    pub fn with_priority(mut self, token: Option<&str>) -> FilterBuildResult<Self> {
        self.patch.priority = parse_optional::<PriorityFilter>("priority", token)?;
        Ok(self)
    }

    /// Configure the due-date constraint (`all`, `today`, `upcoming`, `overdue`).
    ///
    /// # Errors
    /// Returns an error if the token is not a known bucket.
    pub fn with_due_date(mut self, token: Option<&str>) -> FilterBuildResult<Self> {
        self.patch.due_date = parse_optional::<DueDateFilter>("due date", token)?;
        Ok(self)
    }

    /// Configure the category constraint. `all` and the empty string clear it.
    #[must_use]
    pub fn with_category(mut self, token: Option<&str>) -> Self {
        self.patch.category = token.map(|raw| CategoryFilter::from(raw.trim()));
        self
    }

    /// Configure the search query. The text is kept verbatim.
    #[must_use]
    pub fn with_search(mut self, query: Option<String>) -> Self {
        self.patch.search_query = query;
        self
    }

    /// Build the final [`FilterPatch`].
    #[must_use]
    pub fn build(self) -> FilterPatch {
        self.patch
    }
}

/// Parse a sort option token such as `priority-desc`.
///
/// # Errors
/// Returns an error if the token is not a known sort option.
pub fn parse_sort_option(token: &str) -> FilterBuildResult<SortOption> {
    token
        .parse()
        .map_err(|source| FilterBuildError::InvalidSort { source })
}

fn parse_optional<T>(field: &'static str, token: Option<&str>) -> FilterBuildResult<Option<T>>
where
    T: std::str::FromStr<Err = ParseError>,
{
    token
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|source| FilterBuildError::InvalidToken { field, source })
        })
        .transpose()
}

impl FilterBuildError {
    /// Convert the error into a message that is friendly for end-users.
    #[must_use]
    pub fn describe_user_facing(&self) -> String {
        match self {
            Self::InvalidToken { field, source } => {
                format!("\"{}\" is not a valid {field} filter.", source.token)
            }
            Self::InvalidSort { source } => {
                let known: Vec<&str> = SortOption::ALL.into_iter().map(SortOption::as_str).collect();
                format!(
                    "\"{}\" is not a sort option. Choose one of: {}.",
                    source.token,
                    known.join(", ")
                )
            }
        }
    }
}
