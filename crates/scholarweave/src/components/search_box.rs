//! Single-line search input.

/// Search input state.
///
/// Holds the query text and whether a search is in flight. While loading, the
/// input and the submit action are both disabled.
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    query: String,
    loading: bool,
}

impl SearchBox {
    /// Placeholder shown for an empty input.
    pub const PLACEHOLDER: &'static str = "Search papers by title, author, or keywords...";

    /// Create an empty search box.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current query text, untrimmed.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query text. Ignored while the input is disabled.
    pub fn set_query(&mut self, query: impl Into<String>) {
        if !self.loading {
            self.query = query.into();
        }
    }

    /// Mark a search as started or finished.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Whether a search is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the submit action is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.query.trim().is_empty()
    }

    /// Submit the form.
    ///
    /// Returns the raw query to search for, or `None` when the trimmed query is
    /// empty or a search is already running.
    #[must_use]
    pub fn submit(&self) -> Option<&str> {
        self.can_submit().then_some(self.query.as_str())
    }

    /// Label of the submit control.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        if self.loading { "Searching..." } else { "Search" }
    }
}
