//! Search results page.

use crate::client::ApiClient;
use crate::components::SearchBox;
use crate::error::ClientResult;
use crate::models::{Paper, SearchResponse};
use crate::normalize::normalize_results;
use crate::router::Route;

/// Handle for an issued search; pass it back to [`SearchPage::finish_search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    /// The query this search was issued for.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// What the search page currently shows. Exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchView<'a> {
    /// A search is in flight; show a skeleton grid.
    Loading,
    /// The last search failed.
    Error(&'a str),
    /// The last search succeeded with no results.
    Empty {
        /// Query that produced nothing.
        query: &'a str,
    },
    /// Nothing searched yet.
    Initial,
    /// Result grid.
    Results {
        /// Query the results belong to.
        query: &'a str,
        /// Normalized results.
        papers: &'a [Paper],
        /// Upstream match count, when reported.
        total: Option<u64>,
    },
}

/// Search page state.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    search_box: SearchBox,
    query: String,
    results: Vec<Paper>,
    total: Option<u64>,
    loading: bool,
    error: Option<String>,
    searched: bool,
    generation: u64,
}

impl SearchPage {
    /// Create a page in its initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The search input.
    #[must_use]
    pub const fn search_box(&self) -> &SearchBox {
        &self.search_box
    }

    /// Mutable access to the search input.
    pub fn search_box_mut(&mut self) -> &mut SearchBox {
        &mut self.search_box
    }

    /// Query of the latest search.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Normalized results of the latest completed search.
    #[must_use]
    pub fn results(&self) -> &[Paper] {
        &self.results
    }

    /// Whether a search is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error message of the latest search, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether at least one search has completed.
    #[must_use]
    pub const fn has_searched(&self) -> bool {
        self.searched
    }

    /// Start a search: set loading, clear the previous error, record the query.
    pub fn begin_search(&mut self, query: &str) -> SearchTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.query = query.to_string();
        self.search_box.set_loading(true);

        SearchTicket { generation: self.generation, query: self.query.clone() }
    }

    /// Apply the outcome of a search.
    ///
    /// Returns `false` (and changes nothing) when a newer search has been issued
    /// since `ticket` was handed out.
    pub fn finish_search(
        &mut self,
        ticket: &SearchTicket,
        outcome: ClientResult<SearchResponse>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                query = %ticket.query,
                generation = ticket.generation,
                latest = self.generation,
                "Discarding stale search response"
            );
            return false;
        }

        match outcome {
            Ok(response) => {
                self.results = normalize_results(response.results());
                self.total = response.total();
                tracing::info!(
                    query = %ticket.query,
                    results = self.results.len(),
                    "Search completed"
                );
            }
            Err(err) => {
                tracing::warn!(query = %ticket.query, error = %err, "Search failed");
                self.error = Some(err.user_message());
                self.results.clear();
                self.total = None;
            }
        }

        self.searched = true;
        self.loading = false;
        self.search_box.set_loading(false);
        true
    }

    /// Run a search end to end.
    pub async fn search(&mut self, client: &ApiClient, query: &str) {
        let ticket = self.begin_search(query);
        let outcome = client.search(ticket.query()).await;
        self.finish_search(&ticket, outcome);
    }

    /// Submit the search box; does nothing when the box rejects the submission.
    ///
    /// Returns whether a search ran.
    pub async fn submit(&mut self, client: &ApiClient) -> bool {
        let Some(query) = self.search_box.submit().map(str::to_string) else {
            return false;
        };
        self.search(client, &query).await;
        true
    }

    /// Current view.
    #[must_use]
    pub fn view(&self) -> SearchView<'_> {
        if self.loading {
            SearchView::Loading
        } else if let Some(error) = &self.error {
            SearchView::Error(error)
        } else if !self.searched {
            SearchView::Initial
        } else if self.results.is_empty() {
            SearchView::Empty { query: &self.query }
        } else {
            SearchView::Results { query: &self.query, papers: &self.results, total: self.total }
        }
    }

    /// Route to the detail page for the result at `index` (0-based).
    #[must_use]
    pub fn select(&self, index: usize) -> Option<Route> {
        self.results.get(index).map(|paper| Route::paper(&paper.id))
    }
}
