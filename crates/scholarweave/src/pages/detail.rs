//! Paper detail page.

use serde_json::Value;

use crate::client::{ApiClient, is_empty_payload};
use crate::error::ClientResult;
use crate::models::Paper;
use crate::normalize::normalize_record;

/// Handle for an issued fetch; pass it back to [`DetailPage::finish_fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    id: String,
}

impl FetchTicket {
    /// The id being fetched.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// What the detail page currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailView<'a> {
    /// A fetch is in flight.
    Loading,
    /// The last fetch failed (not-found included).
    Error(&'a str),
    /// The backend returned an empty payload.
    NotFound,
    /// The paper.
    Paper(&'a Paper),
}

/// Detail page state for one `/papers/:id` route.
#[derive(Debug, Clone, Default)]
pub struct DetailPage {
    id: Option<String>,
    paper: Option<Paper>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl DetailPage {
    /// Create a page for the given route id. Nothing is fetched until [`Self::load`].
    #[must_use]
    pub fn new(id: Option<String>) -> Self {
        Self { id, ..Self::default() }
    }

    /// Route id, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Start fetching the current id. Returns `None` when there is no id.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        let id = self.id.clone()?;
        self.generation += 1;
        self.loading = true;

        Some(FetchTicket { generation: self.generation, id })
    }

    /// Apply a fetch outcome. Returns `false` for a superseded ticket.
    ///
    /// The payload goes through the same normalizer as search results, so the
    /// detail view never depends on the backend already sending the canonical shape.
    pub fn finish_fetch(&mut self, ticket: &FetchTicket, outcome: ClientResult<Value>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(id = %ticket.id, "Discarding stale paper response");
            return false;
        }

        match outcome {
            Ok(value) => {
                self.paper = (!is_empty_payload(&value)).then(|| normalize_record(&value));
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(id = %ticket.id, error = %err, "Paper fetch failed");
                self.error = Some(err.user_message());
                self.paper = None;
            }
        }

        self.loading = false;
        true
    }

    /// Fetch the paper for the current id (the "mount" step).
    pub async fn load(&mut self, client: &ApiClient) {
        let Some(ticket) = self.begin_fetch() else {
            return;
        };
        let outcome = client.get_by_id(ticket.id()).await;
        self.finish_fetch(&ticket, outcome);
    }

    /// Change the route id, refetching when it differs from the current one.
    pub async fn set_id(&mut self, client: &ApiClient, id: impl Into<String>) {
        let id = id.into();
        if self.id.as_deref() == Some(id.as_str()) {
            return;
        }
        self.id = Some(id);
        self.load(client).await;
    }

    /// Current view.
    #[must_use]
    pub fn view(&self) -> DetailView<'_> {
        if self.loading {
            DetailView::Loading
        } else if let Some(error) = &self.error {
            DetailView::Error(error)
        } else if let Some(paper) = &self.paper {
            DetailView::Paper(paper)
        } else {
            DetailView::NotFound
        }
    }
}
