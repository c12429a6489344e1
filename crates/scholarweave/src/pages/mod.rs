//! Pages: the search results page and the paper detail page.
//!
//! Each page owns its load/error state. Fetches are split into a `begin_*` step
//! that hands out a ticket and a `finish_*` step that applies the outcome, so
//! a response belonging to a superseded request is discarded instead of
//! overwriting newer state.

mod detail;
mod search;

pub use detail::{DetailPage, DetailView, FetchTicket};
pub use search::{SearchPage, SearchTicket, SearchView};
