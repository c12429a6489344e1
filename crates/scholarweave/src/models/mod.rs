//! Data models for the ScholarWeave backend.
//!
//! `Paper` and `Author` are the canonical display records produced by the
//! normalizer; the response types mirror the backend's JSON envelopes.

mod health;
mod lenient;
mod paper;
mod search;

pub use health::{HealthResponse, ServiceStatuses};
pub use paper::{Author, DEFAULT_SOURCE, Paper};
pub use search::{SearchMeta, SearchResponse};
