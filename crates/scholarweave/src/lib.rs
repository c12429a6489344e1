//! ScholarWeave terminal client
//!
//! Searches the ScholarWeave backend (an OpenAlex proxy) and renders paper
//! results and details in the terminal.
//!
//! # Features
//!
//! - **API client**: health, search and fetch-by-id with a fixed request timeout
//! - **Normalizer**: maps heterogeneous upstream records onto one canonical `Paper`
//! - **Views**: paper cards, a detail page and a polling health indicator
//! - **Router**: `/` and `/papers/:id`, with percent-encoded ids
//!
//! # Example
//!
//! ```no_run
//! use scholarweave::{ApiClient, Config, pages::SearchPage};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = ApiClient::new(&config)?;
//!
//!     let mut page = SearchPage::new();
//!     page.search(&client, "quantum error correction").await;
//!     println!("{}", scholarweave::formatters::format_search_view(&page.view()));
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod client;
pub mod components;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod normalize;
pub mod pages;
pub mod router;

pub use client::ApiClient;
pub use config::Config;
pub use error::ClientError;
pub use router::{Route, RouteError};
