//! Search endpoint envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;

/// Response of `GET /papers/search`.
///
/// Result entries are kept as raw JSON; their shape varies with the upstream
/// provider and is resolved by [`crate::normalize`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Raw result records. `None` when the backend omitted the field or sent
    /// something other than an array.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub results: Option<Vec<Value>>,

    /// Optional count metadata; a malformed `meta` object is dropped.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub meta: Option<SearchMeta>,
}

impl SearchResponse {
    /// Raw results, empty when the field was absent.
    #[must_use]
    pub fn results(&self) -> &[Value] {
        self.results.as_deref().unwrap_or(&[])
    }

    /// Total match count reported upstream, if any.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.meta.as_ref().and_then(|m| m.count)
    }
}

/// Search metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchMeta {
    /// Total number of matching works upstream; `None` when absent or not a
    /// non-negative integer.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub count: Option<u64>,
}
