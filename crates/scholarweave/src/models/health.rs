//! Health endpoint payload.

use serde::{Deserialize, Serialize};

use super::lenient;

/// Response of `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status (e.g. "ok").
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: String,

    /// Backend version string.
    #[serde(default, deserialize_with = "lenient::text")]
    pub version: String,

    /// RFC 3339 timestamp of the check, as reported by the backend.
    #[serde(default, deserialize_with = "lenient::text")]
    pub timestamp: String,

    /// Per-dependency statuses.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub services: ServiceStatuses,
}

/// Sub-service statuses reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatuses {
    /// The backend API itself.
    #[serde(default, deserialize_with = "lenient::text")]
    pub api: String,

    /// Connectivity to OpenAlex.
    #[serde(default, deserialize_with = "lenient::text")]
    pub openalex: String,
}
