//! Client-side routes.
//!
//! Two patterns are recognized: `/` for the search page and `/papers/:id` for the
//! detail page. The id segment is percent-decoded on the way in and re-encoded
//! when a route is turned back into a path.

use std::fmt;
use std::str::FromStr;

/// Errors from route resolution.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// No pattern matches the path.
    #[error("No route matches '{0}'")]
    Unknown(String),

    /// The id segment is not valid percent-encoded UTF-8.
    #[error("Invalid paper id encoding in '{0}'")]
    InvalidEncoding(String),
}

/// A resolved client route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Search,
    /// `/papers/:id`, holding the decoded id.
    Paper {
        /// Decoded paper id.
        id: String,
    },
}

impl Route {
    /// Detail route for a paper id.
    #[must_use]
    pub fn paper(id: impl Into<String>) -> Self {
        Self::Paper { id: id.into() }
    }

    /// Resolve a path. Query strings and fragments are ignored, as is a trailing `/`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] when no pattern matches or the id cannot be decoded.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim();
        let path_only = trimmed.split(['?', '#']).next().unwrap_or_default();
        let path_only = match path_only.trim_end_matches('/') {
            "" => "/",
            p => p,
        };

        if path_only == "/" {
            return Ok(Self::Search);
        }

        let segment = path_only
            .strip_prefix("/papers/")
            .filter(|seg| !seg.is_empty() && !seg.contains('/'))
            .ok_or_else(|| RouteError::Unknown(trimmed.to_string()))?;

        let id = urlencoding::decode(segment)
            .map_err(|_| RouteError::InvalidEncoding(trimmed.to_string()))?;

        Ok(Self::paper(id.into_owned()))
    }

    /// Path for this route, with the id percent-encoded.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Search => "/".to_string(),
            Self::Paper { id } => format!("/papers/{}", urlencoding::encode(id)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
