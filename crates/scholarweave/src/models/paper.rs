//! Canonical paper record used by every view.

use serde::{Deserialize, Serialize};

/// Source label used when a record does not name one.
pub const DEFAULT_SOURCE: &str = "OpenAlex";

/// Resolver prefix for DOI links.
const DOI_RESOLVER: &str = "https://doi.org/";

/// A research paper in display-ready form.
///
/// Every field is populated; absent upstream values have already been replaced by
/// defaults during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    /// Navigation and list key.
    #[serde(default)]
    pub id: String,

    /// Paper title, possibly empty.
    #[serde(default)]
    pub title: String,

    /// Paper abstract, possibly empty.
    #[serde(default)]
    pub r#abstract: String,

    /// DOI as reported upstream (bare or as a resolver URL), possibly empty.
    #[serde(default)]
    pub doi: String,

    /// Authors in publication order.
    #[serde(default)]
    pub authors: Vec<Author>,

    /// Number of citations this paper has received.
    #[serde(default)]
    pub cited_by_count: u64,

    /// Data provider label.
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

impl Default for Paper {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            r#abstract: String::new(),
            doi: String::new(),
            authors: Vec::new(),
            cited_by_count: 0,
            source: default_source(),
        }
    }
}

impl Paper {
    /// Get the paper title, falling back to "Untitled" if empty.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        if self.title.is_empty() { "Untitled" } else { &self.title }
    }

    /// Get the abstract, falling back to "No abstract available" if empty.
    #[must_use]
    pub fn abstract_or_default(&self) -> &str {
        if self.r#abstract.is_empty() { "No abstract available" } else { &self.r#abstract }
    }

    /// Check whether a DOI is present.
    #[must_use]
    pub fn has_doi(&self) -> bool {
        !self.doi.is_empty()
    }

    /// Resolver URL for the DOI, if any.
    ///
    /// OpenAlex reports DOIs as full `https://doi.org/...` URLs; those are used as-is
    /// instead of being prefixed twice.
    #[must_use]
    pub fn doi_url(&self) -> Option<String> {
        if !self.has_doi() {
            return None;
        }
        let bare = self
            .doi
            .strip_prefix(DOI_RESOLVER)
            .or_else(|| self.doi.strip_prefix("http://doi.org/"))
            .unwrap_or(&self.doi);
        Some(format!("{DOI_RESOLVER}{bare}"))
    }

    /// Get author names as a comma-separated string.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors.iter().map(|a| a.name.as_str()).collect::<Vec<_>>().join(", ")
    }
}

/// A paper author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name.
    pub name: String,
}

impl Author {
    /// Name used when an author entry has no recognizable shape.
    pub const UNKNOWN: &'static str = "Unknown";

    /// Create an author from a display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Placeholder author for unrecognized entries.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(Self::UNKNOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_text() {
        let paper = Paper::default();
        assert_eq!(paper.title_or_default(), "Untitled");
        assert_eq!(paper.abstract_or_default(), "No abstract available");
        assert_eq!(paper.source, "OpenAlex");
        assert!(paper.doi_url().is_none());
    }

    #[test]
    fn test_doi_url_bare_and_prefixed() {
        let mut paper = Paper { doi: "10.1000/xyz".to_string(), ..Default::default() };
        assert_eq!(paper.doi_url().as_deref(), Some("https://doi.org/10.1000/xyz"));

        paper.doi = "https://doi.org/10.1000/xyz".to_string();
        assert_eq!(paper.doi_url().as_deref(), Some("https://doi.org/10.1000/xyz"));
    }

    #[test]
    fn test_author_names() {
        let paper = Paper {
            authors: vec![Author::new("A. One"), Author::new("B. Two")],
            ..Default::default()
        };
        assert_eq!(paper.author_names(), "A. One, B. Two");
    }
}
