//! Paper summary card.

use std::borrow::Cow;

use crate::models::Paper;
use crate::router::Route;

/// Abstracts longer than this many characters are truncated on cards.
pub const CARD_ABSTRACT_LIMIT: usize = 160;

/// Characters kept before the ellipsis when an abstract is truncated.
pub const CARD_ABSTRACT_KEEP: usize = CARD_ABSTRACT_LIMIT - 3;

/// Number of author names shown on a card before the "+N" suffix.
pub const CARD_AUTHOR_LIMIT: usize = 2;

/// Truncate an abstract for card display.
///
/// Text of at most [`CARD_ABSTRACT_LIMIT`] characters is returned unchanged; longer
/// text keeps its first [`CARD_ABSTRACT_KEEP`] characters followed by `...`.
/// Lengths are counted in Unicode scalar values.
#[must_use]
pub fn truncate_abstract(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(CARD_ABSTRACT_LIMIT) {
        None => Cow::Borrowed(text),
        Some(_) => {
            let cut = text.char_indices().nth(CARD_ABSTRACT_KEEP).map_or(text.len(), |(i, _)| i);
            Cow::Owned(format!("{}...", &text[..cut]))
        }
    }
}

/// Display model for one paper in the result grid.
#[derive(Debug, Clone, Copy)]
pub struct PaperCard<'a> {
    paper: &'a Paper,
}

impl<'a> PaperCard<'a> {
    /// Wrap a canonical paper.
    #[must_use]
    pub const fn new(paper: &'a Paper) -> Self {
        Self { paper }
    }

    /// Title, or "Untitled".
    #[must_use]
    pub fn title(&self) -> &'a str {
        self.paper.title_or_default()
    }

    /// Truncated abstract, or "No abstract available".
    #[must_use]
    pub fn abstract_preview(&self) -> Cow<'a, str> {
        if self.paper.r#abstract.is_empty() {
            Cow::Borrowed(self.paper.abstract_or_default())
        } else {
            truncate_abstract(&self.paper.r#abstract)
        }
    }

    /// First two author names plus a " +N" suffix; `None` without authors.
    #[must_use]
    pub fn author_summary(&self) -> Option<String> {
        let authors = &self.paper.authors;
        if authors.is_empty() {
            return None;
        }

        let mut summary = authors
            .iter()
            .take(CARD_AUTHOR_LIMIT)
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        if authors.len() > CARD_AUTHOR_LIMIT {
            summary.push_str(&format!(" +{}", authors.len() - CARD_AUTHOR_LIMIT));
        }

        Some(summary)
    }

    /// DOI as a Markdown link, or "N/A".
    #[must_use]
    pub fn doi_label(&self) -> String {
        match self.paper.doi_url() {
            Some(url) => format!("[{}]({url})", self.paper.doi),
            None => "N/A".to_string(),
        }
    }

    /// Route the card navigates to when selected.
    #[must_use]
    pub fn target(&self) -> Route {
        Route::paper(&self.paper.id)
    }

    /// Render the card; `index` is the 1-based position in the grid.
    #[must_use]
    pub fn render(&self, index: usize) -> String {
        let mut output = format!("## {}. {}\n\n", index, self.title());

        output.push_str(&format!("{}\n\n", self.abstract_preview()));
        output.push_str(&format!(
            "**{}** | Cited by: {}\n",
            self.paper.source, self.paper.cited_by_count
        ));

        if let Some(authors) = self.author_summary() {
            output.push_str(&format!("**Authors**: {authors}\n"));
        }

        output.push_str(&format!("DOI: {}\n", self.doi_label()));
        output.push_str(&format!("Open: {}\n", self.target()));

        output
    }
}
