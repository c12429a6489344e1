//! JSON output formatting for piping results into other tools.

use serde_json::{Value, json};

use crate::models::Paper;

/// Create a compact paper representation for JSON output.
#[must_use]
pub fn compact_paper(paper: &Paper) -> Value {
    let mut obj = json!({
        "id": paper.id,
        "title": paper.title_or_default(),
        "citedByCount": paper.cited_by_count,
        "source": paper.source,
        "authors": paper.authors.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
    });

    if let Some(url) = paper.doi_url() {
        obj["doi"] = json!(paper.doi);
        obj["doiUrl"] = json!(url);
    }

    if !paper.r#abstract.is_empty() {
        obj["abstract"] = json!(paper.r#abstract);
    }

    obj
}

/// Compact representation of a result list.
#[must_use]
pub fn compact_papers(papers: &[Paper]) -> Value {
    Value::Array(papers.iter().map(compact_paper).collect())
}
