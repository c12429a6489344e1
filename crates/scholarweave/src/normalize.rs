//! Normalization of upstream search records into canonical [`Paper`]s.
//!
//! The backend forwards OpenAlex works more or less verbatim, and older or
//! alternative providers use different field names and author shapes. Each raw
//! value is classified into an explicit shape first and then mapped field by
//! field. Normalization is pure and total: malformed input degrades to defaults,
//! it never errors and never drops or adds records.

use serde_json::{Map, Value};

use crate::models::{Author, DEFAULT_SOURCE, Paper};

/// Normalize a list of raw records, preserving length and order.
#[must_use]
pub fn normalize_results(raw: &[Value]) -> Vec<Paper> {
    raw.iter().map(normalize_record).collect()
}

/// Normalize a single raw record.
#[must_use]
pub fn normalize_record(raw: &Value) -> Paper {
    match RecordShape::classify(raw) {
        RecordShape::Object(obj) => normalize_object(obj),
        RecordShape::Bare(id) => Paper { id: id.to_string(), ..Paper::default() },
        RecordShape::Other => Paper::default(),
    }
}

/// Normalize a single author entry.
#[must_use]
pub fn normalize_author(raw: &Value) -> Author {
    AuthorShape::classify(raw).into_author()
}

/// Top-level shape of a raw search record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordShape<'a> {
    /// A JSON object with (some of) the known fields.
    Object(&'a Map<String, Value>),
    /// A bare string, taken to be the record's id.
    Bare(&'a str),
    /// Anything else (null, number, array, ...).
    Other,
}

impl<'a> RecordShape<'a> {
    /// Classify a raw record.
    #[must_use]
    pub fn classify(raw: &'a Value) -> Self {
        match raw {
            Value::Object(obj) => Self::Object(obj),
            Value::String(s) => Self::Bare(s),
            _ => Self::Other,
        }
    }
}

/// Shape of a raw author entry, in decoding priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorShape<'a> {
    /// OpenAlex authorship: `{ "author": { "display_name": "..." } }`.
    Nested(&'a str),
    /// Flat object with `name` or `display_name` (`name` wins).
    Flat(&'a str),
    /// A plain string.
    Bare(&'a str),
    /// No recognizable name.
    Unrecognized,
}

impl<'a> AuthorShape<'a> {
    /// Classify a raw author entry.
    #[must_use]
    pub fn classify(raw: &'a Value) -> Self {
        if let Some(name) =
            raw.get("author").and_then(|author| author.get("display_name")).and_then(non_empty)
        {
            return Self::Nested(name);
        }

        if let Some(name) = raw
            .get("name")
            .and_then(non_empty)
            .or_else(|| raw.get("display_name").and_then(non_empty))
        {
            return Self::Flat(name);
        }

        match raw {
            Value::String(name) => Self::Bare(name),
            _ => Self::Unrecognized,
        }
    }

    /// Resolve the display name for this shape.
    #[must_use]
    pub fn into_author(self) -> Author {
        match self {
            Self::Nested(name) | Self::Flat(name) | Self::Bare(name) => Author::new(name),
            Self::Unrecognized => Author::unknown(),
        }
    }
}

fn normalize_object(obj: &Map<String, Value>) -> Paper {
    let doi = text(obj, "doi");

    Paper {
        id: text(obj, "id").or_else(|| doi.clone()).unwrap_or_default(),
        title: text(obj, "title").or_else(|| text(obj, "display_name")).unwrap_or_default(),
        r#abstract: text(obj, "abstract")
            .or_else(|| text(obj, "summary"))
            .or_else(|| obj.get("abstract_inverted_index").and_then(rebuild_inverted_abstract))
            .unwrap_or_default(),
        doi: doi.unwrap_or_default(),
        authors: author_entries(obj).iter().map(normalize_author).collect(),
        cited_by_count: obj.get("cited_by_count").and_then(count).unwrap_or(0),
        source: text(obj, "source").unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
    }
}

/// Author entries from `authors`, else `authorships`; non-array values are ignored.
fn author_entries(obj: &Map<String, Value>) -> &[Value] {
    ["authors", "authorships"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Non-empty string content of a value.
fn non_empty(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// A present text field: a non-empty string, or a number rendered in decimal.
fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A non-negative count; fractional values are truncated, negatives rejected.
fn count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f.trunc() as u64)
    })
}

/// Rebuild abstract text from an OpenAlex inverted index (`{"word": [positions]}`).
fn rebuild_inverted_abstract(index: &Value) -> Option<String> {
    let index = index.as_object()?;

    let mut positioned: Vec<(u64, &str)> = index
        .iter()
        .filter_map(|(word, positions)| positions.as_array().map(|p| (word, p)))
        .flat_map(|(word, positions)| {
            positions.iter().filter_map(Value::as_u64).map(move |pos| (pos, word.as_str()))
        })
        .collect();

    if positioned.is_empty() {
        return None;
    }

    positioned.sort_by_key(|(pos, _)| *pos);
    Some(positioned.into_iter().map(|(_, word)| word).collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_author_shapes() {
        assert_eq!(
            AuthorShape::classify(&json!({"author": {"display_name": "X"}})),
            AuthorShape::Nested("X")
        );
        assert_eq!(AuthorShape::classify(&json!({"name": "Y"})), AuthorShape::Flat("Y"));
        assert_eq!(AuthorShape::classify(&json!({"display_name": "Z"})), AuthorShape::Flat("Z"));
        assert_eq!(AuthorShape::classify(&json!("W")), AuthorShape::Bare("W"));
        assert_eq!(AuthorShape::classify(&json!({})), AuthorShape::Unrecognized);
        assert_eq!(AuthorShape::classify(&json!(42)), AuthorShape::Unrecognized);
    }

    #[test]
    fn test_flat_prefers_name() {
        let raw = json!({"name": "Short", "display_name": "Long Form"});
        assert_eq!(normalize_author(&raw).name, "Short");
    }

    #[test]
    fn test_nested_with_empty_display_name_falls_through() {
        let raw = json!({"author": {"display_name": ""}, "display_name": "Fallback"});
        assert_eq!(normalize_author(&raw).name, "Fallback");

        let raw = json!({"author": {"display_name": ""}});
        assert_eq!(normalize_author(&raw).name, "Unknown");
    }

    #[test]
    fn test_record_defaults() {
        let paper = normalize_record(&json!({"id": "W1"}));
        assert_eq!(paper.id, "W1");
        assert_eq!(paper.title, "");
        assert_eq!(paper.cited_by_count, 0);
        assert_eq!(paper.source, "OpenAlex");
        assert!(paper.authors.is_empty());
    }

    #[test]
    fn test_id_falls_back_to_doi_then_bare_string() {
        let paper = normalize_record(&json!({"doi": "10.1/abc"}));
        assert_eq!(paper.id, "10.1/abc");
        assert_eq!(paper.doi, "10.1/abc");

        let paper = normalize_record(&json!("W42"));
        assert_eq!(paper.id, "W42");
        assert_eq!(paper.source, "OpenAlex");

        assert_eq!(normalize_record(&Value::Null).id, "");
    }

    #[test]
    fn test_alternate_title_and_abstract_fields() {
        let paper = normalize_record(&json!({
            "display_name": "Alt Title",
            "summary": "Alt summary"
        }));
        assert_eq!(paper.title, "Alt Title");
        assert_eq!(paper.r#abstract, "Alt summary");
    }

    #[test]
    fn test_inverted_index_abstract() {
        let paper = normalize_record(&json!({
            "abstract_inverted_index": {"world": [1], "hello": [0], "again": [3], "hello,": [2]}
        }));
        assert_eq!(paper.r#abstract, "hello world hello, again");
    }

    #[test]
    fn test_authors_preferred_over_authorships() {
        let paper = normalize_record(&json!({
            "authors": [{"name": "From Authors"}],
            "authorships": [{"author": {"display_name": "From Authorships"}}]
        }));
        assert_eq!(paper.authors, vec![Author::new("From Authors")]);
    }

    #[test]
    fn test_non_array_authors_ignored() {
        let paper = normalize_record(&json!({
            "authors": "not a list",
            "authorships": [{"author": {"display_name": "A. One"}}]
        }));
        assert_eq!(paper.authors, vec![Author::new("A. One")]);
    }

    #[test]
    fn test_cited_by_count_variants() {
        assert_eq!(normalize_record(&json!({"cited_by_count": 17})).cited_by_count, 17);
        assert_eq!(normalize_record(&json!({"cited_by_count": 3.9})).cited_by_count, 3);
        assert_eq!(normalize_record(&json!({"cited_by_count": -2})).cited_by_count, 0);
        assert_eq!(normalize_record(&json!({"cited_by_count": "12"})).cited_by_count, 0);
    }

    #[test]
    fn test_numeric_id_rendered() {
        assert_eq!(normalize_record(&json!({"id": 1234})).id, "1234");
    }
}
