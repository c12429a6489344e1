//! Markdown rendering of the two pages.

use crate::components::{HealthState, SearchBox};
use crate::models::Paper;
use crate::pages::{DetailView, SearchPage, SearchView};
use crate::router::Route;

use super::{PaperCard, format_health_markdown};

/// Number of placeholder cards in the loading skeleton.
const SKELETON_CARDS: usize = 6;

const SKELETON_LINE: &str = "░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░";

/// Render the whole search page: header, health indicator, search input and body.
#[must_use]
pub fn format_search_page(page: &SearchPage, health: Option<&HealthState>) -> String {
    let mut output = String::from("# ScholarWeave\n\n");
    output.push_str("Search and discover academic papers from OpenAlex\n\n");

    if let Some(state) = health {
        output.push_str(&format_health_markdown(state));
        output.push('\n');
    }

    output.push_str(&format_search_box(page.search_box()));
    output.push('\n');
    output.push_str(&format_search_view(&page.view()));
    output.push_str("\nPowered by OpenAlex (https://openalex.org)\n");

    output
}

/// Render the search input line.
#[must_use]
pub fn format_search_box(search_box: &SearchBox) -> String {
    let text = if search_box.query().is_empty() {
        SearchBox::PLACEHOLDER
    } else {
        search_box.query()
    };
    format!("> {text} [{}]\n", search_box.submit_label())
}

/// Render the body of the search page for one view.
#[must_use]
pub fn format_search_view(view: &SearchView<'_>) -> String {
    match view {
        SearchView::Loading => {
            let mut output = String::new();
            for _ in 0..SKELETON_CARDS {
                output.push_str(SKELETON_LINE);
                output.push_str("\n\n");
            }
            output
        }
        SearchView::Error(message) => format!("**Error**\n{message}\n"),
        SearchView::Empty { query } => {
            format!("No papers found for \"{query}\"\nTry adjusting your search query\n")
        }
        SearchView::Initial => "Enter a search term to get started\n\
             Search by title, author, topic, or keywords\n"
            .to_string(),
        SearchView::Results { query, papers, total } => format_results(query, papers, *total),
    }
}

fn format_results(query: &str, papers: &[Paper], total: Option<u64>) -> String {
    let mut output = format!("# Results for \"{}\" ({} papers)\n\n", query, papers.len());

    if let Some(total) = total.filter(|t| *t > papers.len() as u64) {
        output.push_str(&format!("_{total} matching works upstream_\n\n"));
    }

    for (i, paper) in papers.iter().enumerate() {
        output.push_str(&PaperCard::new(paper).render(i + 1));
        output.push_str("\n---\n\n");
    }

    output
}

/// Render the detail page for one view.
#[must_use]
pub fn format_detail_markdown(view: &DetailView<'_>) -> String {
    let back = Route::Search;
    match view {
        DetailView::Loading => "Loading paper...\n".to_string(),
        DetailView::Error(message) => format!("{message}\n[Back to search]({back})\n"),
        DetailView::NotFound => "Paper not found.\n".to_string(),
        DetailView::Paper(paper) => format_paper_detail(paper),
    }
}

/// Render the full paper view.
#[must_use]
pub fn format_paper_detail(paper: &Paper) -> String {
    let mut output = format!("[← Back to search]({})\n\n", Route::Search);

    output.push_str(&format!("# {}\n\n", paper.title_or_default()));

    if !paper.authors.is_empty() {
        output.push_str(&format!("{}\n\n", paper.author_names()));
    }

    let doi_url = paper.doi_url();
    if let Some(url) = &doi_url {
        output.push_str(&format!("**DOI**: [{}]({url})\n\n", paper.doi));
    }

    output.push_str(&format!("{}\n\n", paper.abstract_or_default()));
    output.push_str(&format!("**Cited by**: {}\n", paper.cited_by_count));
    output.push_str(&format!("**Source**: {}\n\n", paper.source));
    output.push_str(&format!("[Open DOI]({})\n", doi_url.as_deref().unwrap_or("#")));

    output
}
