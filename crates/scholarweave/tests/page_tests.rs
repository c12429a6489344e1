//! Page and component tests against a mocked backend.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scholarweave::client::ApiClient;
use scholarweave::components::{HealthIndicator, HealthState, check_health};
use scholarweave::config::Config;
use scholarweave::formatters;
use scholarweave::pages::{DetailPage, DetailView, SearchPage, SearchView};

fn setup_client(mock_server: &MockServer) -> ApiClient {
    let config = Config::for_testing(&mock_server.uri());
    ApiClient::new(&config).unwrap()
}

async fn mount_health(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "version": "1.0",
            "timestamp": "2024-01-01T00:00:00Z",
            "services": {"api": "up", "openalex": "up"}
        })))
        .mount(mock_server)
        .await;
}

// =============================================================================
// Search page
// =============================================================================

#[tokio::test]
async fn test_search_renders_minimal_openalex_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/papers/search"))
        .and(query_param("q", "quantum"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "id": "W1",
                "title": "Q",
                "authorships": [{"author": {"display_name": "A. One"}}]
            }]
        })))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let mut page = SearchPage::new();
    page.search_box_mut().set_query("quantum");
    assert!(page.submit(&client).await);

    let output = formatters::format_search_view(&page.view());
    assert!(output.contains("# Results for \"quantum\" (1 papers)"));
    assert!(output.contains("## 1. Q"));
    assert!(output.contains("A. One"));
    assert!(output.contains("Cited by: 0"));
    assert!(output.contains("**OpenAlex**"));
    assert!(output.contains("Open: /papers/W1"));
}

#[tokio::test]
async fn test_search_with_empty_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/papers/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let mut page = SearchPage::new();
    page.search(&client, "zzzz").await;

    assert_eq!(page.view(), SearchView::Empty { query: "zzzz" });
}

#[tokio::test]
async fn test_whitespace_query_is_not_submitted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/papers/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let mut page = SearchPage::new();
    page.search_box_mut().set_query("   ");

    assert!(!page.submit(&client).await);
    assert_eq!(page.view(), SearchView::Initial);
}

#[tokio::test]
async fn test_network_error_shows_banner() {
    let client = ApiClient::new(&Config::for_testing("http://127.0.0.1:1")).unwrap();
    let expected = client.search("quantum").await.unwrap_err().user_message();

    let mut page = SearchPage::new();
    page.search(&client, "quantum").await;

    assert!(page.has_searched());
    assert!(page.results().is_empty());
    assert!(!page.is_loading());
    assert_eq!(page.view(), SearchView::Error(&expected));

    let banner = formatters::format_search_view(&page.view());
    assert!(banner.starts_with("**Error**"));
    assert!(banner.contains(&expected), "banner {banner:?} lacks {expected:?}");
}

#[tokio::test]
async fn test_null_count_metadata_keeps_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/papers/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": "W1", "title": "Q"}],
            "meta": {"count": null}
        })))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let mut page = SearchPage::new();
    page.search(&client, "quantum").await;

    match page.view() {
        SearchView::Results { papers, total, .. } => {
            assert_eq!(papers.len(), 1);
            assert_eq!(papers[0].title, "Q");
            assert_eq!(total, None);
        }
        other => panic!("unexpected view: {other:?}"),
    }
}

#[tokio::test]
async fn test_health_with_null_services_is_healthy() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "version": null,
            "timestamp": "2024-01-01T00:00:00Z",
            "services": null
        })))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let HealthState::Healthy(health) = check_health(&client).await else {
        panic!("expected healthy state");
    };
    assert_eq!(health.status, "ok");
    assert!(health.version.is_empty());
    assert!(health.services.api.is_empty());
}

#[tokio::test]
async fn test_select_then_load_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/papers/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": "https://openalex.org/W7", "title": "Seven"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/papers/https%3A%2F%2Fopenalex.org%2FW7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "https://openalex.org/W7",
            "title": "Seven",
            "doi": "https://doi.org/10.7/seven",
            "authors": [{"name": "S. Even"}],
            "cited_by_count": 7,
            "source": "Crossref"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let mut page = SearchPage::new();
    page.search(&client, "seven").await;

    let scholarweave::Route::Paper { id } = page.select(0).unwrap() else {
        panic!("expected paper route");
    };
    assert_eq!(id, "https://openalex.org/W7");

    let mut detail = DetailPage::new(Some(id));
    detail.load(&client).await;

    let output = formatters::format_detail_markdown(&detail.view());
    assert!(output.contains("# Seven"));
    assert!(output.contains("S. Even"));
    assert!(output.contains("**DOI**: [https://doi.org/10.7/seven](https://doi.org/10.7/seven)"));
    assert!(output.contains("**Cited by**: 7"));
    assert!(output.contains("**Source**: Crossref"));
}

// =============================================================================
// Detail page
// =============================================================================

#[tokio::test]
async fn test_detail_not_found_shows_error_and_back_link() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/papers/W404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Paper not found"})))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let mut detail = DetailPage::new(Some("W404".to_string()));
    detail.load(&client).await;

    assert_eq!(detail.view(), DetailView::Error("Paper not found"));
    let output = formatters::format_detail_markdown(&detail.view());
    assert!(output.contains("[Back to search](/)"));
}

#[tokio::test]
async fn test_detail_without_id_never_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let mut detail = DetailPage::new(None);
    detail.load(&client).await;

    assert_eq!(detail.view(), DetailView::NotFound);
}

#[tokio::test]
async fn test_detail_set_id_refetches_only_on_change() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/papers/W1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "W1", "title": "One"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/papers/W2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "W2", "title": "Two"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let mut detail = DetailPage::new(Some("W1".to_string()));
    detail.load(&client).await;
    detail.set_id(&client, "W1").await;
    detail.set_id(&client, "W2").await;

    let DetailView::Paper(paper) = detail.view() else {
        panic!("expected paper view");
    };
    assert_eq!(paper.title, "Two");
}

// =============================================================================
// Health indicator
// =============================================================================

#[tokio::test]
async fn test_check_health_renders_statuses() {
    let mock_server = MockServer::start().await;
    mount_health(&mock_server).await;

    let client = setup_client(&mock_server);
    let state = check_health(&client).await;

    let output = formatters::format_health_markdown(&state);
    assert!(output.contains("**System Status: ok**"));
    assert!(output.contains("Version: 1.0"));
    assert!(output.contains("API: up"));
    assert!(output.contains("OpenAlex: up"));
    assert!(output.contains("Last checked: "));
}

#[tokio::test]
async fn test_check_health_error_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/health"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "maintenance"})))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    assert_eq!(check_health(&client).await, HealthState::Error("maintenance".to_string()));
}

#[tokio::test]
async fn test_health_indicator_polls_until_dropped() {
    let mock_server = MockServer::start().await;
    mount_health(&mock_server).await;

    let client = Arc::new(setup_client(&mock_server));
    let mut indicator = HealthIndicator::mount(client, Duration::from_millis(50));

    let state = indicator.settled().await;
    assert!(matches!(state, HealthState::Healthy(_)));

    tokio::time::sleep(Duration::from_millis(300)).await;
    let polled = mock_server.received_requests().await.unwrap().len();
    assert!(polled >= 2, "expected repeated polling, saw {polled} requests");

    drop(indicator);
    tokio::time::sleep(Duration::from_millis(50)).await;
    let after_drop = mock_server.received_requests().await.unwrap().len();

    tokio::time::sleep(Duration::from_millis(300)).await;
    let later = mock_server.received_requests().await.unwrap().len();
    assert_eq!(after_drop, later);
}
