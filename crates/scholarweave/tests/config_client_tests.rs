//! Configuration and client tests.
//!
//! Tests actual behavior, not constants.

use std::time::Duration;

use scholarweave::client::{ApiClient, paper_path};
use scholarweave::config::Config;

// =============================================================================
// Config Behavior Tests
// =============================================================================

#[test]
fn test_config_override_keeps_timeouts() {
    let config = Config::default().with_api_base_url("https://api.example.org/api/v1/").unwrap();
    assert_eq!(config.api_base_url, "https://api.example.org/api/v1");
    assert_eq!(config.request_timeout, Duration::from_secs(10));
}

#[test]
fn test_config_override_rejects_invalid_url() {
    assert!(Config::default().with_api_base_url("localhost:3000").is_err());
}

#[test]
fn test_testing_config_polls_quickly() {
    let config = Config::for_testing("http://127.0.0.1:9999");
    assert!(config.health_interval < Duration::from_secs(1));
    assert!(config.request_timeout < Config::default().request_timeout);
}

// =============================================================================
// Client Behavior Tests
// =============================================================================

#[test]
fn test_client_creation_succeeds() {
    assert!(ApiClient::new(&Config::default()).is_ok());
}

#[test]
fn test_client_uses_configured_base_url() {
    let config = Config::new("http://scholar.internal:8080/api/v1").unwrap();
    let client = ApiClient::new(&config).unwrap();
    assert_eq!(client.base_url(), "http://scholar.internal:8080/api/v1");
}

#[test]
fn test_paper_path_plain_ids_unchanged() {
    assert_eq!(paper_path("W2741809807"), "/papers/W2741809807");
}

#[test]
fn test_paper_path_doi_is_one_segment() {
    let path = paper_path("10.1038/nature12373");
    assert_eq!(path.matches('/').count(), 2);
}
