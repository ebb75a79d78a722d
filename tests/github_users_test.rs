//! Integration tests for the GitHub profile lookup with a mocked API.

use std::time::Duration;

use changes::error::GitHubError;
use changes::github::{GitHubUsers, ProfileLookup};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A user search response with one item per login.
fn search_response(logins: &[&str]) -> Value {
    let items: Vec<Value> = logins
        .iter()
        .enumerate()
        .map(|(id, login)| {
            json!({
                "login": login,
                "id": id + 1,
                "html_url": format!("https://github.com/{}", login),
                "type": "User",
                "score": 1.0
            })
        })
        .collect();

    json!({
        "total_count": logins.len(),
        "incomplete_results": false,
        "items": items
    })
}

fn users(server: &MockServer, timeout: Duration) -> GitHubUsers {
    GitHubUsers::with_base_uri(server.uri(), timeout)
}

#[tokio::test]
async fn test_single_match_returns_profile_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .and(query_param("q", "mail@maxantoni.de"))
        .and(query_param("in", "email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(&["mantoni"])))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = users(&server, Duration::from_secs(5));
    let homepage = lookup.homepage("mail@maxantoni.de").await.unwrap();

    assert_eq!(homepage.as_deref(), Some("https://github.com/mantoni"));
}

#[tokio::test]
async fn test_no_match_returns_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(&[])))
        .mount(&server)
        .await;

    let lookup = users(&server, Duration::from_secs(5));

    assert_eq!(lookup.homepage("nobody@example.com").await.unwrap(), None);
}

#[tokio::test]
async fn test_ambiguous_match_returns_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_response(&["mantoni", "mantoni-bot"])),
        )
        .mount(&server)
        .await;

    let lookup = users(&server, Duration::from_secs(5));

    assert_eq!(lookup.homepage("mail@maxantoni.de").await.unwrap(), None);
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "documentation_url": "https://docs.github.com/rest/search/search#search-users"
        })))
        .mount(&server)
        .await;

    let lookup = users(&server, Duration::from_secs(5));
    let result = lookup.homepage("mail@maxantoni.de").await;

    assert!(matches!(result, Err(GitHubError::Request(_))));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = users(&server, Duration::from_secs(5));
    let result = lookup.homepage("mail@maxantoni.de").await;

    assert!(matches!(result, Err(GitHubError::Request(_))));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_response(&["mantoni"]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let lookup = users(&server, Duration::from_millis(200));
    let result = lookup.homepage("mail@maxantoni.de").await;

    assert!(matches!(result, Err(GitHubError::Timeout(t)) if t == Duration::from_millis(200)));
}
