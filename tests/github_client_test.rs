use chrono::{TimeZone, Utc};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gitfolio::domain::errors::DomainError;
use gitfolio::domain::models::{GitHubConfig, SearchFilter};
use gitfolio::domain::ports::PortfolioSource;
use gitfolio::infrastructure::github::GitHubClient;

fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::new(GitHubConfig {
        username: "someone".to_string(),
        token: None,
        api_url: server.uri(),
        request_timeout_secs: 5,
    })
    .unwrap()
}

fn repo_json(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "owner": { "login": "someone" },
        "html_url": format!("https://github.com/someone/{name}"),
        "stargazers_count": 42,
        "language": "Rust",
        "description": "demo project",
        "updated_at": "2024-05-01T09:30:00Z"
    })
}

#[tokio::test]
async fn test_portfolio_aggregation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/someone/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![repo_json("demo")]))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/someone/demo/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Rust": 52_000,
            "Dockerfile": 300
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/someone/demo/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "commit": { "author": { "date": "2024-06-02T08:00:00Z" } } }
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .and(query_param("q", "repo:someone/demo type:pr"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "total_count": 7 })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let portfolio = client.get_portfolio("someone").await.unwrap();

    assert_eq!(portfolio.len(), 1);
    let entry = &portfolio[0];
    assert_eq!(entry.name, "demo");
    assert_eq!(entry.languages, vec!["Rust", "Dockerfile"]);
    assert_eq!(
        entry.last_commit,
        Some(Utc.with_ymd_and_hms(2024, 6, 2, 8, 0, 0).unwrap())
    );
    assert_eq!(entry.stars, 42);
    assert_eq!(entry.pull_requests, 7);
    assert_eq!(entry.url, "https://github.com/someone/demo");
}

#[tokio::test]
async fn test_commit_lookup_failure_falls_back_to_updated_at() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/someone/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![repo_json("empty-repo")]))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/someone/empty-repo/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    // GitHub answers 409 for empty repositories.
    Mock::given(method("GET"))
        .and(path("/repos/someone/empty-repo/commits"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "total_count": 0 })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let portfolio = client.get_portfolio("someone").await.unwrap();

    assert_eq!(portfolio.len(), 1);
    assert!(portfolio[0].languages.is_empty());
    assert_eq!(
        portfolio[0].last_commit,
        Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap())
    );
}

#[tokio::test]
async fn test_listing_failure_propagates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/someone/repos"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get_portfolio("someone").await.unwrap_err();
    assert!(matches!(err, DomainError::Upstream(_)));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_last_activity_reads_newest_event() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/someone/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "created_at": "2024-06-03T10:15:00Z" }
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert_eq!(
        client.get_last_activity("someone").await,
        Some(Utc.with_ymd_and_hms(2024, 6, 3, 10, 15, 0).unwrap())
    );
}

#[tokio::test]
async fn test_last_activity_fails_soft() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/someone/events"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(client.get_last_activity("someone").await.is_none());
}

#[tokio::test]
async fn test_last_activity_empty_feed_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/someone/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(client.get_last_activity("someone").await.is_none());
}

#[tokio::test]
async fn test_search_passes_combined_qualifiers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "cli language:rust user:someone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [ repo_json("cli-tool") ]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let results = client
        .search_repositories(&SearchFilter {
            name: Some("cli".to_string()),
            language: Some("rust".to_string()),
            username: Some("someone".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "cli-tool");
    assert_eq!(results[0].owner, "someone");
    assert_eq!(results[0].language.as_deref(), Some("Rust"));
    assert_eq!(results[0].description.as_deref(), Some("demo project"));
    assert_eq!(results[0].stars, 42);
}

#[tokio::test]
async fn test_token_sent_as_bearer_when_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/someone/events"))
        .and(header("Authorization", "Bearer ghp_test_token"))
        .and(header("User-Agent", "gitfolio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "created_at": "2024-06-03T10:15:00Z" }
        ])))
        .mount(&mock_server)
        .await;

    let client = GitHubClient::new(GitHubConfig {
        username: "someone".to_string(),
        token: Some("ghp_test_token".to_string()),
        api_url: mock_server.uri(),
        request_timeout_secs: 5,
    })
    .unwrap();

    // The mock only matches when the Authorization header is present.
    assert!(client.get_last_activity("someone").await.is_some());
}
