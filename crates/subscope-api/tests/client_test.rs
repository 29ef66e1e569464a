// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use subscope_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .and(body_json(json!({
            "email": "user@example.com",
            "password": "hunter22"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Login successful", "token": "abc" })),
        )
        .mount(&server)
        .await;

    let resp = client.login("user@example.com", "hunter22").await.unwrap();
    assert_eq!(resp.message, "Login successful");
}

#[tokio::test]
async fn test_login_failure_detail() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "detail": "Incorrect email or password" })),
        )
        .mount(&server)
        .await;

    let result = client.login("user@example.com", "wrong1pw").await;

    // 401 always maps to Unauthorized, regardless of body.
    assert!(
        matches!(result, Err(Error::Unauthorized)),
        "expected Unauthorized, got: {result:?}"
    );
}

#[tokio::test]
async fn test_signup_conflict_detail() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/signup"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "detail": "Email already registered" })),
        )
        .mount(&server)
        .await;

    let result = client.signup("user@example.com", "hunter22").await;

    match result {
        Err(Error::Api { status, ref detail }) => {
            assert_eq!(status, 409);
            assert_eq!(detail, "Email already registered");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Search ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_search_happy_path() {
    let (server, client) = setup().await;

    let body = json!({
        "domain": "example.com",
        "count": 3,
        "regular": ["mail.example.com", "www.example.com"],
        "wildcards": ["*.dev.example.com"]
    });

    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .and(query_param("domain", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let result = client.search("example.com").await.unwrap();

    assert_eq!(result.domain, "example.com");
    assert_eq!(result.count, 3);
    assert_eq!(result.regular.len(), 2);
    assert_eq!(result.wildcards, vec!["*.dev.example.com"]);
}

#[tokio::test]
async fn test_search_missing_lists_default_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .and(query_param("domain", "empty.com"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "domain": "empty.com", "count": 0 })),
        )
        .mount(&server)
        .await;

    let result = client.search("empty.com").await.unwrap();

    assert_eq!(result.count, 0);
    assert!(result.regular.is_empty());
    assert!(result.wildcards.is_empty());
}

// ── Subdomain pages ─────────────────────────────────────────────────

#[tokio::test]
async fn test_subdomains_query_params() {
    let (server, client) = setup().await;

    let body = json!({
        "total_subdomains": 25,
        "sub_domains": [
            {
                "name": "api.example.com",
                "isActive": true,
                "createdDate": "2024-03-01T12:00:00Z"
            },
            {
                "name": "old.example.com",
                "isActive": false,
                "createdDate": "2023-11-20T08:30:00Z"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/v1/domains/7"))
        .and(query_param("skip", "10"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let page = client.subdomains(7, 10, 10).await.unwrap();

    assert_eq!(page.total_subdomains, 25);
    assert_eq!(page.sub_domains.len(), 2);
    assert_eq!(page.sub_domains[0].name, "api.example.com");
    assert!(page.sub_domains[0].is_active);
    assert!(!page.sub_domains[1].is_active);
}

#[tokio::test]
async fn test_subdomains_session_expired() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/domains/7"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.subdomains(7, 0, 10).await;

    assert!(matches!(result, Err(Error::Unauthorized)));
    assert!(result.unwrap_err().is_session_expired());
}

// ── Profile ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_profile_me() {
    let (server, client) = setup().await;

    let body = json!({
        "id": 42,
        "email": "user@example.com",
        "createdDate": "2024-01-15T09:00:00Z",
        "domains": [
            { "id": 7, "domain": "example.com", "isActive": true,
              "createdDate": "2024-02-01T00:00:00Z" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/v1/profile/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let profile = client.me().await.unwrap();

    assert_eq!(profile.id, 42);
    assert_eq!(profile.email, "user@example.com");
    assert_eq!(profile.domains.len(), 1);
    assert_eq!(profile.domains[0].domain, "example.com");
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn test_error_non_json_body_falls_back() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let result = client.search("example.com").await;

    match result {
        Err(Error::Api { status, ref detail }) => {
            assert_eq!(status, 502);
            assert_eq!(detail, "the server is unreachable at the moment");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_malformed_success_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.search("example.com").await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => {
            assert_eq!(body, "not json");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_health() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "server_status": "ok", "database": "connected" })),
        )
        .mount(&server)
        .await;

    let health = client.health().await.unwrap();

    assert_eq!(health.server_status, "ok");
    assert_eq!(health.database, "connected");
}
