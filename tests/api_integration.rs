//! Integration tests using mock HTTP server
//!
//! Tests the full flow: config → TursoClient → HTTP requests → typed
//! models, plus pagination draining and the polling watcher.

use serde_json::json;
use tempfile::TempDir;
use turso_platform::api::models::{CreateDatabaseRequest, MemberRole, TokenAuthorization};
use turso_platform::api::TursoClient;
use turso_platform::config::TursoConfig;
use turso_platform::watch::{SnapshotStore, WatchEvent, Watcher};
use turso_platform::Error;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(uri: &str) -> TursoClient {
    let mut config = TursoConfig::new("test-token", "acme").with_base_url(uri);
    config.http.max_retries = 0;
    config.http.rate_limit = None;
    TursoClient::new(&config).unwrap()
}

// ============================================================================
// Databases
// ============================================================================

#[tokio::test]
async fn test_list_databases_unwraps_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/acme/databases"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "databases": [
                {"Name": "prod", "DbId": "d1", "Hostname": "prod.turso.io", "group": "default"},
                {"Name": "staging", "DbId": "d2", "Hostname": "staging.turso.io", "group": "default"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let databases = client.list_databases(None, None).await.unwrap();

    assert_eq!(databases.len(), 2);
    assert_eq!(databases[0].name, "prod");
    assert_eq!(databases[1].hostname, "staging.turso.io");
}

#[tokio::test]
async fn test_list_databases_forwards_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/acme/databases"))
        .and(query_param("group", "default"))
        .and(query_param("schema", "parent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"databases": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let databases = client
        .list_databases(Some("default"), Some("parent"))
        .await
        .unwrap();
    assert!(databases.is_empty());
}

#[tokio::test]
async fn test_create_database_sends_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/organizations/acme/databases"))
        .and(body_json(json!({"name": "scratch", "group": "default"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "database": {"Name": "scratch", "DbId": "d9", "Hostname": "scratch.turso.io"}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let database = client
        .create_database(CreateDatabaseRequest::new("scratch", "default"))
        .await
        .unwrap();
    assert_eq!(database.db_id, "d9");
}

#[tokio::test]
async fn test_get_database_without_envelope() {
    let mock_server = MockServer::start().await;

    // Some endpoints answer with the bare entity
    Mock::given(method("GET"))
        .and(path("/organizations/acme/databases/prod"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"Name": "prod", "Hostname": "prod.turso.io"})),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let database = client.get_database("prod").await.unwrap();
    assert_eq!(database.name, "prod");
}

#[tokio::test]
async fn test_api_error_surfaces_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/acme/databases/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "database not found"})),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client.get_database("missing").await.unwrap_err();

    assert!(matches!(err, Error::Api { status: 404, .. }));
    assert!(err.to_string().contains("database not found"));
}

// ============================================================================
// Members and tokens
// ============================================================================

#[tokio::test]
async fn test_add_member_sends_role() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/organizations/acme/members"))
        .and(body_json(json!({"username": "alice", "role": "admin"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "member": {"username": "alice", "role": "admin"}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let member = client.add_member("alice", MemberRole::Admin).await.unwrap();
    assert_eq!(member.role, MemberRole::Admin);
}

#[tokio::test]
async fn test_list_database_tokens_unwraps_tokens_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/acme/databases/prod/auth/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tokens": [
                {"id": "tok-1", "name": "ci"},
                {"id": "tok-2", "name": "backup"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let tokens = client.list_database_tokens("prod").await.unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0]["name"], "ci");
    assert_eq!(tokens[1]["id"], "tok-2");
}

#[tokio::test]
async fn test_create_database_token_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/organizations/acme/databases/prod/auth/tokens"))
        .and(query_param("expiration", "2w"))
        .and(query_param("authorization", "read-only"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jwt": "eyJ..."})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let token = client
        .create_database_token("prod", Some("2w"), Some(TokenAuthorization::ReadOnly), None)
        .await
        .unwrap();
    assert_eq!(token.jwt, "eyJ...");
}

// ============================================================================
// Locations
// ============================================================================

#[tokio::test]
async fn test_list_locations_flattens_and_sorts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "locations": {"nrt": "Tokyo, Japan", "ams": "Amsterdam, Netherlands", "lhr": "London, England"}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let locations = client.list_locations().await.unwrap();

    let codes: Vec<&str> = locations.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, ["ams", "lhr", "nrt"]);
    assert_eq!(locations[0].name, "Amsterdam, Netherlands");
}

// ============================================================================
// Audit log pagination
// ============================================================================

fn log_entries(count: usize, prefix: &str) -> Vec<serde_json::Value> {
    (0..count)
        .map(|i| json!({"code": format!("{prefix}-{i}"), "message": "created", "author": "alice"}))
        .collect()
}

#[tokio::test]
async fn test_audit_logs_drain_all_pages() {
    let mock_server = MockServer::start().await;

    // Page 1 is full, page 2 is short, so collection stops after two calls
    Mock::given(method("GET"))
        .and(path("/organizations/acme/audit-logs"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"audit_logs": log_entries(100, "p1")})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations/acme/audit-logs"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"audit_logs": log_entries(17, "p2")})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let entries = client.audit_logs().await.unwrap();

    assert_eq!(entries.len(), 117);
    assert_eq!(entries[0].code, "p1-0");
    assert_eq!(entries[116].code, "p2-16");
}

// ============================================================================
// Watcher
// ============================================================================

#[tokio::test]
async fn test_watcher_emits_created_events_across_polls() {
    let mock_server = MockServer::start().await;

    // First poll sees one database, later polls see two
    Mock::given(method("GET"))
        .and(path("/organizations/acme/databases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "databases": [{"Name": "prod", "Hostname": "prod.turso.io"}]
        })))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations/acme/databases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "databases": [
                {"Name": "prod", "Hostname": "prod.turso.io"},
                {"Name": "analytics", "Hostname": "analytics.turso.io"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::from_file(dir.path().join("watch.json")).unwrap();
    let client = test_client(&mock_server.uri());
    let watcher = Watcher::new(client, store, WatchEvent::DatabaseCreated);

    // First observation seeds the snapshot without emitting
    assert!(watcher.poll().await.unwrap().is_empty());

    let events = watcher.poll().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "database.created");
    assert_eq!(events[0]["database"]["Name"], "analytics");

    // Nothing new on the next cycle
    assert!(watcher.poll().await.unwrap().is_empty());
}
