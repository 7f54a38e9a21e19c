//! Index metadata, existence and settings endpoint tests.
//!
//! # Invariants
//! - Settings and `_cat/indices` always include closed indices
//! - HEAD 404 means "does not exist", not an error
//! - Index lists in paths are comma-joined with each name encoded

mod common;

use common::*;
use curator_client::IndexState;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};

#[tokio::test]
async fn test_get_settings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_settings"))
        .and(query_param("expand_wildcards", "open,closed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("settings.json")))
        .mount(&mock_server)
        .await;

    let settings = mock_client(&mock_server).get_settings().await.unwrap();
    assert_eq!(settings.len(), 3);
    assert_eq!(
        settings["logs-2024.01.01"].creation_date,
        Some(1_704_067_200_000)
    );
    assert_eq!(settings["archive-2023"].number_of_replicas, Some(0));
    assert!(settings["archive-2023"].other.contains_key("verified_before_close"));
}

#[tokio::test]
async fn test_cat_indices() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_cat/indices"))
        .and(query_param("format", "json"))
        .and(query_param("bytes", "b"))
        .and(query_param("expand_wildcards", "open,closed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("cat_indices.json")))
        .mount(&mock_server)
        .await;

    let rows = mock_client(&mock_server).cat_indices().await.unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].docs_count, Some(120));
    assert_eq!(rows[2].status, Some(IndexState::Close));
    assert_eq!(rows[2].docs_count, None);
}

#[tokio::test]
async fn test_index_exists_true_and_false() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/present"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server);
    assert!(client.index_exists("present").await.unwrap());
    assert!(!client.index_exists("missing").await.unwrap());
}

#[tokio::test]
async fn test_alias_exists() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/_alias/current"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server);
    assert!(client.alias_exists("current").await.unwrap());
    // Unmatched requests get a 404 from wiremock.
    assert!(!client.alias_exists("other").await.unwrap());
}

#[tokio::test]
async fn test_index_exists_propagates_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/locked"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let err = mock_client(&mock_server)
        .index_exists("locked")
        .await
        .unwrap_err();
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn test_put_settings_joins_encoded_names() {
    let mock_server = MockServer::start().await;
    let settings = json!({ "index": { "number_of_replicas": 2 } });

    Mock::given(method("PUT"))
        .and(path("/logs-a,logs-b/_settings"))
        .and(body_json(&settings))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "acknowledged": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ack = mock_client(&mock_server)
        .put_settings(&["logs-a".to_string(), "logs-b".to_string()], &settings)
        .await
        .unwrap();
    assert!(ack.acknowledged);
}

#[tokio::test]
async fn test_put_settings_requires_indices() {
    let mock_server = MockServer::start().await;
    let err = mock_client(&mock_server)
        .put_settings(&[], &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidUrl(_)));
}

#[tokio::test]
async fn test_error_reason_is_extracted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/missing/_settings"))
        .respond_with(ResponseTemplate::new(404).set_body_json(load_fixture("index_not_found.json")))
        .mount(&mock_server)
        .await;

    let err = mock_client(&mock_server)
        .put_settings(&["missing".to_string()], &json!({}))
        .await
        .unwrap_err();
    match err {
        ClientError::ApiError { status, message, .. } => {
            assert_eq!(status, 404);
            assert_eq!(message, "index_not_found_exception: no such index [missing]");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
