//! Credential handling on outgoing requests.
//!
//! # Invariants
//! - Basic credentials use the standard `Authorization: Basic` header
//! - API keys are sent as `Authorization: ApiKey <key>`

mod common;

use common::*;
use secrecy::SecretString;
use wiremock::matchers::{basic_auth, header, method, path};

#[tokio::test]
async fn test_basic_auth_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(basic_auth("elastic", "changeme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("info.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = EsClient::builder()
        .base_url(mock_server.uri())
        .auth_strategy(AuthStrategy::Basic {
            username: "elastic".to_string(),
            password: Some(SecretString::new("changeme".to_string().into())),
        })
        .build()
        .unwrap();

    client.info().await.unwrap();
}

#[tokio::test]
async fn test_api_key_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("Authorization", "ApiKey dGVzdDprZXk="))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("info.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = EsClient::builder()
        .base_url(mock_server.uri())
        .auth_strategy(AuthStrategy::ApiKey {
            key: SecretString::new("dGVzdDprZXk=".to_string().into()),
        })
        .build()
        .unwrap();

    client.info().await.unwrap();
}

#[tokio::test]
async fn test_unauthorized_is_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let err = mock_client(&mock_server).info().await.unwrap_err();
    assert!(err.is_auth_error());
    assert_eq!(err.status(), Some(401));
}
