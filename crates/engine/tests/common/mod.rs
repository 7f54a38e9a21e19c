//! Shared mock-cluster helpers for engine integration tests.
//!
//! # Invariants
//! - Every helper mounts mocks on the server it is given; nothing is global.
//! - Clients never retry, so each mock sees exactly the calls a test makes,
//!   except those from [`retrying_index_list`], which keep the default budget.

#![allow(dead_code)]

pub use curator_client::EsClient;
pub use serde_json::{Value, json};
pub use wiremock::matchers::{method, path, query_param};
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use curator_engine::IndexList;

pub const TASK_ID: &str = "node-a:100";

/// Client pointed at the mock server, no credentials, no retries.
pub fn mock_client(server: &MockServer) -> EsClient {
    EsClient::builder()
        .base_url(server.uri())
        .max_retries(0)
        .build()
        .expect("client builds")
}

/// `GET /_settings` body for `(name, creation_date_ms)` pairs.
pub fn settings_body(indices: &[(&str, u64)]) -> Value {
    let mut body = serde_json::Map::new();
    for (name, created) in indices {
        body.insert(
            name.to_string(),
            json!({ "settings": { "index": {
                "creation_date": created.to_string(),
                "number_of_replicas": "1",
                "number_of_shards": "1",
                "uuid": format!("uuid-{name}")
            } } }),
        );
    }
    Value::Object(body)
}

/// `_cat/indices` rows for `(name, status, docs)` triples.
pub fn cat_body(rows: &[(&str, &str, u64)]) -> Value {
    Value::Array(
        rows.iter()
            .map(|(name, status, docs)| {
                json!({
                    "index": name, "health": "green", "status": status,
                    "docs.count": docs.to_string(), "store.size": "1024",
                    "pri": "1", "rep": "1"
                })
            })
            .collect(),
    )
}

/// Mount the two metadata calls `IndexList::new` makes.
pub async fn mount_indices(server: &MockServer, rows: &[(&str, &str, u64)]) {
    let settings: Vec<(&str, u64)> = rows
        .iter()
        .enumerate()
        .map(|(i, (name, _, _))| (*name, 1_704_067_200_000 + i as u64 * 86_400_000))
        .collect();

    Mock::given(method("GET"))
        .and(path("/_settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(settings_body(&settings)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/_cat/indices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cat_body(rows)))
        .mount(server)
        .await;
}

/// A live `IndexList` read from the mock server.
pub async fn index_list(server: &MockServer, rows: &[(&str, &str, u64)]) -> IndexList {
    mount_indices(server, rows).await;
    IndexList::new(mock_client(server))
        .await
        .expect("index list builds")
}

/// Like [`index_list`], but the client keeps its default retry budget.
pub async fn retrying_index_list(server: &MockServer, rows: &[(&str, &str, u64)]) -> IndexList {
    mount_indices(server, rows).await;
    let client = EsClient::builder()
        .base_url(server.uri())
        .build()
        .expect("client builds");
    IndexList::new(client).await.expect("index list builds")
}

/// Mount `POST /_reindex` answering with [`TASK_ID`].
pub async fn mount_dispatch(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/_reindex"))
        .and(query_param("wait_for_completion", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "task": TASK_ID })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Mount `GET /_tasks/{TASK_ID}` answering with `body`.
pub async fn mount_task(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/_tasks/{TASK_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// A finished reindex task that processed `total` documents.
pub fn completed_task(total: i64) -> Value {
    json!({
        "completed": true,
        "task": { "node": "node-a", "id": 100, "action": "indices:data/write/reindex" },
        "response": { "total": total, "created": total, "failures": [] }
    })
}

/// Mount existence checks for `name` as an index and as an alias.
pub async fn mount_exists(server: &MockServer, name: &str, index: bool, alias: bool, calls: u64) {
    let status = |found: bool| if found { 200 } else { 404 };
    Mock::given(method("HEAD"))
        .and(path(format!("/{name}")))
        .respond_with(ResponseTemplate::new(status(index)))
        .expect(calls)
        .mount(server)
        .await;
    Mock::given(method("HEAD"))
        .and(path(format!("/_alias/{name}")))
        .respond_with(ResponseTemplate::new(status(alias)))
        .expect(calls)
        .mount(server)
        .await;
}
