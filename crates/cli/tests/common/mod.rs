//! Shared test utilities for curator CLI integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Mount the metadata calls every command makes on a mock cluster.
//!
//! Invariants / Assumptions:
//! - `CURATOR_*` variables from the host never reach the child process.
//! - Retries are disabled so every mock sees exactly the calls a test makes.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
pub use serde_json::{Value, json};
pub use wiremock::matchers::{method, path, query_param};
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TASK_ID: &str = "node-a:100";

/// Returns a hermetic `curator` command for integration testing.
pub fn curator_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("curator");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("CURATOR_MAX_RETRIES", "0");

    for var in [
        "CURATOR_HOSTS",
        "CURATOR_USERNAME",
        "CURATOR_PASSWORD",
        "CURATOR_API_KEY",
        "CURATOR_TIMEOUT",
        "CURATOR_SKIP_VERIFY",
        "CURATOR_CA_CERTS",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }

    cmd
}

/// Write `contents` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write test file");
    path
}

/// A client config file pointing at `hosts`.
pub fn client_config(dir: &Path, hosts: &str) -> PathBuf {
    write_file(
        dir,
        "curator.yml",
        &format!("client:\n  hosts: {hosts}\n  request_timeout: 5\nlogging:\n  loglevel: INFO\n"),
    )
}

/// Mount `GET /`, `GET /_settings` and `GET /_cat/indices` for `(name, status, docs)` rows.
pub async fn mount_cluster(server: &MockServer, rows: &[(&str, &str, u64)]) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "node-a",
            "cluster_name": "test",
            "version": { "number": "8.13.0" }
        })))
        .mount(server)
        .await;

    let mut settings = serde_json::Map::new();
    for (i, (name, _, _)) in rows.iter().enumerate() {
        let created = 1_704_067_200_000u64 + i as u64 * 86_400_000;
        settings.insert(
            name.to_string(),
            json!({ "settings": { "index": {
                "creation_date": created.to_string(),
                "number_of_replicas": "1",
                "number_of_shards": "1"
            } } }),
        );
    }
    Mock::given(method("GET"))
        .and(path("/_settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Object(settings)))
        .mount(server)
        .await;

    let cat: Vec<Value> = rows
        .iter()
        .map(|(name, status, docs)| {
            json!({
                "index": name, "health": "green", "status": status,
                "docs.count": docs.to_string(), "store.size": "2048",
                "pri": "1", "rep": "1"
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path("/_cat/indices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(cat)))
        .mount(server)
        .await;
}

/// Mount `PUT /{target}/_settings` answering with `status`, expected `calls` times.
pub async fn mount_put_settings(server: &MockServer, target: &str, status: u16, calls: u64) {
    Mock::given(method("PUT"))
        .and(path(format!("/{target}/_settings")))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "acknowledged": true })))
        .expect(calls)
        .mount(server)
        .await;
}

/// Mount `POST /_reindex` answering with [`TASK_ID`], expected `calls` times.
pub async fn mount_dispatch(server: &MockServer, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/_reindex"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "task": TASK_ID })))
        .expect(calls)
        .mount(server)
        .await;
}

/// Mount `GET /_tasks/{TASK_ID}`.
pub async fn mount_task(server: &MockServer, completed: bool, total: i64) {
    let body = if completed {
        json!({
            "completed": true,
            "task": { "node": "node-a", "id": 100, "action": "indices:data/write/reindex" },
            "response": { "total": total, "created": total, "failures": [] }
        })
    } else {
        json!({
            "completed": false,
            "task": { "node": "node-a", "id": 100, "action": "indices:data/write/reindex" }
        })
    };
    Mock::given(method("GET"))
        .and(path(format!("/_tasks/{TASK_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount `HEAD /{name}` (found) and `HEAD /_alias/{name}` (missing).
pub async fn mount_dest_exists(server: &MockServer, name: &str) {
    Mock::given(method("HEAD"))
        .and(path(format!("/{name}")))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
    Mock::given(method("HEAD"))
        .and(path(format!("/_alias/{name}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}
