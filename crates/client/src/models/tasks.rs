//! Task management models (`GET /_tasks/{id}`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `task` block of a task status document.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TaskInfo {
    #[serde(default)]
    pub action: String,
    pub node: Option<String>,
    pub id: Option<u64>,
    pub description: Option<String>,
    pub status: Option<Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// The `response` block, present once a task has finished.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TaskResponse {
    pub total: Option<i64>,
    #[serde(default)]
    pub failures: Vec<Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Status of an asynchronous server-side task.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TaskStatus {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub task: TaskInfo,
    pub response: Option<TaskResponse>,
    pub error: Option<Value>,
}

impl TaskStatus {
    /// Failure reported by a finished task: its `error` or non-empty `response.failures`.
    pub fn failure(&self) -> Option<String> {
        if let Some(error) = &self.error {
            return Some(error.to_string());
        }
        self.response
            .as_ref()
            .filter(|r| !r.failures.is_empty())
            .map(|r| Value::Array(r.failures.clone()).to_string())
    }
}
