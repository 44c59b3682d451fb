//! Task Types
//!
//! The backend owns tasks; the client only ever holds the collection it last
//! fetched. Nothing here mutates a task. Every change goes through the
//! backend and is followed by a fresh fetch.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Task identifier
///
/// Opaque to the client. The backend may hand out numbers or strings, and the
/// identifier is echoed back exactly as received.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    /// Numeric identifier (any JSON number)
    Number(Number),
    /// Textual identifier
    Text(String),
}

impl TaskId {
    /// Path segment used when addressing this task on the backend
    #[must_use]
    pub fn to_path_segment(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for TaskId {
    fn from(id: i64) -> Self {
        Self::Number(id.into())
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// A task as returned by the backend
///
/// Field order is significant: it fixes the canonical serialization the
/// render engine compares snapshots with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Backend-assigned identifier
    pub id: TaskId,
    /// Task description (plain text)
    pub description: String,
    /// Whether the task has been checked off
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a task value (mostly useful for tests and fixtures)
    pub fn new(id: impl Into<TaskId>, description: impl Into<String>, completed: bool) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            completed,
        }
    }
}

/// Ordered task list, in the order the backend returned it
pub type TaskCollection = Vec<Task>;
