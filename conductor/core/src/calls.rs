//! Function Calls from the Intent Backend
//!
//! The intent backend turns free text into `{"function": .., "parameters": ..}`.
//! The client treats that value as opaque input: it is decoded leniently into
//! a [`FunctionCall`] for narration and kept raw for the developer log.
//!
//! Decoding never fails. A missing or malformed call is a normal outcome
//! (the router glitched), not an error.

use serde::Deserialize;
use serde_json::Value;

use crate::tasks::TaskCollection;

/// A decoded function call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FunctionCall {
    /// `addTask(description)`
    AddTask {
        /// Description as display text
        description: String,
    },
    /// `completeTask(task_id)`
    CompleteTask {
        /// Task id as display text
        task_id: String,
    },
    /// `deleteTask(task_id)`
    DeleteTask {
        /// Task id as display text
        task_id: String,
    },
    /// `viewTasks()`
    ViewTasks,
    /// A function name the client does not know
    Unrecognized {
        /// The name the backend sent
        name: String,
    },
    /// No call, or no function name in it
    Missing,
}

/// Placeholder shown when a call omits its `task_id`
const MISSING_TASK_ID: &str = "?";

impl FunctionCall {
    /// Decode a raw call value
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(name) = value
            .get("function")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
        else {
            return Self::Missing;
        };

        let parameters = value.get("parameters");
        let param = |key: &str| parameters.and_then(|p| p.get(key)).and_then(display_text);

        match name {
            "addTask" => Self::AddTask {
                description: param("description").unwrap_or_default(),
            },
            "completeTask" => Self::CompleteTask {
                task_id: param("task_id").unwrap_or_else(|| MISSING_TASK_ID.to_string()),
            },
            "deleteTask" => Self::DeleteTask {
                task_id: param("task_id").unwrap_or_else(|| MISSING_TASK_ID.to_string()),
            },
            "viewTasks" => Self::ViewTasks,
            other => Self::Unrecognized {
                name: other.to_string(),
            },
        }
    }

    /// Wire name of the function, if any
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::AddTask { .. } => Some("addTask"),
            Self::CompleteTask { .. } => Some("completeTask"),
            Self::DeleteTask { .. } => Some("deleteTask"),
            Self::ViewTasks => Some("viewTasks"),
            Self::Unrecognized { name } => Some(name.as_str()),
            Self::Missing => None,
        }
    }
}

/// Render a parameter value the way it reads in a sentence
fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Response of `POST /api/ai`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatReply {
    /// Raw call as produced by the intent backend
    #[serde(default)]
    pub call: Value,
    /// Task collection after the call was applied
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tasks: TaskCollection,
}

impl ChatReply {
    /// Decoded form of [`ChatReply::call`]
    #[must_use]
    pub fn function_call(&self) -> FunctionCall {
        FunctionCall::from_value(&self.call)
    }

    /// Pretty-printed raw call for the developer log
    #[must_use]
    pub fn call_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.call).unwrap_or_else(|_| self.call.to_string())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<TaskCollection, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<TaskCollection>::deserialize(deserializer).map(Option::unwrap_or_default)
}
