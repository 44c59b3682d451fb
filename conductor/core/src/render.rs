//! Task List Rendering
//!
//! Turns a task collection into surface updates. Rendering is guarded by a
//! snapshot of the last rendered collection: when a re-fetch returns exactly
//! what is already on screen, nothing is touched.
//!
//! The snapshot is the canonical JSON form of the collection (field order
//! fixed by [`Task`]). It starts out absent, so the first render always
//! rebuilds, even for an empty list.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::surface::Surface;
use crate::tasks::{Task, TaskId};

/// Placeholder shown instead of rows when there are no tasks
pub const EMPTY_PLACEHOLDER: &str = "No tasks yet — add your first one!";

/// Checkbox state of a row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkbox {
    /// Box is ticked
    pub checked: bool,
    /// Box no longer reacts to input
    pub disabled: bool,
}

/// One visible task row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskRow {
    /// Identifier carried by both the checkbox and the delete affordance
    pub id: TaskId,
    /// Description, to be shown as literal text
    pub description: String,
    /// Completion checkbox
    pub checkbox: Checkbox,
}

impl TaskRow {
    /// Build the row for a task
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            description: task.description.clone(),
            checkbox: Checkbox {
                checked: task.completed,
                disabled: task.completed,
            },
        }
    }

    /// Whether ticking the checkbox should complete the task
    #[must_use]
    pub fn can_complete(&self) -> bool {
        !self.checkbox.disabled
    }
}

/// What the task list region shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskListContent {
    /// No tasks: a single placeholder line
    Empty {
        /// Placeholder text
        placeholder: &'static str,
    },
    /// One row per task, in backend order
    Rows(Vec<TaskRow>),
}

impl TaskListContent {
    /// Content for a collection
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        if tasks.is_empty() {
            Self::Empty {
                placeholder: EMPTY_PLACEHOLDER,
            }
        } else {
            Self::Rows(tasks.iter().map(TaskRow::from_task).collect())
        }
    }

    /// Rows, if any
    #[must_use]
    pub fn rows(&self) -> &[TaskRow] {
        match self {
            Self::Empty { .. } => &[],
            Self::Rows(rows) => rows,
        }
    }
}

/// Result of a render call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Same serialization as last time; surface untouched
    Unchanged,
    /// Snapshot replaced and list rebuilt
    Rebuilt,
}

/// Snapshot-guarded renderer
#[derive(Debug, Default)]
pub struct RenderEngine {
    /// Serialized form of the last rendered collection
    snapshot: Option<String>,
    /// Number of rebuilds so far
    rebuilds: u64,
}

/// Render engine shared by the task and chat controllers
pub type SharedRenderer = Arc<Mutex<RenderEngine>>;

impl RenderEngine {
    /// Create an engine with no snapshot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh engine for sharing
    #[must_use]
    pub fn shared() -> SharedRenderer {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Render `tasks` onto `surface` unless it is already showing them
    pub fn render(&mut self, tasks: &[Task], surface: &mut dyn Surface) -> RenderOutcome {
        match serde_json::to_string(tasks) {
            Ok(snapshot) => {
                if self.snapshot.as_deref() == Some(snapshot.as_str()) {
                    tracing::trace!(count = tasks.len(), "Render skipped, snapshot unchanged");
                    return RenderOutcome::Unchanged;
                }
                self.snapshot = Some(snapshot);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize tasks, rebuilding without snapshot");
                self.snapshot = None;
            }
        }

        surface.set_task_count(tasks.len());
        surface.replace_task_list(TaskListContent::from_tasks(tasks));
        self.rebuilds += 1;

        tracing::debug!(count = tasks.len(), rebuilds = self.rebuilds, "Task list rebuilt");
        RenderOutcome::Rebuilt
    }

    /// How many times the list has been rebuilt
    #[must_use]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }
}
