//! Task Controller
//!
//! Every mutation is followed by a full reload; the list on screen is always
//! a fresh backend collection, never a locally patched one.
//!
//! Actions are independent. Two quick adds may see their reloads land out of
//! order; the render snapshot absorbs identical results, and the last reload
//! to land is what stays on screen.

use std::sync::Arc;

use crate::backend::{TaskBackend, TransportError};
use crate::render::SharedRenderer;
use crate::surface::{SharedSurface, Surface};
use crate::tasks::TaskId;

/// Result of a task action
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Round trip(s) succeeded and the list was refreshed
    Applied,
    /// Input was blank; nothing was sent
    Ignored,
    /// A round trip failed; the message is in the error region
    Failed(String),
}

impl ActionOutcome {
    /// Whether the action failed
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Orchestrates task list actions
pub struct TaskController<B, S> {
    backend: Arc<B>,
    renderer: SharedRenderer,
    surface: SharedSurface<S>,
}

impl<B, S> Clone for TaskController<B, S> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            renderer: Arc::clone(&self.renderer),
            surface: Arc::clone(&self.surface),
        }
    }
}

impl<B: TaskBackend, S: Surface> TaskController<B, S> {
    /// Create a controller over shared resources
    pub fn new(backend: Arc<B>, renderer: SharedRenderer, surface: SharedSurface<S>) -> Self {
        Self {
            backend,
            renderer,
            surface,
        }
    }

    /// Fetch the collection, render it and clear the error region
    pub async fn load_tasks(&self) -> ActionOutcome {
        match self.backend.list_tasks().await {
            Ok(tasks) => {
                let mut renderer = self.renderer.lock();
                let mut surface = self.surface.lock();
                renderer.render(&tasks, &mut *surface);
                surface.clear_error();
                ActionOutcome::Applied
            }
            Err(e) => self.fail("load", &e),
        }
    }

    /// Create a task, then reload
    ///
    /// Blank descriptions are dropped without a request. The input field is
    /// cleared before the request goes out and stays cleared on failure.
    pub async fn add_task(&self, description: &str) -> ActionOutcome {
        let description = description.trim();
        if description.is_empty() {
            return ActionOutcome::Ignored;
        }

        self.surface.lock().clear_task_input();

        tracing::debug!(description = %description, "Adding task");
        match self.backend.create_task(description).await {
            Ok(()) => self.load_tasks().await,
            Err(e) => self.fail("add", &e),
        }
    }

    /// Check off a task, then reload
    pub async fn complete_task(&self, id: &TaskId) -> ActionOutcome {
        tracing::debug!(task_id = %id, "Completing task");
        match self.backend.complete_task(id).await {
            Ok(()) => self.load_tasks().await,
            Err(e) => self.fail("complete", &e),
        }
    }

    /// Delete a task, then reload
    pub async fn delete_task(&self, id: &TaskId) -> ActionOutcome {
        tracing::debug!(task_id = %id, "Deleting task");
        match self.backend.delete_task(id).await {
            Ok(()) => self.load_tasks().await,
            Err(e) => self.fail("delete", &e),
        }
    }

    fn fail(&self, action: &str, error: &TransportError) -> ActionOutcome {
        let message = error.message();
        tracing::warn!(
            action = action,
            backend = self.backend.name(),
            error = %message,
            "Task action failed"
        );
        self.surface.lock().set_error(&message);
        ActionOutcome::Failed(message)
    }
}
