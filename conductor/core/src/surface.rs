//! Surface Abstraction
//!
//! A surface is whatever shows the client to a person: the terminal UI, a web
//! view, or a recorder in tests. The core never draws anything itself. It
//! tells the surface what changed, one region at a time.
//!
//! # Regions
//!
//! - task list and its count label
//! - task input and chat input
//! - the shared error region (one line, overwritten)
//! - chat log with a single typing indicator
//! - developer debug log (newest entry first)
//!
//! Surfaces are shared between controllers as [`SharedSurface`]. Controllers
//! lock it only for the duration of a synchronous update and never across an
//! `.await`.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::messages::ChatMessage;
use crate::render::TaskListContent;

/// A UI surface the client drives
pub trait Surface: Send {
    /// Update the task count label
    fn set_task_count(&mut self, count: usize);

    /// Replace the visible task list
    fn replace_task_list(&mut self, content: TaskListContent);

    /// Empty the task input field
    fn clear_task_input(&mut self);

    /// Empty the chat input field
    fn clear_chat_input(&mut self);

    /// Show an error, replacing whatever was there
    fn set_error(&mut self, message: &str);

    /// Empty the error region
    fn clear_error(&mut self);

    /// Append a bubble to the chat log
    fn append_chat_message(&mut self, message: &ChatMessage);

    /// Show the typing indicator at the end of the chat log
    fn show_typing(&mut self);

    /// Remove the typing indicator
    fn hide_typing(&mut self);

    /// Whether the developer toggle is on
    fn dev_mode(&self) -> bool;

    /// Put an entry at the top of the developer debug log
    fn prepend_debug_entry(&mut self, entry: &str);
}

/// Surface handle shared by the controllers
pub type SharedSurface<S> = Arc<Mutex<S>>;

/// Wrap a surface for sharing
pub fn shared<S: Surface>(surface: S) -> SharedSurface<S> {
    Arc::new(Mutex::new(surface))
}
