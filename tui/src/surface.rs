//! Terminal Surface
//!
//! Everything the terminal draws lives here. The core writes into it through
//! the [`Surface`] trait; the event loop reads it every frame and edits the
//! input fields and selection directly.

use std::collections::VecDeque;

use taskmaster_core::render::TaskRow;
use taskmaster_core::{ChatMessage, Surface, TaskListContent};

use crate::input::InputField;

/// Oldest debug entries are dropped past this many
pub const DEBUG_LOG_LIMIT: usize = 50;

/// Display state of the terminal client
#[derive(Debug, Default)]
pub struct TerminalSurface {
    /// Count label value
    pub task_count: usize,
    /// List region; `None` until the first render
    pub task_list: Option<TaskListContent>,
    /// Selected row in the list region
    pub selected: usize,
    /// New-task field
    pub task_input: InputField,
    /// Chat field
    pub chat_input: InputField,
    /// Error region
    pub error: Option<String>,
    /// Chat log as shown, oldest first
    pub chat_log: Vec<ChatMessage>,
    /// Typing indicator visible
    pub typing: bool,
    /// Debug log, most recent first
    pub debug_log: VecDeque<String>,
    dev_mode: bool,
}

impl TerminalSurface {
    /// Empty surface: nothing loaded, developer mode off
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip developer mode; returns the new state
    pub fn toggle_dev_mode(&mut self) -> bool {
        self.dev_mode = !self.dev_mode;
        self.dev_mode
    }

    /// Rows currently listed (empty while loading or when there are none)
    pub fn rows(&self) -> &[TaskRow] {
        self.task_list
            .as_ref()
            .map_or(&[][..], TaskListContent::rows)
    }

    /// Row under the selection, if any
    pub fn selected_row(&self) -> Option<&TaskRow> {
        self.rows().get(self.selected)
    }

    /// Move the selection down, stopping at the last row
    pub fn select_next(&mut self) {
        let len = self.rows().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    /// Move the selection up, stopping at the first row
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

impl Surface for TerminalSurface {
    fn set_task_count(&mut self, count: usize) {
        self.task_count = count;
    }

    fn replace_task_list(&mut self, content: TaskListContent) {
        let len = content.rows().len();
        self.selected = self.selected.min(len.saturating_sub(1));
        self.task_list = Some(content);
    }

    fn clear_task_input(&mut self) {
        self.task_input.clear();
    }

    fn clear_chat_input(&mut self) {
        self.chat_input.clear();
    }

    fn set_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn clear_error(&mut self) {
        self.error = None;
    }

    fn append_chat_message(&mut self, message: &ChatMessage) {
        self.chat_log.push(message.clone());
    }

    fn show_typing(&mut self) {
        self.typing = true;
    }

    fn hide_typing(&mut self) {
        self.typing = false;
    }

    fn dev_mode(&self) -> bool {
        self.dev_mode
    }

    fn prepend_debug_entry(&mut self, entry: &str) {
        self.debug_log.push_front(entry.to_string());
        self.debug_log.truncate(DEBUG_LOG_LIMIT);
    }
}
