//! Chat Controller
//!
//! One chat turn goes `Idle -> Sending -> (Success | Failed) -> Idle`:
//!
//! 1. clear the chat input, append the user's message, show typing
//! 2. `POST /api/ai`
//! 3. success: debug log (developer mode), render tasks, hide typing,
//!    append the narrated reply, clear the error region
//! 4. failure: hide typing, append the warning bubble, show the error
//!
//! A new turn may start while another is in flight. The typing indicator is a
//! single slot: it is visible while any turn is pending, it is taken down
//! before every bot bubble, and it is put back afterwards if another turn is
//! still waiting.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::backend::{TaskBackend, TransportError};
use crate::calls::ChatReply;
use crate::messages::ChatMessage;
use crate::persona::Narrator;
use crate::render::SharedRenderer;
use crate::surface::{SharedSurface, Surface};

/// Bubble appended when the intent backend fails
pub const AI_WARNING_BUBBLE: &str = "⚠️ AI call failed. Check your key or server logs.";

/// Error-region text when a failure carries no message
pub const AI_FAILURE_FALLBACK: &str = "AI call failed";

/// Result of a chat send
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatOutcome {
    /// Input was blank; nothing was sent or appended
    Ignored,
    /// The turn completed; carries the narrated bot line
    Replied(String),
    /// The turn failed; carries the error-region message
    Failed(String),
}

/// Single typing indicator shared by all pending turns
#[derive(Debug, Default)]
struct TypingSlot {
    pending: BTreeSet<u64>,
    shown: bool,
}

impl TypingSlot {
    /// Register a turn and (re)place the indicator at the end of the log
    fn begin(&mut self, turn: u64, surface: &mut dyn Surface) {
        self.pending.insert(turn);
        if self.shown {
            surface.hide_typing();
        }
        surface.show_typing();
        self.shown = true;
    }

    /// Retire a turn and take the indicator down
    fn release(&mut self, turn: u64, surface: &mut dyn Surface) {
        self.pending.remove(&turn);
        if self.shown {
            surface.hide_typing();
            self.shown = false;
        }
    }

    /// Put the indicator back if other turns are still waiting
    fn resume(&mut self, surface: &mut dyn Surface) {
        if !self.pending.is_empty() && !self.shown {
            surface.show_typing();
            self.shown = true;
        }
    }
}

#[derive(Debug, Default)]
struct ChatState {
    log: Vec<ChatMessage>,
    typing: TypingSlot,
    next_turn: u64,
}

impl ChatState {
    fn append(&mut self, message: ChatMessage, surface: &mut dyn Surface) {
        surface.append_chat_message(&message);
        self.log.push(message);
    }
}

/// Orchestrates chat turns
pub struct ChatController<B, S> {
    backend: Arc<B>,
    renderer: SharedRenderer,
    surface: SharedSurface<S>,
    narrator: Narrator,
    state: Arc<Mutex<ChatState>>,
}

impl<B, S> Clone for ChatController<B, S> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            renderer: Arc::clone(&self.renderer),
            surface: Arc::clone(&self.surface),
            narrator: self.narrator,
            state: Arc::clone(&self.state),
        }
    }
}

impl<B: TaskBackend, S: Surface> ChatController<B, S> {
    /// Create a controller over shared resources
    pub fn new(
        backend: Arc<B>,
        renderer: SharedRenderer,
        surface: SharedSurface<S>,
        narrator: Narrator,
    ) -> Self {
        Self {
            backend,
            renderer,
            surface,
            narrator,
            state: Arc::new(Mutex::new(ChatState::default())),
        }
    }

    /// Run one chat turn
    pub async fn send(&self, text: &str) -> ChatOutcome {
        let text = text.trim();
        if text.is_empty() {
            return ChatOutcome::Ignored;
        }

        let turn = self.begin_turn(text);
        tracing::info!(turn = turn, "Chat turn started");

        match self.backend.interpret(text).await {
            Ok(reply) => ChatOutcome::Replied(self.finish_success(turn, &reply)),
            Err(e) => ChatOutcome::Failed(self.finish_failure(turn, &e)),
        }
    }

    /// Copy of the chat log, oldest first
    #[must_use]
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.state.lock().log.clone()
    }

    /// Whether the typing indicator is currently shown
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.state.lock().typing.shown
    }

    /// Number of turns waiting on the backend
    #[must_use]
    pub fn pending_turns(&self) -> usize {
        self.state.lock().typing.pending.len()
    }

    fn begin_turn(&self, text: &str) -> u64 {
        let mut state = self.state.lock();
        let mut surface = self.surface.lock();

        surface.clear_chat_input();
        state.append(ChatMessage::user(text), &mut *surface);

        let turn = state.next_turn;
        state.next_turn += 1;
        state.typing.begin(turn, &mut *surface);
        turn
    }

    fn finish_success(&self, turn: u64, reply: &ChatReply) -> String {
        let call = reply.function_call();
        tracing::debug!(turn = turn, function = ?call.name(), tasks = reply.tasks.len(), "Chat turn resolved");

        {
            let mut surface = self.surface.lock();
            if surface.dev_mode() {
                surface.prepend_debug_entry(&reply.call_pretty());
            }
        }

        {
            let mut renderer = self.renderer.lock();
            let mut surface = self.surface.lock();
            renderer.render(&reply.tasks, &mut *surface);
        }

        let line = self.narrator.narrate(&call, &reply.tasks);

        let mut state = self.state.lock();
        let mut surface = self.surface.lock();
        state.typing.release(turn, &mut *surface);
        state.append(ChatMessage::bot(line.clone()), &mut *surface);
        surface.clear_error();
        state.typing.resume(&mut *surface);

        line
    }

    fn finish_failure(&self, turn: u64, error: &TransportError) -> String {
        let message = error.message();
        let message = if message.trim().is_empty() {
            AI_FAILURE_FALLBACK.to_string()
        } else {
            message
        };
        tracing::warn!(
            turn = turn,
            backend = self.backend.name(),
            error = %message,
            "Chat turn failed"
        );

        let mut state = self.state.lock();
        let mut surface = self.surface.lock();
        state.typing.release(turn, &mut *surface);
        state.append(ChatMessage::bot(AI_WARNING_BUBBLE), &mut *surface);
        surface.set_error(&message);
        state.typing.resume(&mut *surface);

        message
    }
}
