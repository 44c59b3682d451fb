//! Chat Messages
//!
//! The chat log is append-only: messages are never edited or removed once
//! they are in it.

use chrono::{DateTime, Local};

/// Who wrote a chat message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Author {
    /// The person at the keyboard
    User,
    /// The persona
    Bot,
}

impl Author {
    /// Prefix used by text surfaces
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            Author::User => "You: ",
            Author::Bot => "Johnny: ",
        }
    }
}

/// One chat bubble
#[derive(Clone, Debug)]
pub struct ChatMessage {
    /// Plain text content
    pub text: String,
    /// Author
    pub author: Author,
    /// When the message was appended
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    /// Create a message stamped with the current local time
    pub fn new(text: impl Into<String>, author: Author) -> Self {
        Self {
            text: text.into(),
            author,
            timestamp: Local::now(),
        }
    }

    /// Message from the user
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Author::User)
    }

    /// Message from the persona
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Author::Bot)
    }

    /// Hour and minute, as shown under the bubble
    #[must_use]
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}
