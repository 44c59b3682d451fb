//! Task Backend Traits
//!
//! The client talks to two collaborators: the REST task store and the intent
//! router that turns chat text into a function call. Both sit behind
//! [`TaskBackend`], so controllers can be driven by the HTTP implementation
//! or by a scripted one in tests.
//!
//! Every failure collapses into a [`TransportError`] carrying a message that
//! is fit to show in the error region. There are no retries: one failed round
//! trip is reported straight away.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::calls::ChatReply;
use crate::tasks::{TaskCollection, TaskId};

/// Message used when a failed response carries no payload at all
pub const GENERIC_FAILURE: &str = "Request failed";

/// A failed backend round trip
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The backend answered with a non-success status
    #[error("{message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message extracted from the error payload
        message: String,
    },

    /// A success response whose body could not be decoded
    #[error("Invalid response from server: {0}")]
    Decode(String),

    /// The request never got an answer (connection refused, reset, ...)
    #[error("{0}")]
    Network(String),

    /// No answer within the configured timeout
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The configured base URL cannot address the backend
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// Message to show the user
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status, when the backend answered
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Backend seam used by the controllers
#[async_trait]
pub trait TaskBackend: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// `GET /api/tasks`
    async fn list_tasks(&self) -> Result<TaskCollection, TransportError>;

    /// `POST /api/tasks`
    async fn create_task(&self, description: &str) -> Result<(), TransportError>;

    /// `PATCH /api/tasks/{id}/complete`
    async fn complete_task(&self, id: &TaskId) -> Result<(), TransportError>;

    /// `DELETE /api/tasks/{id}`
    async fn delete_task(&self, id: &TaskId) -> Result<(), TransportError>;

    /// `POST /api/ai`: interpret chat text and apply the resulting call
    async fn interpret(&self, text: &str) -> Result<ChatReply, TransportError>;
}
