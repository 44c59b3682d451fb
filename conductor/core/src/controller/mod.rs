//! Controllers
//!
//! Controllers turn user actions into backend round trips and surface
//! updates. Each action runs its steps in a fixed order and never lets a
//! transport failure escape: failures end up in the surface's error region
//! and in the returned outcome.
//!
//! - [`TaskController`]: load / add / complete / delete
//! - [`ChatController`]: chat turns with typing indicator and narration

mod chat;
mod tasks;

pub use chat::{ChatController, ChatOutcome, AI_FAILURE_FALLBACK, AI_WARNING_BUBBLE};
pub use tasks::{ActionOutcome, TaskController};
