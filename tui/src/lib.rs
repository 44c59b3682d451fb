//! Taskmaster TUI - Terminal interface for the task list client
//!
//! Task list on the left, a chat with Johnny on the right, one error line
//! underneath and a debug panel behind F12.
//!
//! # Architecture
//!
//! - **Surface**: [`TerminalSurface`], what the core writes into
//! - **View**: pure frame rendering from the surface
//! - **App**: key bindings and the event loop; actions run as spawned tasks

pub mod app;
pub mod input;
pub mod surface;
pub mod theme;
pub mod view;

pub use app::App;
pub use surface::TerminalSurface;
