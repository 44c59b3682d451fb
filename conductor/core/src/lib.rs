//! Taskmaster Core - Headless Task List Client
//!
//! This crate holds the client-side logic of Taskmaster, completely
//! independent of any UI framework. It drives a TUI today, but any surface
//! that implements [`Surface`] (a web view, a test recorder) works the same.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         UI Surface                            │
//! │        task list · count · inputs · error · chat · debug      │
//! └───────────────▲──────────────────────────────┬───────────────┘
//!                 │ Surface calls                │ user actions
//! ┌───────────────┴──────────────────────────────▼───────────────┐
//! │                        TASKMASTER CORE                        │
//! │  ┌────────────────┐  ┌────────────────┐  ┌─────────────────┐  │
//! │  │ TaskController │  │ ChatController │──│    Narrator     │  │
//! │  └───────┬────────┘  └───────┬────────┘  └─────────────────┘  │
//! │          └───────┬───────────┘                                │
//! │          ┌───────▼────────┐   ┌───────────────────────────┐   │
//! │          │  RenderEngine  │   │  TaskBackend (HTTP/JSON)  │   │
//! │          └────────────────┘   └───────────────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Client`]: wires the controllers to one backend and one surface
//! - [`TaskController`]: add / complete / delete / reload
//! - [`ChatController`]: chat turn state machine with typing indicator
//! - [`RenderEngine`]: snapshot-guarded task list rendering
//! - [`Narrator`]: Johnny Silverhand persona lines for function calls
//! - [`TaskBackend`]: transport seam, implemented over HTTP by [`HttpBackend`]
//!
//! # Quick Start
//!
//! ```ignore
//! use taskmaster_core::{Client, ClientConfig, HttpBackend};
//!
//! let config = ClientConfig::from_env();
//! let backend = HttpBackend::from_config(&config)?;
//! let client = Client::new(backend, config, my_surface);
//!
//! client.tasks().load_tasks().await;
//! client.chat().send("add buy milk").await;
//! ```
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod calls;
pub mod client;
pub mod config;
pub mod controller;
pub mod messages;
pub mod persona;
pub mod render;
pub mod surface;
pub mod tasks;

// Re-exports for convenience
pub use backend::{HttpBackend, TaskBackend, TransportError};
pub use calls::{ChatReply, FunctionCall};
pub use client::Client;
pub use config::{
    default_config_path, load_config_from_path, ClientConfig, ClientToml,
    ConfigError, ConfigOverrides, ConfigSource,
};
pub use controller::{ActionOutcome, ChatController, ChatOutcome, TaskController};
pub use messages::{Author, ChatMessage};
pub use persona::{Narrator, Tone};
pub use render::{RenderEngine, RenderOutcome, SharedRenderer, TaskListContent, TaskRow};
pub use surface::{SharedSurface, Surface};
pub use tasks::{Task, TaskCollection, TaskId};
