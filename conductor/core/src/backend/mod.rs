//! Task Backend Integration
//!
//! Access to the task store and the intent router through a common trait.
//!
//! # Available Backends
//!
//! - **HTTP**: JSON REST server (default)
//!
//! # Usage
//!
//! ```ignore
//! use taskmaster_core::backend::{HttpBackend, TaskBackend};
//!
//! let backend = HttpBackend::new("http://127.0.0.1:5000", Duration::from_secs(30))?;
//! let tasks = backend.list_tasks().await?;
//! ```

mod http;
mod traits;

pub use http::{error_message, HttpBackend};
pub use traits::{TaskBackend, TransportError, GENERIC_FAILURE};
