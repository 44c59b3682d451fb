//! Client - Wiring for One Surface
//!
//! A [`Client`] owns everything a page needs for its whole lifetime: one
//! render engine (and with it the render snapshot), one chat log, one typing
//! slot. There is exactly one client per surface, and nothing here is ever
//! reset.

use std::sync::Arc;

use crate::backend::TaskBackend;
use crate::config::ClientConfig;
use crate::controller::{ChatController, TaskController};
use crate::persona::Narrator;
use crate::render::{RenderEngine, SharedRenderer};
use crate::surface::{self, SharedSurface, Surface};

/// Task list client bound to one backend and one surface
pub struct Client<B, S> {
    surface: SharedSurface<S>,
    renderer: SharedRenderer,
    tasks: TaskController<B, S>,
    chat: ChatController<B, S>,
}

impl<B: TaskBackend, S: Surface> Client<B, S> {
    /// Create a client that owns `surface`
    pub fn new(backend: B, config: ClientConfig, surface: S) -> Self {
        Self::with_shared(Arc::new(backend), config, surface::shared(surface))
    }

    /// Create a client over handles the caller keeps as well
    pub fn with_shared(backend: Arc<B>, config: ClientConfig, surface: SharedSurface<S>) -> Self {
        let renderer = RenderEngine::shared();
        let narrator = Narrator::new(config.tone);

        tracing::info!(
            backend = backend.name(),
            base_url = %config.base_url,
            tone = %config.tone,
            "Client created"
        );

        let tasks = TaskController::new(
            Arc::clone(&backend),
            Arc::clone(&renderer),
            Arc::clone(&surface),
        );
        let chat = ChatController::new(backend, Arc::clone(&renderer), Arc::clone(&surface), narrator);

        Self {
            surface,
            renderer,
            tasks,
            chat,
        }
    }

    /// Task actions
    pub fn tasks(&self) -> &TaskController<B, S> {
        &self.tasks
    }

    /// Chat turns
    pub fn chat(&self) -> &ChatController<B, S> {
        &self.chat
    }

    /// The surface this client drives
    pub fn surface(&self) -> &SharedSurface<S> {
        &self.surface
    }

    /// The render engine shared by both controllers
    pub fn renderer(&self) -> &SharedRenderer {
        &self.renderer
    }
}
