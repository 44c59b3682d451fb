//! Main Application
//!
//! The App owns the terminal lifecycle and binds keys to client actions:
//! - Event loop (keyboard, resize, frame tick)
//! - [`Client`] for task and chat round trips
//! - [`TerminalSurface`] for everything on screen
//!
//! Actions are spawned onto the runtime. The loop never awaits a backend
//! round trip, so typing and scrolling stay live while requests are out.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use parking_lot::Mutex;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use taskmaster_core::{Client, ClientConfig, SharedSurface, TaskBackend, TaskId, TaskRow};

use crate::input::InputField;
use crate::surface::TerminalSurface;
use crate::view::{self, Focus, ViewState};

/// Frame tick (~10 FPS, enough for the typing dots)
const FRAME_DURATION: Duration = Duration::from_millis(100);

/// Lines scrolled per PageUp/PageDown
const SCROLL_STEP: usize = 5;

/// Main application state
pub struct App<B> {
    /// Is the app still running?
    running: bool,
    /// Task and chat controllers
    client: Client<B, TerminalSurface>,
    /// Same handle the client writes into
    surface: SharedSurface<TerminalSurface>,
    /// Focus, scroll and animation state
    view: ViewState,
}

impl<B: TaskBackend + 'static> App<B> {
    /// Create an App over `backend`
    pub fn new(backend: B, config: ClientConfig) -> Self {
        let surface = Arc::new(Mutex::new(TerminalSurface::new()));
        let client = Client::with_shared(Arc::new(backend), config, Arc::clone(&surface));

        Self {
            running: true,
            client,
            surface,
            view: ViewState::default(),
        }
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();
        let mut ticker = tokio::time::interval(FRAME_DURATION);

        self.load_tasks();
        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                maybe_event = event_stream.next() => {
                    match maybe_event {
                        // Only handle Press events (not Release or Repeat)
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key);
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::warn!(error = %e, "Terminal event error");
                        }
                        None => self.running = false,
                    }
                }

                _ = ticker.tick() => {
                    self.view.tick = self.view.tick.wrapping_add(1);
                }
            }

            self.render(terminal)?;
        }

        tracing::info!("Event loop finished");
        Ok(())
    }

    fn render(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
        let surface = self.surface.lock();
        let state = &mut self.view;
        terminal.draw(|frame| view::draw(frame, &surface, state))?;
        Ok(())
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            // Quit
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }

            KeyCode::Tab => self.view.focus = self.view.focus.next(),
            KeyCode::BackTab => self.view.focus = self.view.focus.previous(),

            // Toggle dev mode
            KeyCode::F(12) => {
                let on = self.surface.lock().toggle_dev_mode();
                tracing::debug!(dev_mode = on, "Developer mode toggled");
            }

            // Chat scrolling
            KeyCode::PageUp => {
                let max_scroll = self.view.total_lines.saturating_sub(1);
                self.view.scroll_offset = (self.view.scroll_offset + SCROLL_STEP).min(max_scroll);
            }
            KeyCode::PageDown => {
                self.view.scroll_offset = self.view.scroll_offset.saturating_sub(SCROLL_STEP);
            }

            _ => match self.view.focus {
                Focus::TaskInput => self.handle_task_input(key),
                Focus::TaskList => self.handle_task_list(key),
                Focus::ChatInput => self.handle_chat_input(key),
            },
        }
    }

    fn handle_task_input(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            // Emptied under the same lock so a repeated Enter finds nothing
            let description = self.surface.lock().task_input.take_submission();
            if let Some(description) = description {
                self.add_task(description);
            }
        } else {
            edit(&mut self.surface.lock().task_input, key);
        }
    }

    fn handle_task_list(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.surface.lock().select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.surface.lock().select_next(),
            KeyCode::Char(' ') => {
                let row = self.surface.lock().selected_row().cloned();
                if let Some(row) = row.filter(TaskRow::can_complete) {
                    self.complete_task(row.id);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let row = self.surface.lock().selected_row().cloned();
                if let Some(row) = row {
                    self.delete_task(row.id);
                }
            }
            _ => {}
        }
    }

    fn handle_chat_input(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            let text = self.surface.lock().chat_input.take_submission();
            if let Some(text) = text {
                self.send_chat(text);
                self.view.scroll_offset = 0;
            }
        } else {
            edit(&mut self.surface.lock().chat_input, key);
        }
    }

    // ========================================================================
    // Spawned actions
    // ========================================================================

    fn load_tasks(&self) {
        let tasks = self.client.tasks().clone();
        tokio::spawn(async move {
            let outcome = tasks.load_tasks().await;
            tracing::debug!(outcome = ?outcome, "Initial load finished");
        });
    }

    fn add_task(&self, description: String) {
        let tasks = self.client.tasks().clone();
        tokio::spawn(async move {
            let outcome = tasks.add_task(&description).await;
            tracing::debug!(outcome = ?outcome, "Add finished");
        });
    }

    fn complete_task(&self, id: TaskId) {
        let tasks = self.client.tasks().clone();
        tokio::spawn(async move {
            let outcome = tasks.complete_task(&id).await;
            tracing::debug!(task_id = %id, outcome = ?outcome, "Complete finished");
        });
    }

    fn delete_task(&self, id: TaskId) {
        let tasks = self.client.tasks().clone();
        tokio::spawn(async move {
            let outcome = tasks.delete_task(&id).await;
            tracing::debug!(task_id = %id, outcome = ?outcome, "Delete finished");
        });
    }

    fn send_chat(&self, text: String) {
        let chat = self.client.chat().clone();
        tokio::spawn(async move {
            let outcome = chat.send(&text).await;
            tracing::debug!(outcome = ?outcome, "Chat turn finished");
        });
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Whether the loop will keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current view state
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Shared surface handle
    pub fn surface(&self) -> &SharedSurface<TerminalSurface> {
        &self.surface
    }

    /// The client driving this App
    pub fn client(&self) -> &Client<B, TerminalSurface> {
        &self.client
    }
}

/// Apply an editing key to an input field
fn edit(field: &mut InputField, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => field.insert(c),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        KeyCode::Home => field.move_home(),
        KeyCode::End => field.move_end(),
        _ => {}
    }
}
