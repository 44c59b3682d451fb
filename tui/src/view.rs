//! Frame Rendering
//!
//! Pure drawing: reads a [`TerminalSurface`] plus the event loop's
//! [`ViewState`] and paints one frame.
//!
//! ```text
//! ┌ Tasks (2) ─────────┐┌ Johnny ───────────────────┐
//! │ [ ] #1 Buy milk    ││ 12:01 You: add buy milk   │
//! │ [x] #2 Call mom    ││ 12:01 Johnny: Added ...   │
//! ├ New task ──────────┤├ Message ──────────────────┤
//! │ > _                ││ > _                       │
//! └────────────────────┘└───────────────────────────┘
//!  error region
//!  [debug panel, developer mode only]
//!  key help
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use taskmaster_core::{Author, Surface, TaskListContent};

use crate::input::InputField;
use crate::surface::TerminalSurface;
use crate::theme;

/// Height of an input box including borders
const INPUT_HEIGHT: u16 = 3;

/// Height of the debug panel in developer mode
const DEBUG_HEIGHT: u16 = 8;

/// Frames per typing-dot step
const DOT_FRAMES: u64 = 4;

/// Shown in the list region before the first load lands
pub const LOADING_LINE: &str = "Loading tasks…";

/// Which region receives keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    TaskInput,
    TaskList,
    ChatInput,
}

impl Focus {
    /// Region after this one (Tab)
    pub fn next(self) -> Self {
        match self {
            Focus::TaskInput => Focus::TaskList,
            Focus::TaskList => Focus::ChatInput,
            Focus::ChatInput => Focus::TaskInput,
        }
    }

    /// Region before this one (Shift-Tab)
    pub fn previous(self) -> Self {
        match self {
            Focus::TaskInput => Focus::ChatInput,
            Focus::TaskList => Focus::TaskInput,
            Focus::ChatInput => Focus::TaskList,
        }
    }
}

/// Event-loop owned view state
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    pub focus: Focus,
    /// Chat scroll offset (lines from bottom, 0 = latest)
    pub scroll_offset: usize,
    /// Rendered chat lines at the last frame (for scroll bounds)
    pub total_lines: usize,
    /// Frame counter for the typing animation
    pub tick: u64,
}

/// Paint one frame
pub fn draw(frame: &mut Frame, surface: &TerminalSurface, view: &mut ViewState) {
    let debug_height = if surface.dev_mode() { DEBUG_HEIGHT } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(INPUT_HEIGHT + 2),
            Constraint::Length(1),
            Constraint::Length(debug_height),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    let [task_list, task_input] = split_input(columns[0]);
    let [chat_log, chat_input] = split_input(columns[1]);

    draw_task_list(frame, task_list, surface, view.focus == Focus::TaskList);
    draw_input(
        frame,
        task_input,
        " New task ",
        &surface.task_input,
        view.focus == Focus::TaskInput,
    );
    draw_chat_log(frame, chat_log, surface, view);
    draw_input(
        frame,
        chat_input,
        " Message ",
        &surface.chat_input,
        view.focus == Focus::ChatInput,
    );
    draw_error(frame, rows[1], surface);
    if surface.dev_mode() {
        draw_debug(frame, rows[2], surface);
    }
    draw_help(frame, rows[3]);
}

fn split_input(area: Rect) -> [Rect; 2] {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(INPUT_HEIGHT)])
        .split(area);
    [parts[0], parts[1]]
}

fn draw_task_list(frame: &mut Frame, area: Rect, surface: &TerminalSurface, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(focused))
        .title(format!(" Tasks ({}) ", surface.task_count));

    let lines: Vec<Line> = match &surface.task_list {
        None => vec![Line::styled(LOADING_LINE, Style::default().fg(theme::DIM_GRAY))],
        Some(TaskListContent::Empty { placeholder }) => vec![Line::styled(
            *placeholder,
            Style::default()
                .fg(theme::DIM_GRAY)
                .add_modifier(Modifier::ITALIC),
        )],
        Some(TaskListContent::Rows(rows)) => rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mark = if row.checkbox.checked { "[x]" } else { "[ ]" };
                let style = theme::task_row(row.checkbox.checked, focused && i == surface.selected);
                Line::from(vec![
                    Span::styled(format!("{mark} #{} ", row.id), style),
                    Span::styled(row.description.as_str(), style),
                ])
            })
            .collect(),
    };

    // Keep the selection in view
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = (surface.selected + 1).saturating_sub(inner_height);

    frame.render_widget(
        Paragraph::new(lines).block(block).scroll((clamp_u16(scroll), 0)),
        area,
    );
}

fn draw_input(frame: &mut Frame, area: Rect, title: &str, field: &InputField, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(focused))
        .title(title.to_string());

    let prompt = "> ";
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor = prompt.len() + field.cursor_column();
    let offset = (cursor + 1).saturating_sub(inner_width);

    frame.render_widget(
        Paragraph::new(format!("{prompt}{}", field.value()))
            .block(block)
            .scroll((0, clamp_u16(offset))),
        area,
    );

    if focused && inner_width > 0 {
        let x = area.x + 1 + clamp_u16(cursor - offset);
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn draw_chat_log(frame: &mut Frame, area: Rect, surface: &TerminalSurface, view: &mut ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(false))
        .title(" Johnny ");

    let width = area.width.saturating_sub(2) as usize;
    let height = area.height.saturating_sub(2) as usize;
    if width < 10 || height < 1 {
        frame.render_widget(block, area);
        return;
    }

    let mut all_lines: Vec<Line> = Vec::new();
    for msg in &surface.chat_log {
        let style = match msg.author {
            Author::User => Style::default().fg(theme::NEON_CYAN),
            Author::Bot => Style::default().fg(theme::SAMURAI_YELLOW),
        };
        let content = format!("{} {}{}", msg.time_label(), msg.author.prefix(), msg.text);
        for line in textwrap::wrap(&content, width) {
            all_lines.push(Line::styled(line.into_owned(), style));
        }
    }
    if surface.typing {
        let dots = ".".repeat(1 + ((view.tick / DOT_FRAMES) % 3) as usize);
        all_lines.push(Line::styled(
            format!("Johnny is typing{dots}"),
            Style::default()
                .fg(theme::DIM_GRAY)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    view.total_lines = all_lines.len();
    let max_scroll = view.total_lines.saturating_sub(height);
    view.scroll_offset = view.scroll_offset.min(max_scroll);

    let visible_end = view.total_lines - view.scroll_offset;
    let visible_start = visible_end.saturating_sub(height);
    let visible: Vec<Line> = all_lines
        .into_iter()
        .skip(visible_start)
        .take(height)
        .collect();

    frame.render_widget(Paragraph::new(visible).block(block), area);
}

fn draw_error(frame: &mut Frame, area: Rect, surface: &TerminalSurface) {
    if let Some(error) = &surface.error {
        frame.render_widget(
            Paragraph::new(format!(" {error}")).style(Style::default().fg(theme::ERROR_RED)),
            area,
        );
    }
}

fn draw_debug(frame: &mut Frame, area: Rect, surface: &TerminalSurface) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::DEBUG_VIOLET))
        .title(" Debug (F12) ");

    let lines: Vec<Line> = surface
        .debug_log
        .iter()
        .flat_map(|entry| entry.lines().map(|l| Line::raw(l.to_string())))
        .collect();

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(theme::DEBUG_VIOLET)),
        area,
    );
}

fn draw_help(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(" Tab focus · Enter submit · Space complete · d delete · F12 debug · Esc quit")
            .style(Style::default().fg(theme::DIM_GRAY)),
        area,
    );
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
