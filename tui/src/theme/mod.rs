//! Theme and Colors
//!
//! Night City palette: neon accents over a dark terminal.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Palette
// ============================================================================

/// Johnny's chrome yellow (bot lines, accents)
pub const SAMURAI_YELLOW: Color = Color::Rgb(252, 238, 10);

/// Neon cyan (user lines, focused borders)
pub const NEON_CYAN: Color = Color::Rgb(0, 240, 255);

/// Hot red (errors, warnings)
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Completed-task green
pub const SUCCESS_GREEN: Color = Color::Rgb(120, 230, 120);

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Debug panel text
pub const DEBUG_VIOLET: Color = Color::Rgb(180, 150, 255);

// ============================================================================
// Styles
// ============================================================================

/// Border style for a panel, highlighted when it has focus
#[must_use]
pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM_GRAY)
    }
}

/// Style for a task row
#[must_use]
pub fn task_row(completed: bool, selected: bool) -> Style {
    let style = if completed {
        Style::default()
            .fg(SUCCESS_GREEN)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };
    if selected {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}
