//! TUI color semantics and style constants.
//!
//! Color semantics:
//! - Green: on / delivered (checked boxes, active toggle, success)
//! - Red: required marker, errors
//! - Cyan: interactive elements (choices, keybinding hints, edit box)
//! - Dim: placeholders and empty values
//! - Bold: labels of the focused row, titles

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// On / success: green.
pub const STYLE_ON: Style = Style::new().fg(Color::Green);

/// Errors and the required marker: red.
pub const STYLE_ERROR: Style = Style::new().fg(Color::Red);

/// Informational notices: yellow.
pub const STYLE_INFO: Style = Style::new().fg(Color::Yellow);

/// Interactive element / keybinding hint: cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// Placeholder or empty value: dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Focused row.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Text being typed.
pub const STYLE_EDIT: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================
