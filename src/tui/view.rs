//! Pure rendering: map App state to ratatui widget trees.
//!
//! Widget-building functions are pure (state in, widgets out); the only
//! effect is Frame::render_widget() which writes to the terminal buffer.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::report::display_value;
use crate::schema::{FieldKind, FieldSpec};
use crate::types::{FieldValue, FormState, FormVariant};

use super::state::{App, Notice, Screen};
use super::theme;

/// Width of the label column.
const LABEL_WIDTH: usize = 28;

/// The toggle whose state is spelled out next to it.
const ACTIVATION_FIELD: &str = "isActive";

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // notice
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(app), chunks[0]);
    frame.render_widget(render_help(&app.screen), chunks[3]);

    match &app.screen {
        Screen::Form { cursor, notice } => {
            render_form(app, *cursor, None, frame, chunks[1]);
            if let Some(notice) = notice {
                frame.render_widget(render_notice(notice), chunks[2]);
            }
        }
        Screen::Edit { cursor, buffer } => {
            render_form(app, *cursor, Some(buffer), frame, chunks[1]);
        }
        Screen::Submitted { message } => {
            render_submitted(message, frame, chunks[1]);
        }
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

fn render_title(app: &App) -> Paragraph<'static> {
    let name = match app.schema().variant() {
        FormVariant::Employee => "Employee form",
        FormVariant::Profile => "User profile form",
    };
    let mut spans = vec![Span::styled(name, theme::STYLE_TITLE)];
    if app.submitted > 0 {
        spans.push(Span::styled(format!("  ({} submitted)", app.submitted), theme::STYLE_DIM));
    }
    Paragraph::new(Line::from(spans))
}

fn render_help(screen: &Screen) -> Paragraph<'static> {
    let help_text = match screen {
        Screen::Form { .. } => {
            "[j/k] move  [Enter] edit/toggle  [Space] toggle  [←/→] choose  [^S] submit  [q] quit"
        }
        Screen::Edit { .. } => "[Enter] save  [Esc] cancel  [^C] quit",
        Screen::Submitted { .. } => "[Enter] new form  [q] quit",
    };
    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

fn render_notice(notice: &Notice) -> Paragraph<'static> {
    match notice {
        Notice::Info(text) => Paragraph::new(Span::styled(format!("  {}", text), theme::STYLE_INFO)),
        Notice::Error(text) => Paragraph::new(Span::styled(format!("  {}", text), theme::STYLE_ERROR)),
    }
}

// ============================================================================
// SCREEN: FORM
// ============================================================================

fn render_form(app: &App, cursor: usize, editing: Option<&String>, frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    for (i, spec) in app.schema().layout().iter().enumerate() {
        let is_cursor = i == cursor;
        let marker = if spec.required {
            Span::styled("* ", theme::STYLE_ERROR)
        } else {
            Span::raw("  ")
        };
        let label = format!("{:<width$}", spec.label, width = LABEL_WIDTH);

        let mut spans = vec![Span::raw(" "), marker, Span::raw(label)];
        match editing {
            Some(buffer) if is_cursor => {
                spans.push(Span::styled(format!("{}▏", buffer), theme::STYLE_EDIT));
            }
            _ => spans.extend(value_spans(spec, &app.form)),
        }

        let line = if is_cursor && editing.is_none() {
            Line::from(spans).style(theme::STYLE_CURSOR)
        } else {
            Line::from(spans)
        };
        lines.push(line);
    }

    let visible_height = area.height as usize;
    let scroll_offset = if cursor >= visible_height {
        cursor - visible_height + 1
    } else {
        0
    };

    let paragraph = Paragraph::new(lines).scroll((scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}

/// Value column for one field.
fn value_spans(spec: &FieldSpec, form: &FormState) -> Vec<Span<'static>> {
    let Some(value) = form.get(spec.name) else {
        return vec![Span::styled("(missing)", theme::STYLE_ERROR)];
    };

    match (spec.kind, value) {
        (FieldKind::Boolean { .. }, FieldValue::Bool(checked)) => {
            let mut spans = if *checked {
                vec![Span::styled("[x]", theme::STYLE_ON)]
            } else {
                vec![Span::styled("[ ]", theme::STYLE_DIM)]
            };
            if spec.name == ACTIVATION_FIELD {
                let status = if *checked {
                    Span::styled("  Activated", theme::STYLE_ON)
                } else {
                    Span::styled("  Not activated", theme::STYLE_DIM)
                };
                spans.push(status);
            }
            spans
        }
        (FieldKind::Enum { options }, FieldValue::Text(chosen)) => {
            match options.iter().find(|o| o.value == chosen.as_str()) {
                Some(option) => vec![
                    Span::styled("‹ ", theme::STYLE_INTERACTIVE),
                    Span::raw(option.label),
                    Span::styled(" ›", theme::STYLE_INTERACTIVE),
                ],
                None if chosen.is_empty() => vec![Span::styled("‹ choose ›", theme::STYLE_DIM)],
                None => vec![Span::raw(chosen.clone())],
            }
        }
        (FieldKind::Attachment, FieldValue::File(None)) => {
            vec![Span::styled("(default picture)", theme::STYLE_DIM)]
        }
        (_, value) if value.is_blank() => vec![Span::styled("(empty)", theme::STYLE_DIM)],
        (_, value) => vec![Span::raw(display_value(value))],
    }
}

// ============================================================================
// SCREEN: SUBMITTED
// ============================================================================

fn render_submitted(message: &str, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  ✓  ", theme::STYLE_ON),
            Span::styled(message.to_string(), theme::STYLE_ON),
        ]),
        Line::from(""),
        Line::from(Span::styled("  The form has been cleared.", theme::STYLE_DIM)),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// TESTS
// ============================================================================
