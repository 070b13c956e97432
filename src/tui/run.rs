//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui,
//! applies field changes through the reducer, and hands submissions to
//! the sink.

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::report::display_value;
use crate::submit::{submit, SubmissionResult, SubmissionSink};
use crate::types::{FieldChange, FieldValue, FileRef};

use super::state::{Action, App, Effect, Notice, Screen, Transition};
use super::update::update;
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// While editing, printable keys are text input; otherwise they are
/// commands. Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent, editing: bool) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('s') => Some(Action::Submit),
            _ => None,
        };
    }

    if editing {
        return match key.code {
            KeyCode::Enter => Some(Action::Activate),
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => Some(Action::MoveDown),
        KeyCode::BackTab => Some(Action::MoveUp),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevOption),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::NextOption),
        KeyCode::Enter => Some(Action::Activate),
        KeyCode::Char(' ') => Some(Action::Toggle),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    Terminal::new(backend)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the interactive form until the user quits.
///
/// Every submission goes to `sink`.
pub fn run(app: &mut App, sink: &mut dyn SubmissionSink) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    info!(form = %app.schema().variant(), "form session started");

    let result = event_loop(&mut terminal, app, sink);

    restore_terminal()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    sink: &mut dyn SubmissionSink,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Ignore mouse, resize and key-release events.
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if let Some(action) = map_key(key, app.screen.is_editing()) {
            step(app, &action, sink);
        }
    }
}

/// Process one action: pure transition, then reducer or effect.
pub fn step(app: &mut App, action: &Action, sink: &mut dyn SubmissionSink) {
    let screen = std::mem::take(&mut app.screen);
    match update(screen, action, app.reducer.schema(), &app.form) {
        Transition::Screen(screen) => app.screen = screen,
        Transition::Change { change, cursor } => {
            apply_change(app, &change, cursor);
        }
        Transition::Quit => app.should_quit = true,
        Transition::Effect(effect) => handle_effect(effect, app, sink),
    }
}

/// Run a change through the reducer. A rejection leaves the record as
/// it was and shows the reason. Returns whether the change was applied.
fn apply_change(app: &mut App, change: &FieldChange, cursor: usize) -> bool {
    match app.reducer.apply(&app.form, change) {
        Ok(next) => {
            app.form = next;
            app.screen = Screen::form(cursor);
            true
        }
        Err(e) => {
            app.screen = Screen::form_with(cursor, Notice::Error(e.to_string()));
            false
        }
    }
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

fn handle_effect(effect: Effect, app: &mut App, sink: &mut dyn SubmissionSink) {
    match effect {
        Effect::SelectFile { cursor, field, path } => match select_image(Path::new(&path)) {
            Ok(file) => {
                let selected = format!("Selected {}", display_value(&FieldValue::File(Some(file.clone()))));
                if apply_change(app, &FieldChange::file(field, vec![file]), cursor) {
                    app.screen = Screen::form_with(cursor, Notice::Info(selected));
                }
            }
            Err(reason) => app.screen = Screen::form_with(cursor, Notice::Error(reason)),
        },
        Effect::Submit { cursor } => {
            let form = app.schema().variant();
            match submit(&app.form, form, sink) {
                SubmissionResult::Delivered(_) => {
                    app.submitted += 1;
                    // The record is discarded once delivered.
                    app.form = app.reducer.initial_state();
                    app.screen = Screen::Submitted {
                        message: format!("Submission #{} saved.", app.submitted),
                    };
                }
                SubmissionResult::Rejected { error, .. } => {
                    app.screen =
                        Screen::form_with(cursor, Notice::Error(format!("Submission failed: {}", error)));
                }
            }
        }
        Effect::NewSession => {
            debug!("new form session");
            app.form = app.reducer.initial_state();
            app.screen = Screen::form(0);
        }
    }
}

/// Select a file for the picture field: it must exist and look like an image.
pub fn select_image(path: &Path) -> Result<FileRef, String> {
    let file = FileRef::from_disk(path).map_err(|e| format!("Cannot use {}: {}", path.display(), e))?;
    if !file.is_image() {
        return Err(format!("{} is not an image file", file.name));
    }
    Ok(file)
}

// ============================================================================
// TESTS
// ============================================================================
