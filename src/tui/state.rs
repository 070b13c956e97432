//! TUI state algebra: pure types, zero effects.
//!
//! Screen variants carry only per-screen transient state (cursor, edit
//! buffer, notices). The record being edited and the reducer live in
//! App. The transition function and the renderer both program against
//! these types.

use crate::reducer::FormReducer;
use crate::schema::Schema;
use crate::types::{FieldChange, FormState};

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// Reducer bound to the session's schema.
    pub reducer: FormReducer,

    /// The record of the current form session.
    pub form: FormState,

    /// Current screen.
    pub screen: Screen,

    /// Submissions delivered so far in this run.
    pub submitted: usize,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

// ============================================================================
// SCREENS
// ============================================================================

/// Message shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// The current TUI screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Browsing the form.
    Form {
        /// Index into the schema layout.
        cursor: usize,
        notice: Option<Notice>,
    },

    /// Typing into a text-like field.
    Edit {
        cursor: usize,
        /// Raw input; committed as one change event on Enter.
        buffer: String,
    },

    /// The sink accepted a submission.
    Submitted {
        /// Outcome line shown to the user.
        message: String,
    },
}

impl Default for Screen {
    fn default() -> Self {
        Screen::form(0)
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    /// Enter: edit, toggle or cycle the focused field; commit an edit.
    Activate,
    /// Space on a checkbox.
    Toggle,
    /// Right arrow on a choice field.
    NextOption,
    /// Left arrow on a choice field.
    PrevOption,
    /// Typed character while editing.
    Input(char),
    Backspace,
    /// Ctrl+S.
    Submit,
    /// Esc: abandon the current edit.
    Cancel,
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
///
/// The effects boundary applies changes through the reducer and runs
/// effects; pure code only describes them.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this screen; the record is unchanged.
    Screen(Screen),
    /// Apply a field change, then return to the form at `cursor`.
    Change { change: FieldChange, cursor: usize },
    Quit,
    Effect(Effect),
}

/// Side effect requested by a pure transition.
#[derive(Debug, PartialEq)]
pub enum Effect {
    /// Read file metadata and, if acceptable, select it for `field`.
    SelectFile {
        cursor: usize,
        field: &'static str,
        path: String,
    },
    /// Submit the current record.
    Submit { cursor: usize },
    /// Discard the record and start over from defaults.
    NewSession,
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// Start a session with every field at its default.
    pub fn new(reducer: FormReducer) -> Self {
        let form = reducer.initial_state();
        App {
            reducer,
            form,
            screen: Screen::default(),
            submitted: 0,
            should_quit: false,
        }
    }

    pub fn schema(&self) -> &Schema {
        self.reducer.schema()
    }
}

impl Screen {
    /// Form screen without a notice.
    pub fn form(cursor: usize) -> Self {
        Screen::Form { cursor, notice: None }
    }

    pub fn form_with(cursor: usize, notice: Notice) -> Self {
        Screen::Form { cursor, notice: Some(notice) }
    }

    pub fn edit(cursor: usize, buffer: impl Into<String>) -> Self {
        Screen::Edit { cursor, buffer: buffer.into() }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Screen::Edit { .. })
    }
}

// ============================================================================
// TESTS
// ============================================================================
