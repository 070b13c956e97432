//! Pure state transitions: (Screen, Action) → Transition.
//!
//! Fully testable without a terminal. Each screen defines which actions
//! it accepts; anything else returns the current screen unchanged.
//! Field values are read from the record but never written here: edits
//! come back as `Transition::Change` for the reducer to apply.

use crate::schema::{EnumOption, FieldKind, FieldSpec, Schema};
use crate::types::{FieldChange, FieldValue, FormState};

use super::state::{Action, Effect, Notice, Screen, Transition};

/// Pure state transition function.
pub fn update(screen: Screen, action: &Action, schema: &Schema, form: &FormState) -> Transition {
    match screen {
        Screen::Form { cursor, notice } => update_form(cursor, notice, action, schema, form),
        Screen::Edit { cursor, buffer } => update_edit(cursor, buffer, action, schema),
        Screen::Submitted { .. } => update_submitted(screen, action),
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Form: navigation, toggles, choices, entering edit mode, submit.
fn update_form(
    cursor: usize,
    notice: Option<Notice>,
    action: &Action,
    schema: &Schema,
    form: &FormState,
) -> Transition {
    let len = schema.layout().len();
    let Some(spec) = schema.layout().get(cursor).copied() else {
        return match action {
            Action::Quit => Transition::Quit,
            _ => Transition::Screen(Screen::form(0)),
        };
    };
    let current = form.get(spec.name);

    match action {
        Action::MoveUp => Transition::Screen(Screen::form(cursor.saturating_sub(1))),
        Action::MoveDown => {
            let new_cursor = if len == 0 { 0 } else { (cursor + 1).min(len - 1) };
            Transition::Screen(Screen::form(new_cursor))
        }
        Action::Activate => match spec.kind {
            FieldKind::Boolean { .. } => toggle(spec, current, cursor),
            FieldKind::Enum { options } => cycle(spec, options, current, cursor, true),
            _ => Transition::Screen(Screen::edit(cursor, edit_text(current))),
        },
        Action::Toggle => match spec.kind {
            FieldKind::Boolean { .. } => toggle(spec, current, cursor),
            _ => Transition::Screen(Screen::Form { cursor, notice }),
        },
        Action::NextOption | Action::PrevOption => {
            let forward = *action == Action::NextOption;
            match spec.kind {
                FieldKind::Enum { options } => cycle(spec, options, current, cursor, forward),
                FieldKind::Boolean { .. } => Transition::Change {
                    change: FieldChange::checkbox(spec.name, forward),
                    cursor,
                },
                _ => Transition::Screen(Screen::Form { cursor, notice }),
            }
        }
        Action::Submit => {
            let missing = schema.missing_required(form);
            match missing.first() {
                None => Transition::Effect(Effect::Submit { cursor }),
                Some(first) => {
                    let labels: Vec<&str> = missing.iter().map(|f| f.label).collect();
                    let first_index = schema
                        .layout()
                        .iter()
                        .position(|f| f.name == first.name)
                        .unwrap_or(cursor);
                    Transition::Screen(Screen::form_with(
                        first_index,
                        Notice::Error(format!("Please fill in: {}", labels.join(", "))),
                    ))
                }
            }
        }
        Action::Cancel => Transition::Screen(Screen::form(cursor)),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Form { cursor, notice }),
    }
}

/// Edit: typing, commit on Enter, abandon on Esc.
fn update_edit(cursor: usize, mut buffer: String, action: &Action, schema: &Schema) -> Transition {
    let Some(spec) = schema.layout().get(cursor).copied() else {
        return Transition::Screen(Screen::form(0));
    };

    match action {
        Action::Input(c) => {
            // Numeric inputs take digits only, so values stay non-negative.
            if spec.kind != FieldKind::Numeric || c.is_ascii_digit() {
                buffer.push(*c);
            }
            Transition::Screen(Screen::Edit { cursor, buffer })
        }
        Action::Backspace => {
            buffer.pop();
            Transition::Screen(Screen::Edit { cursor, buffer })
        }
        Action::Activate => commit(spec, buffer, cursor),
        Action::Cancel => Transition::Screen(Screen::form(cursor)),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Edit { cursor, buffer }),
    }
}

/// Submitted: Enter starts a fresh session, quit exits.
fn update_submitted(screen: Screen, action: &Action) -> Transition {
    match action {
        Action::Activate => Transition::Effect(Effect::NewSession),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(screen),
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn toggle(spec: &FieldSpec, current: Option<&FieldValue>, cursor: usize) -> Transition {
    let checked = matches!(current, Some(FieldValue::Bool(true)));
    Transition::Change {
        change: FieldChange::checkbox(spec.name, !checked),
        cursor,
    }
}

/// Move to the next (or previous) allowed value, wrapping around.
/// Nothing chosen yet starts at the first (or last) option.
fn cycle(
    spec: &FieldSpec,
    options: &[EnumOption],
    current: Option<&FieldValue>,
    cursor: usize,
    forward: bool,
) -> Transition {
    if options.is_empty() {
        return Transition::Screen(Screen::form(cursor));
    }
    let position = match current {
        Some(FieldValue::Text(value)) => options.iter().position(|o| o.value == value.as_str()),
        _ => None,
    };
    let next = match (position, forward) {
        (Some(i), true) => (i + 1) % options.len(),
        (Some(i), false) => (i + options.len() - 1) % options.len(),
        (None, true) => 0,
        (None, false) => options.len() - 1,
    };
    Transition::Change {
        change: FieldChange::text(spec.name, options[next].value),
        cursor,
    }
}

/// Initial edit buffer for a field: its current value as typed text.
/// An untouched numeric default starts empty.
fn edit_text(current: Option<&FieldValue>) -> String {
    match current {
        Some(FieldValue::Number(0)) => String::new(),
        Some(FieldValue::File(Some(file))) => file.path.display().to_string(),
        Some(FieldValue::List(items)) => items.join(", "),
        Some(value) => value.to_string(),
        None => String::new(),
    }
}

/// Turn a finished edit into the change event its input kind emits.
fn commit(spec: &'static FieldSpec, buffer: String, cursor: usize) -> Transition {
    let change = match spec.kind {
        FieldKind::MultiText => FieldChange::multi_text(spec.name, buffer),
        FieldKind::Attachment if buffer.trim().is_empty() => FieldChange::file(spec.name, Vec::new()),
        FieldKind::Attachment => {
            return Transition::Effect(Effect::SelectFile {
                cursor,
                field: spec.name,
                path: buffer.trim().to_string(),
            });
        }
        _ => FieldChange::text(spec.name, buffer),
    };
    Transition::Change { change, cursor }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileRef, FormVariant};

    fn employee() -> (Schema, FormState) {
        let schema = Schema::for_variant(FormVariant::Employee);
        let form = schema.initial_state();
        (schema, form)
    }

    fn index_of(schema: &Schema, name: &str) -> usize {
        schema.layout().iter().position(|f| f.name == name).unwrap()
    }

    // -- Form --

    #[test]
    fn cursor_moves_and_clamps() {
        let (schema, form) = employee();
        let last = schema.layout().len() - 1;
        assert_eq!(update(Screen::form(0), &Action::MoveUp, &schema, &form), Transition::Screen(Screen::form(0)));
        assert_eq!(update(Screen::form(0), &Action::MoveDown, &schema, &form), Transition::Screen(Screen::form(1)));
        assert_eq!(
            update(Screen::form(last), &Action::MoveDown, &schema, &form),
            Transition::Screen(Screen::form(last))
        );
    }

    #[test]
    fn moving_clears_notice() {
        let (schema, form) = employee();
        let screen = Screen::form_with(1, Notice::Info("saved".into()));
        assert_eq!(update(screen, &Action::MoveDown, &schema, &form), Transition::Screen(Screen::form(2)));
    }

    #[test]
    fn activate_on_checkbox_toggles() {
        let (schema, form) = employee();
        let cursor = index_of(&schema, "isActive");
        assert_eq!(
            update(Screen::form(cursor), &Action::Activate, &schema, &form),
            Transition::Change { change: FieldChange::checkbox("isActive", false), cursor }
        );
    }

    #[test]
    fn space_toggles_checkbox_only() {
        let (schema, form) = employee();
        let mail = index_of(&schema, "internalMail");
        assert_eq!(
            update(Screen::form(mail), &Action::Toggle, &schema, &form),
            Transition::Change { change: FieldChange::checkbox("internalMail", true), cursor: mail }
        );
        let name = index_of(&schema, "fullName");
        assert_eq!(update(Screen::form(name), &Action::Toggle, &schema, &form), Transition::Screen(Screen::form(name)));
    }

    #[test]
    fn enum_cycles_through_allowed_values() {
        let (schema, form) = employee();
        let cursor = index_of(&schema, "role");
        let first = update(Screen::form(cursor), &Action::NextOption, &schema, &form);
        assert_eq!(first, Transition::Change { change: FieldChange::text("role", "Developer"), cursor });

        let form = form.with("role", FieldValue::Text("Associate".into()));
        assert_eq!(
            update(Screen::form(cursor), &Action::NextOption, &schema, &form),
            Transition::Change { change: FieldChange::text("role", "Developer"), cursor }
        );
        assert_eq!(
            update(Screen::form(cursor), &Action::PrevOption, &schema, &form),
            Transition::Change { change: FieldChange::text("role", "Analyst"), cursor }
        );
    }

    #[test]
    fn enum_prev_from_nothing_picks_last() {
        let (schema, form) = employee();
        let cursor = index_of(&schema, "maritalStatus");
        assert_eq!(
            update(Screen::form(cursor), &Action::PrevOption, &schema, &form),
            Transition::Change { change: FieldChange::text("maritalStatus", "married"), cursor }
        );
    }

    #[test]
    fn activate_on_text_opens_editor_with_current_value() {
        let (schema, form) = employee();
        let cursor = index_of(&schema, "fullName");
        let form = form.with("fullName", FieldValue::Text("An".into()));
        assert_eq!(update(Screen::form(cursor), &Action::Activate, &schema, &form), Transition::Screen(Screen::edit(cursor, "An")));
    }

    #[test]
    fn skills_editor_starts_with_joined_list() {
        let (schema, form) = employee();
        let cursor = index_of(&schema, "skills");
        let form = form.with("skills", FieldValue::List(vec!["React".into(), "SQL".into()]));
        assert_eq!(
            update(Screen::form(cursor), &Action::Activate, &schema, &form),
            Transition::Screen(Screen::edit(cursor, "React, SQL"))
        );
    }

    #[test]
    fn picture_editor_starts_with_path() {
        let (schema, form) = employee();
        let cursor = index_of(&schema, "profilePicture");
        let form = form.with("profilePicture", FieldValue::File(Some(FileRef::new("/tmp/me.png", None))));
        assert_eq!(
            update(Screen::form(cursor), &Action::Activate, &schema, &form),
            Transition::Screen(Screen::edit(cursor, "/tmp/me.png"))
        );
    }

    #[test]
    fn esc_on_form_clears_notice() {
        let (schema, form) = employee();
        let screen = Screen::form_with(3, Notice::Error("Please fill in: Role".into()));
        assert_eq!(update(screen, &Action::Cancel, &schema, &form), Transition::Screen(Screen::form(3)));
    }

    #[test]
    fn salary_editor_starts_empty_at_default() {
        let (schema, form) = employee();
        let cursor = index_of(&schema, "salary");
        assert_eq!(update(Screen::form(cursor), &Action::Activate, &schema, &form), Transition::Screen(Screen::edit(cursor, "")));

        let typed = "1500".chars().fold(Screen::edit(cursor, ""), |screen, c| {
            match update(screen, &Action::Input(c), &schema, &form) {
                Transition::Screen(next) => next,
                other => panic!("Expected edit screen, got {:?}", other),
            }
        });
        assert_eq!(
            update(typed, &Action::Activate, &schema, &form),
            Transition::Change { change: FieldChange::text("salary", "1500"), cursor }
        );
    }

    #[test]
    fn salary_editor_starts_with_entered_value() {
        let (schema, form) = employee();
        let cursor = index_of(&schema, "salary");
        let form = form.with("salary", FieldValue::Text("1200".into()));
        assert_eq!(update(Screen::form(cursor), &Action::Activate, &schema, &form), Transition::Screen(Screen::edit(cursor, "1200")));
    }

    #[test]
    fn submit_with_missing_fields_jumps_to_first() {
        let (schema, form) = employee();
        match update(Screen::form(5), &Action::Submit, &schema, &form) {
            Transition::Screen(Screen::Form { cursor, notice: Some(Notice::Error(msg)) }) => {
                assert_eq!(cursor, index_of(&schema, "fullName"));
                assert!(msg.contains("Full name"));
                assert!(msg.contains("Contract type"));
            }
            other => panic!("Expected Form with error, got {:?}", other),
        }
    }

    #[test]
    fn submit_with_required_fields_filled_emits_effect() {
        let schema = Schema::for_variant(FormVariant::Profile);
        let form = schema
            .initial_state()
            .with("role", FieldValue::Text("Manager".into()))
            .with("contractType", FieldValue::Text("Full-time".into()))
            .with("policyConsent", FieldValue::Bool(true));
        assert_eq!(
            update(Screen::form(3), &Action::Submit, &schema, &form),
            Transition::Effect(Effect::Submit { cursor: 3 })
        );
    }

    #[test]
    fn quit_from_form() {
        let (schema, form) = employee();
        assert_eq!(update(Screen::form(0), &Action::Quit, &schema, &form), Transition::Quit);
    }

    // -- Edit --

    #[test]
    fn typing_and_backspace() {
        let (schema, form) = employee();
        let cursor = index_of(&schema, "fullName");
        let t = update(Screen::edit(cursor, "A"), &Action::Input('n'), &schema, &form);
        assert_eq!(t, Transition::Screen(Screen::edit(cursor, "An")));
        let t = update(Screen::edit(cursor, "An"), &Action::Backspace, &schema, &form);
        assert_eq!(t, Transition::Screen(Screen::edit(cursor, "A")));
    }

    #[test]
    fn numeric_editor_ignores_non_digits() {
        let (schema, form) = employee();
        let cursor = index_of(&schema, "salary");
        assert_eq!(
            update(Screen::edit(cursor, "12"), &Action::Input('-'), &schema, &form),
            Transition::Screen(Screen::edit(cursor, "12"))
        );
        assert_eq!(
            update(Screen::edit(cursor, "12"), &Action::Input('5'), &schema, &form),
            Transition::Screen(Screen::edit(cursor, "125"))
        );
    }

    #[test]
    fn commit_text_emits_text_change() {
        let (schema, form) = employee();
        let cursor = index_of(&schema, "salary");
        assert_eq!(
            update(Screen::edit(cursor, "1500"), &Action::Activate, &schema, &form),
            Transition::Change { change: FieldChange::text("salary", "1500"), cursor }
        );
    }

    #[test]
    fn commit_skills_emits_multi_text_change() {
        let (schema, form) = employee();
        let cursor = index_of(&schema, "skills");
        assert_eq!(
            update(Screen::edit(cursor, "React, , SQL"), &Action::Activate, &schema, &form),
            Transition::Change { change: FieldChange::multi_text("skills", "React, , SQL"), cursor }
        );
    }

    #[test]
    fn commit_picture_path_requests_file_selection() {
        let (schema, form) = employee();
        let cursor = index_of(&schema, "profilePicture");
        assert_eq!(
            update(Screen::edit(cursor, " /tmp/me.png "), &Action::Activate, &schema, &form),
            Transition::Effect(Effect::SelectFile { cursor, field: "profilePicture", path: "/tmp/me.png".into() })
        );
    }

    #[test]
    fn commit_empty_picture_path_clears_selection() {
        let (schema, form) = employee();
        let cursor = index_of(&schema, "profilePicture");
        assert_eq!(
            update(Screen::edit(cursor, ""), &Action::Activate, &schema, &form),
            Transition::Change { change: FieldChange::file("profilePicture", vec![]), cursor }
        );
    }

    #[test]
    fn cancel_leaves_record_untouched() {
        let (schema, form) = employee();
        assert_eq!(update(Screen::edit(2, "draft"), &Action::Cancel, &schema, &form), Transition::Screen(Screen::form(2)));
    }

    #[test]
    fn submit_is_ignored_while_editing() {
        let (schema, form) = employee();
        assert_eq!(
            update(Screen::edit(1, "x"), &Action::Submit, &schema, &form),
            Transition::Screen(Screen::edit(1, "x"))
        );
    }

    // -- Submitted --

    #[test]
    fn submitted_enter_starts_new_session() {
        let (schema, form) = employee();
        let screen = Screen::Submitted { message: "ok".into() };
        assert_eq!(update(screen, &Action::Activate, &schema, &form), Transition::Effect(Effect::NewSession));
    }

    #[test]
    fn submitted_quit() {
        let (schema, form) = employee();
        let screen = Screen::Submitted { message: "ok".into() };
        assert_eq!(update(screen, &Action::Quit, &schema, &form), Transition::Quit);
    }
}
