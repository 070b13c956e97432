//! The form state reducer: (FormState, FieldChange) → FormState.
//!
//! Pure functions only. The input record is never modified; every call
//! returns a new one that differs in at most the named field.

use tracing::{debug, warn};

use crate::error::FormError;
use crate::schema::{FieldKind, Schema};
use crate::types::{ChangePayload, FieldChange, FieldValue, FormState};

/// How the reducer treats events that don't fit the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReducerMode {
    /// Accept everything: unknown fields are added, mismatched payloads stored as-is.
    #[default]
    Lenient,
    /// Reject unknown fields and payloads that don't fit the field's kind.
    Strict,
}

/// Apply one change event, accepting anything.
pub fn apply_field_change(state: &FormState, change: &FieldChange) -> FormState {
    state.with(&change.field, payload_value(&change.payload))
}

/// The value a payload stores.
fn payload_value(payload: &ChangePayload) -> FieldValue {
    match payload {
        ChangePayload::Boolean(checked) => FieldValue::Bool(*checked),
        ChangePayload::File(selection) => FieldValue::File(selection.first().cloned()),
        ChangePayload::MultiText(raw) => FieldValue::List(split_list(raw)),
        ChangePayload::Text(raw) => FieldValue::Text(raw.clone()),
    }
}

/// Split a comma-delimited string into trimmed, non-empty items.
///
/// Order of appearance is kept; duplicates are not removed.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Whether a payload fits a field kind.
fn accepts(kind: &FieldKind, payload: &ChangePayload) -> bool {
    matches!(
        (kind, payload),
        (FieldKind::Text | FieldKind::Numeric | FieldKind::Enum { .. }, ChangePayload::Text(_))
            | (FieldKind::Boolean { .. }, ChangePayload::Boolean(_))
            | (FieldKind::Attachment, ChangePayload::File(_))
            | (FieldKind::MultiText, ChangePayload::MultiText(_))
    )
}

/// Reducer bound to a schema.
#[derive(Debug, Clone)]
pub struct FormReducer {
    schema: Schema,
    mode: ReducerMode,
}

impl FormReducer {
    pub fn new(schema: Schema, mode: ReducerMode) -> Self {
        FormReducer { schema, mode }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// A fresh session's record.
    pub fn initial_state(&self) -> FormState {
        self.schema.initial_state()
    }

    /// Apply one change event.
    ///
    /// # Errors
    /// In strict mode, returns `SchemaViolation` for a field the schema
    /// doesn't declare and `MalformedPayload` for a payload that doesn't
    /// fit the field's kind. Lenient mode never fails.
    pub fn apply(&self, state: &FormState, change: &FieldChange) -> Result<FormState, FormError> {
        if self.mode == ReducerMode::Strict {
            self.check(change).inspect_err(|e| warn!(error = %e, "rejected field change"))?;
        }
        let next = apply_field_change(state, change);
        debug!(field = %change.field, kind = change.payload.kind(), "applied field change");
        Ok(next)
    }

    fn check(&self, change: &FieldChange) -> Result<(), FormError> {
        let spec = self
            .schema
            .field(&change.field)
            .ok_or_else(|| FormError::SchemaViolation { field: change.field.clone() })?;

        if accepts(&spec.kind, &change.payload) {
            Ok(())
        } else {
            Err(FormError::MalformedPayload {
                field: change.field.clone(),
                expected: spec.kind,
                found: change.payload.kind(),
            })
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileRef, FormVariant};

    fn employee() -> FormState {
        Schema::for_variant(FormVariant::Employee).initial_state()
    }

    fn strict() -> FormReducer {
        FormReducer::new(Schema::for_variant(FormVariant::Employee), ReducerMode::Strict)
    }

    #[test]
    fn untouched_fields_are_carried_over() {
        let state = employee();
        let changes = [
            FieldChange::text("fullName", "Nguyen Van A"),
            FieldChange::checkbox("internalMail", true),
            FieldChange::multi_text("skills", "Rust"),
            FieldChange::file("profilePicture", vec![FileRef::new("a.png", None)]),
        ];
        for change in &changes {
            let next = apply_field_change(&state, change);
            for (name, value) in state.iter().filter(|(n, _)| *n != change.field) {
                assert_eq!(next.get(name), Some(value), "{} changed by {:?}", name, change);
            }
        }
    }

    #[test]
    fn checkbox_round_trip() {
        let state = employee();
        let on = apply_field_change(&state, &FieldChange::checkbox("internalMail", true));
        assert_eq!(on.get("internalMail"), Some(&FieldValue::Bool(true)));
        let off = apply_field_change(&on, &FieldChange::checkbox("internalMail", false));
        assert_eq!(off.get("internalMail"), Some(&FieldValue::Bool(false)));
        assert_eq!(off, state);
    }

    #[test]
    fn skills_are_split_trimmed_and_filtered() {
        let next = apply_field_change(&employee(), &FieldChange::multi_text("skills", "React, Node.js, , SQL"));
        assert_eq!(
            next.get("skills"),
            Some(&FieldValue::List(vec!["React".into(), "Node.js".into(), "SQL".into()]))
        );
    }

    #[test]
    fn empty_skills_input_is_empty_list() {
        let next = apply_field_change(&employee(), &FieldChange::multi_text("skills", ""));
        assert_eq!(next.get("skills"), Some(&FieldValue::List(vec![])));
    }

    #[test]
    fn skills_keep_duplicates_in_order() {
        assert_eq!(split_list("b, a ,b,,  "), vec!["b", "a", "b"]);
    }

    #[test]
    fn second_file_replaces_first() {
        let first = FileRef::new("first.png", Some(1));
        let second = FileRef::new("second.jpg", Some(2));
        let state = apply_field_change(&employee(), &FieldChange::file("profilePicture", vec![first]));
        let state = apply_field_change(&state, &FieldChange::file("profilePicture", vec![second.clone()]));
        assert_eq!(state.get("profilePicture"), Some(&FieldValue::File(Some(second))));
    }

    #[test]
    fn only_first_selected_file_is_kept() {
        let a = FileRef::new("a.png", None);
        let b = FileRef::new("b.png", None);
        let state = apply_field_change(&employee(), &FieldChange::file("profilePicture", vec![a.clone(), b]));
        assert_eq!(state.get("profilePicture"), Some(&FieldValue::File(Some(a))));
    }

    #[test]
    fn empty_selection_clears_file() {
        let state = apply_field_change(
            &employee(),
            &FieldChange::file("profilePicture", vec![FileRef::new("a.png", None)]),
        );
        let cleared = apply_field_change(&state, &FieldChange::file("profilePicture", vec![]));
        assert_eq!(cleared.get("profilePicture"), Some(&FieldValue::File(None)));
    }

    #[test]
    fn numeric_input_is_stored_verbatim() {
        let next = apply_field_change(&employee(), &FieldChange::text("salary", "0012"));
        assert_eq!(next.get("salary"), Some(&FieldValue::Text("0012".into())));
    }

    #[test]
    fn input_state_is_not_modified() {
        let state = employee();
        let before = state.clone();
        let _ = apply_field_change(&state, &FieldChange::text("email", "a@b.c"));
        assert_eq!(state, before);
    }

    #[test]
    fn lenient_accepts_unknown_fields_and_mismatches() {
        let reducer = FormReducer::new(Schema::for_variant(FormVariant::Employee), ReducerMode::Lenient);
        let state = reducer.initial_state();
        let next = reducer.apply(&state, &FieldChange::text("nickname", "x")).unwrap();
        assert_eq!(next.get("nickname"), Some(&FieldValue::Text("x".into())));
        let next = reducer.apply(&state, &FieldChange::text("isActive", "yes")).unwrap();
        assert_eq!(next.get("isActive"), Some(&FieldValue::Text("yes".into())));
    }

    #[test]
    fn strict_rejects_unknown_field() {
        let reducer = strict();
        let err = reducer.apply(&reducer.initial_state(), &FieldChange::text("nickname", "x")).unwrap_err();
        assert_eq!(err, FormError::SchemaViolation { field: "nickname".into() });
    }

    #[test]
    fn strict_rejects_mismatched_payload() {
        let reducer = strict();
        let err = reducer
            .apply(&reducer.initial_state(), &FieldChange::text("internalMail", "true"))
            .unwrap_err();
        assert_eq!(
            err,
            FormError::MalformedPayload {
                field: "internalMail".into(),
                expected: FieldKind::Boolean { default: false },
                found: "text",
            }
        );
    }

    #[test]
    fn strict_accepts_text_on_numeric_and_enum() {
        let reducer = strict();
        let state = reducer.initial_state();
        let state = reducer.apply(&state, &FieldChange::text("salary", "1500")).unwrap();
        let state = reducer.apply(&state, &FieldChange::text("role", "Analyst")).unwrap();
        assert_eq!(state.get("role"), Some(&FieldValue::Text("Analyst".into())));
    }

    #[test]
    fn strict_rejects_field_of_other_variant() {
        let reducer = strict();
        let err = reducer
            .apply(&reducer.initial_state(), &FieldChange::checkbox("policyConsent", true))
            .unwrap_err();
        assert!(matches!(err, FormError::SchemaViolation { .. }));
    }
}
