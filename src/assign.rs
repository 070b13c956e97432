//! `field=value` assignments from the command line.
//!
//! Turns each assignment into the change event the matching form input
//! would have emitted, using the schema to pick the input kind.

use std::path::Path;

use crate::error::AssignmentError;
use crate::schema::{FieldKind, Schema};
use crate::types::{FieldChange, FileRef};

/// Split `field=value` at the first `=`.
///
/// # Errors
/// Returns `Syntax` if there is no `=` or the field name is empty.
pub fn split_assignment(raw: &str) -> Result<(&str, &str), AssignmentError> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => Ok((field.trim(), value)),
        _ => Err(AssignmentError::Syntax(raw.to_string())),
    }
}

/// Parse a checkbox value.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Build the change event for one assignment.
///
/// Attachments are read from disk so the handle carries the file size;
/// an empty path is an empty selection. A field the schema doesn't
/// declare becomes a text change; the reducer's mode decides its fate.
///
/// # Errors
/// Returns an error for bad syntax, a non-boolean checkbox value, or an
/// unreadable attachment.
pub fn parse_assignment(schema: &Schema, raw: &str) -> Result<FieldChange, AssignmentError> {
    let (field, value) = split_assignment(raw)?;
    let Some(spec) = schema.field(field) else {
        return Ok(FieldChange::text(field, value));
    };

    let change = match spec.kind {
        FieldKind::Boolean { .. } => {
            let checked = parse_bool(value).ok_or_else(|| AssignmentError::NotBoolean {
                value: value.to_string(),
            })?;
            FieldChange::checkbox(field, checked)
        }
        FieldKind::Attachment if value.trim().is_empty() => FieldChange::file(field, Vec::new()),
        FieldKind::Attachment => {
            let path = Path::new(value.trim());
            let file = FileRef::from_disk(path).map_err(|source| AssignmentError::Attachment {
                path: path.to_path_buf(),
                source,
            })?;
            FieldChange::file(field, vec![file])
        }
        FieldKind::MultiText => FieldChange::multi_text(field, value),
        FieldKind::Text | FieldKind::Numeric | FieldKind::Enum { .. } => FieldChange::text(field, value),
    };

    Ok(change)
}

// ============================================================================
// TESTS
// ============================================================================
