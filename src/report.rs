//! Formatting for submissions and schema listings.
//!
//! Pure functions: (data, OutputFormat) → String. No I/O.

use humansize::{format_size, BINARY};
use serde_json::json;

use crate::schema::{FieldKind, Schema};
use crate::types::{FieldValue, FormVariant, OutputFormat, Submission};

/// Width of the label column in human output.
const LABEL_WIDTH: usize = 26;

/// Format a submission for output.
///
/// # Errors
/// Returns an error only if JSON encoding fails.
pub fn format_submission(submission: &Submission, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Human => Ok(submission_human(submission)),
        OutputFormat::Json => serde_json::to_string_pretty(submission),
    }
}

/// Format the schema of a variant.
///
/// # Errors
/// Returns an error only if JSON encoding fails.
pub fn format_schema(schema: &Schema, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Human => Ok(schema_human(schema)),
        OutputFormat::Json => {
            let displayed: Vec<&str> = schema.layout().iter().map(|f| f.name).collect();
            serde_json::to_string_pretty(&json!({
                "variant": schema.variant(),
                "fields": schema.fields(),
                "layout": displayed,
            }))
        }
    }
}

/// Display text for one value, as the form shows it.
pub fn display_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Bool(true) => "yes".to_string(),
        FieldValue::Bool(false) => "no".to_string(),
        FieldValue::File(Some(file)) => match file.size_bytes {
            Some(size) => format!("{} ({})", file.name, format_size(size, BINARY)),
            None => file.name.clone(),
        },
        FieldValue::File(None) => "(none)".to_string(),
        FieldValue::List(items) if items.is_empty() => "(none)".to_string(),
        other => other.to_string(),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn submission_human(submission: &Submission) -> String {
    let schema = Schema::for_variant(submission.form);
    let mut out = String::new();

    out.push_str(&format!("=== {} form submitted ===\n", title(&schema)));
    for (name, value) in submission.record.iter() {
        let label = schema.field(name).map_or(name, |f| f.label);
        out.push_str(&format!("{:<width$}{}\n", format!("{}:", label), display_value(value), width = LABEL_WIDTH));
    }

    out
}

fn schema_human(schema: &Schema) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} form ===\n", title(schema)));

    for spec in schema.fields() {
        let shown = schema.layout().iter().any(|f| f.name == spec.name);
        let mut line = format!("{:<16}{:<18}", spec.name, spec.kind.to_string());
        if spec.required {
            line.push_str("required  ");
        }
        if !shown {
            line.push_str("hidden  ");
        }
        match spec.kind {
            FieldKind::Enum { options } => {
                let values: Vec<&str> = options.iter().map(|o| o.value).collect();
                line.push_str(&format!("[{}]", values.join("|")));
            }
            FieldKind::Boolean { default } => line.push_str(&format!("default {}", default)),
            _ => {}
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn title(schema: &Schema) -> &'static str {
    match schema.variant() {
        FormVariant::Employee => "Employee",
        FormVariant::Profile => "User profile",
    }
}

// ============================================================================
// TESTS
// ============================================================================
