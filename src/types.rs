//! Domain types for profile-form.
//!
//! The record a form session edits (`FormState`), the values it holds,
//! and the change events that drive the reducer.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Extensions accepted by the picture field.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "svg", "tif", "tiff"];

/// Handle to a file the user selected for an attachment field.
///
/// Opaque to the reducer: it is stored and replaced, never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRef {
    /// Location of the selected file.
    pub path: PathBuf,
    /// File name component, for display.
    pub name: String,
    /// Size at selection time, if known.
    pub size_bytes: Option<u64>,
}

impl FileRef {
    /// Build a handle without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>, size_bytes: Option<u64>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        FileRef { path, name, size_bytes }
    }

    /// Select a file from disk, recording its size.
    ///
    /// # Errors
    /// Returns an error if the path does not exist or is not a regular file.
    pub fn from_disk(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        if !meta.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        Ok(FileRef::new(path, Some(meta.len())))
    }

    /// Whether the extension looks like an image (the picker's `image/*` filter).
    pub fn is_image(&self) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }
}

// ============================================================================
// ENUMS
// ============================================================================

/// Which of the two form layouts a session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormVariant {
    /// Full employee record: personal details plus employment.
    #[default]
    Employee,
    /// User profile: employment details plus policy consent.
    Profile,
}

impl fmt::Display for FormVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormVariant::Employee => write!(f, "employee"),
            FormVariant::Profile => write!(f, "profile"),
        }
    }
}

/// A field's current value.
///
/// Serialized untagged so a record renders as a flat JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Free text, an enum choice, or raw numeric input stored verbatim.
    Text(String),
    /// Numeric default before any edit.
    Number(u64),
    /// Checkbox / toggle.
    Bool(bool),
    /// Multi-value text (skills).
    List(Vec<String>),
    /// Attachment: `None` = nothing selected.
    File(Option<FileRef>),
}

impl FieldValue {
    /// True for values a required-field check treats as "not filled in".
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) => false,
            FieldValue::Bool(b) => !b,
            FieldValue::List(items) => items.is_empty(),
            FieldValue::File(f) => f.is_none(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::List(items) => write!(f, "{}", items.join(", ")),
            FieldValue::File(Some(file)) => write!(f, "{}", file.name),
            FieldValue::File(None) => Ok(()),
        }
    }
}

/// Kind-appropriate raw payload of a field-change event.
///
/// The variant doubles as the input kind: text and number inputs send
/// `Text`, checkboxes `Boolean`, file pickers `File`, the skills box
/// `MultiText`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangePayload {
    /// Raw string from a text, number, date, select or radio input.
    Text(String),
    /// Checked state of a checkbox.
    Boolean(bool),
    /// The picker's selection list (possibly empty).
    File(Vec<FileRef>),
    /// Raw comma-delimited string.
    MultiText(String),
}

impl ChangePayload {
    /// Input kind name, as the event source would tag it.
    pub fn kind(&self) -> &'static str {
        match self {
            ChangePayload::Text(_) => "text",
            ChangePayload::Boolean(_) => "checkbox",
            ChangePayload::File(_) => "file",
            ChangePayload::MultiText(_) => "multi-text",
        }
    }
}

// ============================================================================
// STRUCTS
// ============================================================================

/// One field-change event: a named field and its new raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: String,
    pub payload: ChangePayload,
}

impl FieldChange {
    pub fn text(field: impl Into<String>, value: impl Into<String>) -> Self {
        FieldChange { field: field.into(), payload: ChangePayload::Text(value.into()) }
    }

    pub fn checkbox(field: impl Into<String>, checked: bool) -> Self {
        FieldChange { field: field.into(), payload: ChangePayload::Boolean(checked) }
    }

    pub fn file(field: impl Into<String>, selection: Vec<FileRef>) -> Self {
        FieldChange { field: field.into(), payload: ChangePayload::File(selection) }
    }

    pub fn multi_text(field: impl Into<String>, raw: impl Into<String>) -> Self {
        FieldChange { field: field.into(), payload: ChangePayload::MultiText(raw.into()) }
    }
}

/// The record a form session edits.
///
/// Entries keep the schema's declaration order. Values are never
/// updated in place: [`FormState::with`] returns a new record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    entries: Vec<(String, FieldValue)>,
}

impl FormState {
    pub fn from_entries(entries: Vec<(String, FieldValue)>) -> Self {
        FormState { entries }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(name, _)| name == field).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(name, v)| (name.as_str(), v))
    }

    /// A copy of this record with `field` set to `value`.
    ///
    /// Unknown names are appended at the end.
    pub fn with(&self, field: &str, value: FieldValue) -> FormState {
        let mut entries = self.entries.clone();
        match entries.iter_mut().find(|(name, _)| name == field) {
            Some((_, slot)) => *slot = value,
            None => entries.push((field.to_string(), value)),
        }
        FormState { entries }
    }
}

impl Serialize for FormState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A submitted snapshot: the variant and its full record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub form: FormVariant,
    pub record: FormState,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for submissions and schema listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable aligned output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// TESTS
// ============================================================================
