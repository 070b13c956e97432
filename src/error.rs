//! Error types.
//!
//! Every error here is recoverable: the caller keeps its previous state
//! and reports the problem.

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::FieldKind;

/// Rejections raised by the strict reducer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field `{field}`")]
    SchemaViolation { field: String },

    #[error("field `{field}` expects {expected} input, got a {found} change")]
    MalformedPayload {
        field: String,
        expected: FieldKind,
        found: &'static str,
    },
}

/// A sink failed to accept a submission.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write submission: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode submission: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Config file problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A `field=value` assignment that cannot become a change event.
#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("expected `field=value`, got `{0}`")]
    Syntax(String),

    #[error("`{value}` is not a boolean (use true/false)")]
    NotBoolean { value: String },

    #[error("cannot attach {}: {source}", path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
