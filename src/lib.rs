//! profile-form: field-by-field state for employee and user-profile forms.

pub mod assign;
pub mod config;
pub mod error;
pub mod logging;
pub mod reducer;
pub mod report;
pub mod schema;
pub mod submit;
pub mod tui;
pub mod types;
