//! Log output setup.
//!
//! One-shot commands log to stderr. The interactive form owns the
//! terminal, so it logs to a file instead.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;

use crate::config::APP_DIR;

/// Log file name within the data directory.
const LOG_FILENAME: &str = "profile-form.log";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Default log file: `<data dir>/profile-form/profile-form.log`.
pub fn default_log_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(LOG_FILENAME)
}

/// Install the global subscriber.
///
/// # Errors
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(level: Level, target: &LogTarget) -> io::Result<()> {
    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(io::stderr)
            .with_target(false)
            .try_init(),
        LogTarget::File(path) => tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(Mutex::new(open_log_file(path)?))
            .with_ansi(false)
            .try_init(),
    };
    installed.map_err(io::Error::other)
}

/// Open `path` for appending, creating parent directories.
fn open_log_file(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

// ============================================================================
// TESTS
// ============================================================================
