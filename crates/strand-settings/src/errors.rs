//! Settings error types.

use thiserror::Error;

/// Why a settings file could not be turned into [`StrandSettings`](crate::StrandSettings).
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file exists but could not be read.
    #[error("settings file unreadable: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not JSON, or a field has the wrong shape.
    #[error("settings file is not valid: {0}")]
    Json(#[from] serde_json::Error),
    /// A value parsed but is out of range, e.g. `transcript.maxLineBytes`.
    #[error("invalid settings value: {0}")]
    InvalidValue(String),
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
