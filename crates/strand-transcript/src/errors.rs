//! Error types for transcript I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or saving a transcript.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// Filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A line is not a valid transcript record.
    #[error("line {line}: {source}")]
    Parse {
        /// 1-based line number in the file.
        line: usize,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A line exceeds the configured size limit. Reading stops there.
    #[error("line {line}: longer than {max} bytes")]
    LineTooLong {
        /// 1-based line number in the file.
        line: usize,
        /// Configured limit.
        max: usize,
    },

    /// A record could not be serialized.
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The transcript file does not exist.
    #[error("transcript not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Convenience type alias for transcript results.
pub type Result<T> = std::result::Result<T, TranscriptError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
