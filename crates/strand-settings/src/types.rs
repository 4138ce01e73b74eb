//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]` so a settings
//! file may name only the keys it changes.

use serde::{Deserialize, Serialize};

/// Smallest accepted `transcript.maxLineBytes`.
pub const MIN_LINE_BYTES: usize = 1024;
/// Largest accepted `transcript.maxLineBytes`.
pub const MAX_LINE_BYTES: usize = 256 * 1024 * 1024;

/// Root settings type.
///
/// ```json
/// {
///   "logging": { "level": "debug" },
///   "transcript": { "backup": false }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrandSettings {
    /// Logging configuration.
    pub logging: LoggingSettings,
    /// Transcript file handling.
    pub transcript: TranscriptSettings,
}

/// Logging configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Transcript load/save behavior.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranscriptSettings {
    /// Copy the existing file aside before overwriting it.
    pub backup: bool,
    /// Suffix appended to the transcript path for the backup copy.
    pub backup_suffix: String,
    /// Lines longer than this are rejected when loading.
    pub max_line_bytes: usize,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            backup: true,
            backup_suffix: ".bak".to_string(),
            max_line_bytes: 16 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = StrandSettings::default();
        assert_eq!(settings.logging.level, "warn");
        assert!(settings.transcript.backup);
        assert_eq!(settings.transcript.backup_suffix, ".bak");
        assert_eq!(settings.transcript.max_line_bytes, 16_777_216);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(StrandSettings::default()).unwrap();
        assert_eq!(json["transcript"]["backupSuffix"], ".bak");
        assert_eq!(json["transcript"]["maxLineBytes"], 16_777_216);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: StrandSettings =
            serde_json::from_str(r#"{"transcript": {"backup": false}}"#).unwrap();
        assert!(!settings.transcript.backup);
        assert_eq!(settings.transcript.backup_suffix, ".bak");
        assert_eq!(settings.logging.level, "warn");
    }
}
