//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`StrandSettings::default()`]
//! 2. If `~/.strand/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::types::{MAX_LINE_BYTES, MIN_LINE_BYTES, StrandSettings};

/// Resolve the path to the settings file (`~/.strand/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".strand").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<StrandSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. Invalid JSON or an
/// out-of-range value in the file is an error.
pub fn load_settings_from_path(path: &Path) -> Result<StrandSettings> {
    let mut merged = serde_json::to_value(StrandSettings::default())?;

    if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(&mut merged, user);
    } else {
        debug!(?path, "settings file not found, using defaults");
    }

    let mut settings: StrandSettings = serde_json::from_value(merged)?;
    validate(&settings)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

fn validate(settings: &StrandSettings) -> Result<()> {
    let max = settings.transcript.max_line_bytes;
    if !(MIN_LINE_BYTES..=MAX_LINE_BYTES).contains(&max) {
        return Err(SettingsError::InvalidValue(format!(
            "transcript.maxLineBytes {max} outside {MIN_LINE_BYTES}..={MAX_LINE_BYTES}"
        )));
    }
    if settings.transcript.backup_suffix.is_empty() {
        return Err(SettingsError::InvalidValue(
            "transcript.backupSuffix must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Merge `source` into `target` in place.
///
/// Objects merge key by key; anything else in `source` replaces the target
/// value. A `null` in `source` leaves the target value alone, so a user file
/// can write `"backupSuffix": null` to mean "use the default".
pub fn deep_merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, value) in source_map {
                if value.is_null() {
                    continue;
                }
                match target_map.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        let _ = target_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// - Booleans accept: `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`
/// - Integers must be valid and within the accepted range
/// - Invalid values are ignored with a warning (file/default value stays)
pub fn apply_env_overrides(settings: &mut StrandSettings) {
    if let Some(v) = read_env_string("STRAND_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = read_env_bool("STRAND_BACKUP") {
        settings.transcript.backup = v;
    }
    if let Some(v) = read_env_string("STRAND_BACKUP_SUFFIX") {
        settings.transcript.backup_suffix = v;
    }
    if let Some(v) = read_env_usize("STRAND_MAX_LINE_BYTES", MIN_LINE_BYTES, MAX_LINE_BYTES) {
        settings.transcript.max_line_bytes = v;
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    const TRUE: [&str; 4] = ["true", "1", "yes", "on"];
    const FALSE: [&str; 4] = ["false", "0", "no", "off"];
    let matches = |words: &[&str]| words.iter().any(|w| w.eq_ignore_ascii_case(val));
    if matches(&TRUE) {
        Some(true)
    } else if matches(&FALSE) {
        Some(false)
    } else {
        None
    }
}

/// Parse a string as a `usize` within an inclusive range.
pub fn parse_usize_range(val: &str, min: usize, max: usize) -> Option<usize> {
    let n: usize = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Env var readers ─────────────────────────────────────────────────────────

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_bool(name: &str) -> Option<bool> {
    let val = std::env::var(name).ok()?;
    let result = parse_bool(&val);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid boolean env var, ignoring");
    }
    result
}

fn read_env_usize(name: &str, min: usize, max: usize) -> Option<usize> {
    let val = std::env::var(name).ok()?;
    let result = parse_usize_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid usize env var, ignoring");
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── deep_merge ──────────────────────────────────────────────────

    fn merged(mut target: Value, source: Value) -> Value {
        deep_merge(&mut target, source);
        target
    }

    #[test]
    fn merge_nested_override() {
        let out = merged(
            serde_json::json!({"transcript": {"backup": true, "backupSuffix": ".bak"}}),
            serde_json::json!({"transcript": {"backup": false}}),
        );
        assert_eq!(out["transcript"]["backup"], false);
        assert_eq!(out["transcript"]["backupSuffix"], ".bak");
    }

    #[test]
    fn merge_null_keeps_default() {
        let out = merged(
            serde_json::json!({"transcript": {"backupSuffix": ".bak"}}),
            serde_json::json!({"transcript": {"backupSuffix": null}}),
        );
        assert_eq!(out["transcript"]["backupSuffix"], ".bak");
    }

    #[test]
    fn merge_unknown_keys_are_added() {
        let out = merged(serde_json::json!({"a": 1}), serde_json::json!({"b": 2}));
        assert_eq!(out, serde_json::json!({"a": 1, "b": 2}));
    }

    #[test]
    fn merge_scalar_replaces_section() {
        let out = merged(
            serde_json::json!({"logging": {"level": "warn"}}),
            serde_json::json!({"logging": "debug"}),
        );
        assert_eq!(out["logging"], "debug");
    }

    #[test]
    fn merge_empty_source_is_identity() {
        let target = serde_json::json!({"a": 1, "b": {"c": 2}});
        assert_eq!(merged(target.clone(), serde_json::json!({})), target);
    }

    // ── load_settings_from_path ─────────────────────────────────────

    #[test]
    fn load_missing_file_returns_defaults() {
        let settings = load_settings_from_path(Path::new("/nonexistent/settings.json")).unwrap();
        assert_eq!(settings.transcript, StrandSettings::default().transcript);
    }

    #[test]
    fn load_partial_json_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"transcript": {"backupSuffix": ".orig", "maxLineBytes": 4096}}"#,
        )
        .unwrap();

        let settings = load_settings_from_path(&path).unwrap();
        assert_eq!(settings.transcript.backup_suffix, ".orig");
        assert_eq!(settings.transcript.max_line_bytes, 4096);
        assert!(settings.transcript.backup);
    }

    #[test]
    fn load_invalid_json_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not valid json").unwrap();

        let result = load_settings_from_path(&path);
        assert!(matches!(result.unwrap_err(), SettingsError::Json(_)));
    }

    // ── parsing ─────────────────────────────────────────────────────

    #[test]
    fn parse_bool_variants() {
        for val in &["true", "1", "yes", "on", "TRUE", "On"] {
            assert_eq!(parse_bool(val), Some(true), "failed for {val}");
        }
        for val in &["false", "0", "no", "off", "FALSE", "Off"] {
            assert_eq!(parse_bool(val), Some(false), "failed for {val}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn parse_usize_bounds() {
        assert_eq!(
            parse_usize_range("1024", MIN_LINE_BYTES, MAX_LINE_BYTES),
            Some(1024)
        );
        assert_eq!(parse_usize_range("1023", MIN_LINE_BYTES, MAX_LINE_BYTES), None);
        assert_eq!(
            parse_usize_range("268435457", MIN_LINE_BYTES, MAX_LINE_BYTES),
            None
        );
        assert_eq!(parse_usize_range("lots", MIN_LINE_BYTES, MAX_LINE_BYTES), None);
    }
}
