//! Settings resolution for the binary.

use std::path::Path;

use anyhow::{Context, Result};
use strand_settings::{StrandSettings, load_settings_from_path};

/// Load settings from `explicit` if given, otherwise from `default_path`.
///
/// A missing file yields defaults. A file that exists but cannot be read,
/// parsed or validated is an error in both cases.
pub fn load_cli_settings(explicit: Option<&Path>, default_path: &Path) -> Result<StrandSettings> {
    let path = explicit.unwrap_or(default_path);
    load_settings_from_path(path)
        .with_context(|| format!("Failed to load settings: {}", path.display()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
