//! Transcript files on disk.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use strand_core::TranscriptMessage;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::{Result, TranscriptError};
use crate::jsonl::{read_transcript, to_jsonl};
use crate::options::TranscriptOptions;

/// Load every record of the transcript at `path`.
pub fn load_transcript(
    path: &Path,
    options: &TranscriptOptions,
) -> Result<Vec<TranscriptMessage>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => TranscriptError::NotFound(path.to_path_buf()),
        _ => TranscriptError::Io(e),
    })?;
    debug!(?path, "loading transcript");
    read_transcript(BufReader::new(file), options)
}

/// Write `messages` to `path`, replacing its contents.
///
/// With `options.backup` set and an existing file at `path`, the file is
/// first copied to `path + backup_suffix`. The new contents go to a
/// uniquely named temporary file in the same directory, which is then
/// renamed over `path`, so readers see either the old or the new
/// transcript and the backup is never the temporary file.
pub fn save_transcript(
    path: &Path,
    messages: &[TranscriptMessage],
    options: &TranscriptOptions,
) -> Result<()> {
    let encoded = to_jsonl(messages)?;

    if options.backup && path.exists() {
        let backup = with_suffix(path, &options.backup_suffix);
        let _ = std::fs::copy(path, &backup)?;
        info!(?backup, "backed up transcript");
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(encoded.as_bytes())?;
    tmp.as_file().sync_all()?;
    if let Ok(meta) = std::fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    let _ = tmp.persist(path).map_err(|e| e.error)?;
    debug!(?path, records = messages.len(), "saved transcript");
    Ok(())
}

/// `path` with `suffix` appended to its final component.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
