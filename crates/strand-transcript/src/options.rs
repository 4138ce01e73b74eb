//! Per-call transcript I/O options.

use strand_settings::TranscriptSettings;

/// Options for [`load_transcript`](crate::load_transcript) and
/// [`save_transcript`](crate::save_transcript).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptOptions {
    /// Copy the existing file to `path + backup_suffix` before overwriting.
    pub backup: bool,
    /// Suffix for the backup copy.
    pub backup_suffix: String,
    /// Reject lines longer than this many bytes.
    pub max_line_bytes: usize,
}

impl Default for TranscriptOptions {
    fn default() -> Self {
        Self::from(&TranscriptSettings::default())
    }
}

impl From<&TranscriptSettings> for TranscriptOptions {
    fn from(settings: &TranscriptSettings) -> Self {
        Self {
            backup: settings.backup,
            backup_suffix: settings.backup_suffix.clone(),
            max_line_bytes: settings.max_line_bytes,
        }
    }
}

impl TranscriptOptions {
    /// Same options with backups turned off.
    #[must_use]
    pub fn without_backup(mut self) -> Self {
        self.backup = false;
        self
    }
}
