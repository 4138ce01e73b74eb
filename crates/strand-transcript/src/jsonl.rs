//! JSONL encoding: one record per line.

use std::io::{BufRead, Read};

use strand_core::TranscriptMessage;
use tracing::debug;

use crate::errors::{Result, TranscriptError};
use crate::options::TranscriptOptions;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read JSONL records from `reader`, in order.
///
/// Lines are read one at a time and never buffered past
/// `options.max_line_bytes` (plus a line terminator). Blank lines are
/// skipped. Line numbers in errors count every physical line, blank or
/// not, starting at 1. A UTF-8 byte order mark before the first line is
/// ignored.
pub fn read_transcript<R: BufRead>(
    mut reader: R,
    options: &TranscriptOptions,
) -> Result<Vec<TranscriptMessage>> {
    let max = options.max_line_bytes;
    // room for the longest accepted line plus "\r\n"
    let cap = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(2);
    let mut buf = Vec::new();
    let mut messages = Vec::new();
    let mut line = 0;

    loop {
        buf.clear();
        let read = reader.by_ref().take(cap).read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }
        line += 1;

        let mut bytes = buf.as_slice();
        if line == 1 {
            bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        }
        bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
        bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);

        if bytes.len() > max {
            return Err(TranscriptError::LineTooLong { line, max });
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let msg = serde_json::from_slice(bytes)
            .map_err(|source| TranscriptError::Parse { line, source })?;
        messages.push(msg);
    }

    debug!(records = messages.len(), lines = line, "read transcript");
    Ok(messages)
}

/// Parse JSONL text held in memory. See [`read_transcript`].
pub fn parse_transcript(
    text: &str,
    options: &TranscriptOptions,
) -> Result<Vec<TranscriptMessage>> {
    read_transcript(text.as_bytes(), options)
}

/// Encode records as JSONL with a trailing newline.
///
/// An empty sequence encodes to an empty string.
pub fn to_jsonl(messages: &[TranscriptMessage]) -> Result<String> {
    let mut out = String::new();
    for msg in messages {
        out.push_str(&serde_json::to_string(msg)?);
        out.push('\n');
    }
    Ok(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
