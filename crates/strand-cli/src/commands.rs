//! Subcommand implementations.
//!
//! Each command loads the transcript, runs the engine, and persists when
//! asked to. Rendering is separate so the outcomes can be tested directly.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use strand_chain::{
    ChainError, ChainRepair, DeleteTarget, Deletion, ProgressError, ToolUseResultError,
    ValidationReport, auto_repair_chain, delete_message_with_chain_repair, validate_chain,
    validate_progress_messages, validate_tool_use_result,
};
use strand_transcript::{TranscriptOptions, load_transcript, save_transcript};
use tracing::info;

/// All validator reports for one transcript.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOutcome {
    /// Parent chain linkage.
    pub chain: ValidationReport<ChainError>,
    /// Tool invocation/result pairing.
    pub tool_use: ValidationReport<ToolUseResultError>,
    /// Progress record ownership.
    pub progress: ValidationReport<ProgressError>,
}

impl ValidateOutcome {
    /// Whether every report is clean.
    pub fn is_valid(&self) -> bool {
        self.chain.valid && self.tool_use.valid && self.progress.valid
    }

    /// Total defects across all reports.
    pub fn error_count(&self) -> usize {
        self.chain.errors.len() + self.tool_use.errors.len() + self.progress.errors.len()
    }
}

/// Run every validator over the transcript at `path`.
pub fn validate(path: &Path, options: &TranscriptOptions) -> Result<ValidateOutcome> {
    let messages = load(path, options)?;
    Ok(ValidateOutcome {
        chain: validate_chain(&messages),
        tool_use: validate_tool_use_result(&messages),
        progress: validate_progress_messages(&messages),
    })
}

/// Repair the chain of the transcript at `path`.
///
/// The file is rewritten only when something changed and `dry_run` is off.
pub fn repair(path: &Path, dry_run: bool, options: &TranscriptOptions) -> Result<ChainRepair> {
    let messages = load(path, options)?;
    let result = auto_repair_chain(messages);
    if result.count() > 0 && !dry_run {
        save(path, &result.messages, options)?;
        info!(path = %path.display(), repairs = result.count(), "wrote repaired transcript");
    }
    Ok(result)
}

/// Delete one record from the transcript at `path`.
///
/// The file is rewritten only when a record was removed and `dry_run` is off.
pub fn delete(
    path: &Path,
    target: &DeleteTarget,
    dry_run: bool,
    options: &TranscriptOptions,
) -> Result<Deletion> {
    let messages = load(path, options)?;
    let result = delete_message_with_chain_repair(messages, target);
    if result.removed.is_some() && !dry_run {
        save(path, &result.messages, options)?;
        info!(path = %path.display(), relinked = result.relinked, "wrote transcript after deletion");
    }
    Ok(result)
}

fn load(path: &Path, options: &TranscriptOptions) -> Result<Vec<strand_core::TranscriptMessage>> {
    load_transcript(path, options)
        .with_context(|| format!("Failed to load transcript: {}", path.display()))
}

fn save(
    path: &Path,
    messages: &[strand_core::TranscriptMessage],
    options: &TranscriptOptions,
) -> Result<()> {
    save_transcript(path, messages, options)
        .with_context(|| format!("Failed to write transcript: {}", path.display()))
}

// ── Rendering ───────────────────────────────────────────────────────────────

/// Human-readable validation summary.
pub fn render_validate(outcome: &ValidateOutcome) -> String {
    if outcome.is_valid() {
        return "ok: no defects found\n".to_string();
    }
    let mut out = String::new();
    section(&mut out, "chain", &outcome.chain);
    section(&mut out, "tool use", &outcome.tool_use);
    section(&mut out, "progress", &outcome.progress);
    let _ = writeln!(out, "{} defect(s)", outcome.error_count());
    out
}

fn section<E: std::fmt::Display>(out: &mut String, title: &str, report: &ValidationReport<E>) {
    if report.valid {
        return;
    }
    let _ = writeln!(out, "{title}:");
    for error in &report.errors {
        let _ = writeln!(out, "  {error}");
    }
}

/// Human-readable repair summary.
pub fn render_repair(result: &ChainRepair, dry_run: bool) -> String {
    let mut out = String::new();
    for repair in &result.repairs {
        let previous = repair
            .previous_parent
            .as_ref()
            .map_or("<none>", |p| p.as_str());
        let _ = writeln!(
            out,
            "line {}: {} parent {} -> {}",
            repair.line, repair.id, previous, repair.new_parent
        );
    }
    let verb = if dry_run { "would repair" } else { "repaired" };
    let _ = writeln!(out, "{verb} {} link(s)", result.count());
    out
}

/// Human-readable deletion summary.
pub fn render_delete(result: &Deletion, dry_run: bool) -> String {
    match &result.removed {
        None => "target not found, nothing deleted\n".to_string(),
        Some(removed) => {
            let verb = if dry_run { "would delete" } else { "deleted" };
            let name = removed
                .id
                .as_ref()
                .map(|id| id.as_str())
                .or_else(|| removed.secondary_id())
                .unwrap_or("<unnamed>");
            format!(
                "{verb} {} {name}, relinked {} child(ren)\n",
                removed.kind, result.relinked
            )
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use strand_chain::Repair;
    use strand_core::{MessageKind, TranscriptMessage};

    #[test]
    fn render_clean_validation() {
        let outcome = ValidateOutcome {
            chain: ValidationReport::from_errors(vec![]),
            tool_use: ValidationReport::from_errors(vec![]),
            progress: ValidationReport::from_errors(vec![]),
        };
        assert_eq!(render_validate(&outcome), "ok: no defects found\n");
    }

    #[test]
    fn render_validation_lists_only_failing_sections() {
        let outcome = ValidateOutcome {
            chain: ValidationReport::from_errors(vec![ChainError::BrokenChain {
                id: "3".into(),
                line: 3,
            }]),
            tool_use: ValidationReport::from_errors(vec![]),
            progress: ValidationReport::from_errors(vec![]),
        };
        let text = render_validate(&outcome);
        assert!(text.contains("chain:\n  line 3: message 3 has no parent\n"));
        assert!(!text.contains("tool use:"));
        assert!(text.ends_with("1 defect(s)\n"));
    }

    #[test]
    fn render_repair_lines() {
        let result = ChainRepair {
            messages: vec![],
            repairs: vec![Repair {
                id: "3".into(),
                line: 3,
                previous_parent: None,
                new_parent: "2".into(),
            }],
        };
        assert_eq!(
            render_repair(&result, true),
            "line 3: 3 parent <none> -> 2\nwould repair 1 link(s)\n"
        );
    }

    #[test]
    fn render_delete_snapshot_uses_secondary_id() {
        let removed = TranscriptMessage::new(MessageKind::FileHistorySnapshot)
            .with_field("messageId", serde_json::json!("u1"));
        let result = Deletion {
            messages: vec![],
            removed: Some(removed),
            relinked: 0,
        };
        assert_eq!(
            render_delete(&result, false),
            "deleted file-history-snapshot u1, relinked 0 child(ren)\n"
        );
    }
}
