//! Progress record validation.
//!
//! Progress records are transient: they are written while a tool runs and
//! point at the record that owns them (`parentUuid`) and, for tool progress,
//! at the invocation they report on (`parentToolUseID`). After a deletion
//! either owner may be gone.

use std::collections::HashSet;

use serde::Serialize;
use strand_core::{MessageId, MessageKind, ToolUseId, TranscriptMessage};
use thiserror::Error;

use crate::report::{ValidationReport, line_of};

/// A progress record whose owner is missing.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ProgressError {
    /// `parentUuid` names a record absent from the transcript.
    #[error("line {line}: progress record references missing owner {owner_id}")]
    OrphanedProgress {
        /// The progress record's own id, if it has one.
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<MessageId>,
        /// The missing owner.
        owner_id: MessageId,
        /// 1-based position of the progress record.
        line: usize,
    },
    /// `parentToolUseID` names an invocation absent from the transcript.
    #[error("line {line}: progress record references missing tool invocation {tool_use_id}")]
    OrphanedProgressToolUse {
        /// The progress record's own id, if it has one.
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<MessageId>,
        /// The missing invocation.
        tool_use_id: ToolUseId,
        /// 1-based position of the progress record.
        line: usize,
    },
}

/// Validate that every progress record's owners are still present.
pub fn validate_progress_messages(
    messages: &[TranscriptMessage],
) -> ValidationReport<ProgressError> {
    let ids: HashSet<&str> = messages
        .iter()
        .filter_map(|m| m.id.as_ref().map(MessageId::as_str))
        .collect();
    let invocations: HashSet<ToolUseId> = messages
        .iter()
        .filter(|m| m.kind == MessageKind::Assistant)
        .flat_map(TranscriptMessage::tool_use_ids)
        .collect();

    let mut errors = Vec::new();
    for (index, msg) in messages.iter().enumerate() {
        if msg.kind != MessageKind::Progress {
            continue;
        }
        if let Some(owner) = msg.parent_id() {
            if !ids.contains(owner.as_str()) {
                errors.push(ProgressError::OrphanedProgress {
                    id: msg.id.clone(),
                    owner_id: owner.clone(),
                    line: line_of(index),
                });
            }
        }
        if let Some(tool_use_id) = msg.parent_tool_use_id() {
            if !invocations.contains(&tool_use_id) {
                errors.push(ProgressError::OrphanedProgressToolUse {
                    id: msg.id.clone(),
                    tool_use_id,
                    line: line_of(index),
                });
            }
        }
    }

    ValidationReport::from_errors(errors)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
