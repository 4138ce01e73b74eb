//! Tool invocation/result pairing.
//!
//! Every `tool_use` block an assistant record emits should be answered by a
//! `tool_result` block in a later record, and every `tool_result` must
//! answer an earlier invocation. This check reads message content only and
//! never consults the parent chain.

use std::collections::HashSet;

use serde::Serialize;
use strand_core::{MessageKind, ToolUseId, TranscriptMessage};
use thiserror::Error;

use crate::report::{ValidationReport, line_of};

/// A tool pairing defect.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ToolUseResultError {
    /// A result references an invocation that was never emitted before it.
    #[error("line {line}: tool result for unknown invocation {tool_use_id}")]
    OrphanedToolResult {
        /// The referenced invocation id.
        tool_use_id: ToolUseId,
        /// 1-based position of the record carrying the result.
        line: usize,
    },
    /// An invocation never received a result.
    #[error("line {line}: tool invocation {tool_use_id} has no result")]
    MissingToolResult {
        /// The unanswered invocation id.
        tool_use_id: ToolUseId,
        /// 1-based position of the invoking assistant record.
        line: usize,
    },
}

/// Validate tool invocation/result pairing across a transcript.
///
/// Orphaned results are reported in file order, followed by unanswered
/// invocations in the order they were emitted.
pub fn validate_tool_use_result(
    messages: &[TranscriptMessage],
) -> ValidationReport<ToolUseResultError> {
    let mut errors = Vec::new();
    let mut invoked: HashSet<ToolUseId> = HashSet::new();
    // (invocation, line of the invoking record) in emission order
    let mut invocations: Vec<(ToolUseId, usize)> = Vec::new();
    let mut answered: HashSet<ToolUseId> = HashSet::new();

    for (index, msg) in messages.iter().enumerate() {
        // Results first: an invocation is only answered by a *later* record.
        for tool_use_id in msg.tool_result_ids() {
            if invoked.contains(&tool_use_id) {
                let _ = answered.insert(tool_use_id);
            } else {
                errors.push(ToolUseResultError::OrphanedToolResult {
                    tool_use_id,
                    line: line_of(index),
                });
            }
        }

        if msg.kind == MessageKind::Assistant {
            for tool_use_id in msg.tool_use_ids() {
                if invoked.insert(tool_use_id.clone()) {
                    invocations.push((tool_use_id, line_of(index)));
                }
            }
        }
    }

    errors.extend(
        invocations
            .into_iter()
            .filter(|(tool_use_id, _)| !answered.contains(tool_use_id))
            .map(|(tool_use_id, line)| ToolUseResultError::MissingToolResult { tool_use_id, line }),
    );

    ValidationReport::from_errors(errors)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{assistant, snapshot, tool_call, tool_reply, user};
    use assert_matches::assert_matches;

    #[test]
    fn paired_tool_use_is_valid() {
        let messages = vec![
            user("1", None),
            tool_call("2", Some("1"), &["toolu_1", "toolu_2"]),
            tool_reply("3", Some("2"), &["toolu_1"]),
            tool_reply("4", Some("3"), &["toolu_2"]),
            assistant("5", Some("4")),
        ];
        let report = validate_tool_use_result(&messages);
        assert!(report.valid, "{:?}", report.errors);
    }

    #[test]
    fn result_without_invocation_is_orphaned() {
        let messages = vec![
            user("1", None),
            assistant("2", Some("1")),
            tool_reply("3", Some("2"), &["toolu_missing"]),
        ];
        let report = validate_tool_use_result(&messages);
        assert_eq!(
            report.errors,
            vec![ToolUseResultError::OrphanedToolResult {
                tool_use_id: "toolu_missing".into(),
                line: 3,
            }]
        );
    }

    #[test]
    fn result_before_invocation_is_orphaned() {
        let messages = vec![
            tool_reply("1", None, &["toolu_1"]),
            tool_call("2", Some("1"), &["toolu_1"]),
        ];
        let report = validate_tool_use_result(&messages);
        assert_eq!(report.errors.len(), 2);
        assert_matches!(
            &report.errors[0],
            ToolUseResultError::OrphanedToolResult { line: 1, .. }
        );
        assert_matches!(
            &report.errors[1],
            ToolUseResultError::MissingToolResult { line: 2, .. }
        );
    }

    #[test]
    fn unanswered_invocation_is_reported_at_invoking_line() {
        let messages = vec![
            user("1", None),
            snapshot("1"),
            tool_call("2", Some("1"), &["toolu_1"]),
        ];
        let report = validate_tool_use_result(&messages);
        assert_eq!(
            report.errors,
            vec![ToolUseResultError::MissingToolResult {
                tool_use_id: "toolu_1".into(),
                line: 3,
            }]
        );
    }

    #[test]
    fn tool_use_in_user_record_is_not_an_invocation() {
        // Only assistant records invoke tools.
        let odd = user("1", None).with_field(
            "message",
            serde_json::json!({"content": [{"type": "tool_use", "id": "toolu_x", "name": "Bash", "input": {}}]}),
        );
        let messages = vec![odd, tool_reply("2", Some("1"), &["toolu_x"])];
        let report = validate_tool_use_result(&messages);
        assert_matches!(
            &report.errors[..],
            [ToolUseResultError::OrphanedToolResult { .. }]
        );
    }

    #[test]
    fn ignores_parent_chain_state() {
        let messages = vec![
            user("1", None),
            tool_call("2", None, &["toolu_1"]),
            tool_reply("3", Some("gone"), &["toolu_1"]),
        ];
        assert!(validate_tool_use_result(&messages).is_valid());
    }

    #[test]
    fn error_serializes_with_type_tag() {
        let err = ToolUseResultError::OrphanedToolResult {
            tool_use_id: "toolu_1".into(),
            line: 4,
        };
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({"type": "orphaned_tool_result", "toolUseId": "toolu_1", "line": 4})
        );
    }
}
