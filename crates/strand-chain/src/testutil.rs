//! Record builders shared by the unit tests.

use serde_json::json;
use strand_core::{MessageKind, TranscriptMessage};

pub(crate) fn user(id: &str, parent: Option<&str>) -> TranscriptMessage {
    TranscriptMessage::new(MessageKind::User)
        .with_id(id)
        .with_parent(parent)
}

pub(crate) fn assistant(id: &str, parent: Option<&str>) -> TranscriptMessage {
    TranscriptMessage::new(MessageKind::Assistant)
        .with_id(id)
        .with_parent(parent)
}

pub(crate) fn snapshot(message_id: &str) -> TranscriptMessage {
    TranscriptMessage::new(MessageKind::FileHistorySnapshot)
        .with_field("messageId", json!(message_id))
        .with_field("snapshot", json!({"trackedFileBackups": {}}))
}

pub(crate) fn summary(leaf_uuid: &str) -> TranscriptMessage {
    TranscriptMessage::new(MessageKind::Summary)
        .with_field("summary", json!("Earlier work"))
        .with_field("leafUuid", json!(leaf_uuid))
}

pub(crate) fn tool_call(id: &str, parent: Option<&str>, tool_use_ids: &[&str]) -> TranscriptMessage {
    let content: Vec<_> = tool_use_ids
        .iter()
        .map(|t| json!({"type": "tool_use", "id": t, "name": "Bash", "input": {}}))
        .collect();
    assistant(id, parent).with_field("message", json!({"role": "assistant", "content": content}))
}

pub(crate) fn tool_reply(id: &str, parent: Option<&str>, tool_use_ids: &[&str]) -> TranscriptMessage {
    let content: Vec<_> = tool_use_ids
        .iter()
        .map(|t| json!({"type": "tool_result", "tool_use_id": t, "content": "ok"}))
        .collect();
    user(id, parent).with_field("message", json!({"role": "user", "content": content}))
}

pub(crate) fn progress(id: &str, parent: Option<&str>, parent_tool_use: Option<&str>) -> TranscriptMessage {
    let mut msg = TranscriptMessage::new(MessageKind::Progress)
        .with_id(id)
        .with_parent(parent)
        .with_field("toolUseID", json!("bash-progress-0"));
    if let Some(t) = parent_tool_use {
        msg = msg.with_field("parentToolUseID", json!(t));
    }
    msg
}

/// `parentUuid` of the record with the given id.
pub(crate) fn parent_of<'a>(messages: &'a [TranscriptMessage], id: &str) -> Option<&'a str> {
    messages
        .iter()
        .find(|m| m.id.as_deref() == Some(id))
        .and_then(TranscriptMessage::parent_id)
        .map(|p| p.as_str())
}
