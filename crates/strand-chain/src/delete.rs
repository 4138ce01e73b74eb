//! Chain-preserving deletion.
//!
//! Removing a record from the middle of a chain would orphan its children.
//! [`delete_message_with_chain_repair`] removes the record and splices its
//! children onto its former parent, one hop shorter.
//!
//! File history snapshots carry the `uuid` of the user turn they belong to
//! in their `messageId`, so a bare identifier is ambiguous between the turn
//! and its snapshot. [`DeleteTarget`] names the record kind along with the
//! identifier.

use serde::{Deserialize, Serialize};
use strand_core::{MessageId, MessageKind, TranscriptMessage};
use tracing::{debug, info, instrument};

/// Lookup key for the record to delete.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DeleteTarget {
    /// Any record with this `uuid`.
    Message(MessageId),
    /// A `file-history-snapshot` record with this `messageId`.
    Snapshot(String),
    /// A `summary` record with this `leafUuid`.
    Summary(String),
}

impl DeleteTarget {
    /// Whether `msg` is the record this key names.
    #[must_use]
    pub fn matches(&self, msg: &TranscriptMessage) -> bool {
        match self {
            Self::Message(id) => msg.id.as_ref() == Some(id),
            Self::Snapshot(id) => {
                msg.kind == MessageKind::FileHistorySnapshot && msg.secondary_id() == Some(id.as_str())
            }
            Self::Summary(id) => {
                msg.kind == MessageKind::Summary && msg.secondary_id() == Some(id.as_str())
            }
        }
    }
}

/// Result of [`delete_message_with_chain_repair`].
#[derive(Clone, Debug, PartialEq)]
pub struct Deletion {
    /// The sequence without the removed record.
    pub messages: Vec<TranscriptMessage>,
    /// The removed record, or `None` if the target was not found.
    pub removed: Option<TranscriptMessage>,
    /// Number of children whose `parentUuid` was rewritten.
    pub relinked: usize,
}

/// Remove the first record matching `target` and relink its children.
///
/// Every remaining addressable record whose parent was the removed record
/// now points at the removed record's own parent. When the removed record
/// was the first addressable one, its children become first-in-chain and
/// fall under the same exemption. A target that is not found is a no-op.
#[instrument(skip(messages), fields(records = messages.len()))]
pub fn delete_message_with_chain_repair(
    mut messages: Vec<TranscriptMessage>,
    target: &DeleteTarget,
) -> Deletion {
    let Some(index) = messages.iter().position(|m| target.matches(m)) else {
        debug!("delete target not found");
        return Deletion {
            messages,
            removed: None,
            relinked: 0,
        };
    };

    let removed = messages.remove(index);
    let mut relinked = 0;

    if let Some(removed_id) = &removed.id {
        let grandparent = removed.parent_id().cloned();
        for child in messages
            .iter_mut()
            .filter(|m| m.is_addressable() && m.parent_id() == Some(removed_id))
        {
            debug!(
                child = ?child.id,
                new_parent = ?grandparent,
                "relinked child of deleted record"
            );
            child.set_parent_id(grandparent.clone());
            relinked += 1;
        }
    }

    info!(kind = %removed.kind, relinked, "deleted record");
    Deletion {
        messages,
        removed: Some(removed),
        relinked,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
