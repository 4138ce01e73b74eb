//! Chain repair: point every defective `parentUuid` at the nearest
//! preceding addressable record.
//!
//! Repair only ever rewrites `parentUuid`, never `uuid`, so the repairs of
//! one pass are independent and can be applied in file order. The exempt
//! first addressable record is never touched.

use serde::Serialize;
use strand_core::{MessageId, TranscriptMessage};
use tracing::{debug, info, instrument};

use crate::chain::scan;
use crate::report::line_of;

/// One applied parent rewrite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Repair {
    /// The repaired record.
    pub id: MessageId,
    /// 1-based position in the sequence.
    pub line: usize,
    /// Parent before repair (`None` for a missing/null parent).
    pub previous_parent: Option<MessageId>,
    /// Parent after repair.
    pub new_parent: MessageId,
}

/// Result of [`auto_repair_chain`]: the sequence handed back plus what changed.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainRepair {
    /// The (possibly) repaired sequence. Same records, same order.
    pub messages: Vec<TranscriptMessage>,
    /// Applied repairs, in file order.
    pub repairs: Vec<Repair>,
}

impl ChainRepair {
    /// Number of records whose `parentUuid` changed.
    #[must_use]
    pub fn count(&self) -> usize {
        self.repairs.len()
    }
}

/// Repair every `broken_chain` and `orphan_parent` defect.
///
/// Takes ownership of the sequence and returns it, so no caller can observe
/// a half-repaired alias. A valid chain comes back unchanged with a count
/// of zero; running the repair twice is a no-op the second time.
#[instrument(skip_all, fields(records = messages.len()))]
pub fn auto_repair_chain(mut messages: Vec<TranscriptMessage>) -> ChainRepair {
    let findings = scan(&messages);
    let mut repairs = Vec::with_capacity(findings.len());

    for finding in findings {
        let msg = &mut messages[finding.index];
        let previous_parent = msg.parent_id().cloned();
        msg.set_parent_id(Some(finding.previous.clone()));

        debug!(
            id = %finding.error.id(),
            line = line_of(finding.index),
            previous = ?previous_parent,
            new_parent = %finding.previous,
            "repaired parent link"
        );
        repairs.push(Repair {
            id: finding.error.id().clone(),
            line: line_of(finding.index),
            previous_parent,
            new_parent: finding.previous,
        });
    }

    if !repairs.is_empty() {
        info!(repairs = repairs.len(), "chain repaired");
    }
    ChainRepair { messages, repairs }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
