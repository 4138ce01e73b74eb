//! Chain validation: parent-linkage defects among addressable records.
//!
//! A transcript's addressable records (user/assistant turns with a `uuid`)
//! must form a chain in file order: each one's `parentUuid` names the
//! addressable record right before it. Non-addressable records in between
//! are skipped.
//!
//! The first addressable record is exempt from every check, because a
//! transcript may continue a compacted session whose earlier records were
//! pruned. A later record whose parent names a *known, earlier* record
//! other than its immediate predecessor is a branch point (a retried or
//! rewound turn, or a link through a system/progress record) and is
//! accepted.

use std::collections::HashSet;

use serde::Serialize;
use strand_core::{MessageId, TranscriptMessage};
use thiserror::Error;

use crate::report::{ValidationReport, line_of};

/// A parent-linkage defect.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ChainError {
    /// A non-first addressable record has no parent reference at all.
    #[error("line {line}: message {id} has no parent")]
    BrokenChain {
        /// The defective record.
        id: MessageId,
        /// 1-based position in the sequence.
        line: usize,
    },
    /// A non-first addressable record names a parent not seen earlier.
    #[error("line {line}: message {id} references unknown parent {parent_id}")]
    OrphanParent {
        /// The defective record.
        id: MessageId,
        /// The dangling reference.
        parent_id: MessageId,
        /// 1-based position in the sequence.
        line: usize,
    },
}

impl ChainError {
    /// Id of the defective record.
    #[must_use]
    pub fn id(&self) -> &MessageId {
        match self {
            Self::BrokenChain { id, .. } | Self::OrphanParent { id, .. } => id,
        }
    }

    /// 1-based position of the defective record.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::BrokenChain { line, .. } | Self::OrphanParent { line, .. } => *line,
        }
    }
}

/// A defect together with what a repair needs to fix it.
pub(crate) struct Finding {
    /// Index of the defective record in the sequence.
    pub index: usize,
    /// Id of the nearest preceding addressable record.
    pub previous: MessageId,
    pub error: ChainError,
}

/// Validate the parent chain of a transcript.
pub fn validate_chain(messages: &[TranscriptMessage]) -> ValidationReport<ChainError> {
    let errors = scan(messages).into_iter().map(|f| f.error).collect();
    ValidationReport::from_errors(errors)
}

/// Single pass shared by validation and repair.
pub(crate) fn scan(messages: &[TranscriptMessage]) -> Vec<Finding> {
    let mut findings = Vec::new();
    // Ids of every record seen so far, addressable or not.
    let mut known: HashSet<&str> = HashSet::new();
    let mut previous: Option<&MessageId> = None;

    for (index, msg) in messages.iter().enumerate() {
        if let Some(id) = msg.addressable_id() {
            if let Some(prev) = previous {
                let error = match msg.parent_id() {
                    None => Some(ChainError::BrokenChain {
                        id: id.clone(),
                        line: line_of(index),
                    }),
                    Some(parent) if parent == prev || known.contains(parent.as_str()) => None,
                    Some(parent) => Some(ChainError::OrphanParent {
                        id: id.clone(),
                        parent_id: parent.clone(),
                        line: line_of(index),
                    }),
                };
                if let Some(error) = error {
                    findings.push(Finding {
                        index,
                        previous: prev.clone(),
                        error,
                    });
                }
            }
            previous = Some(id);
        }
        if let Some(id) = &msg.id {
            let _ = known.insert(id.as_str());
        }
    }

    findings
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
