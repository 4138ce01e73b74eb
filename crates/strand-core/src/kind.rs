//! The [`MessageKind`] enum: transcript record `type` discriminators.
//!
//! Transcript writers add new record kinds over time, so unknown strings are
//! kept verbatim in [`MessageKind::Other`] and written back unchanged. Only
//! the kinds the integrity checks care about get their own variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record kind, serialized as the `type` field of a transcript line.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageKind {
    /// User turn. Also carries `tool_result` blocks.
    User,
    /// Assistant (model) turn. Carries `tool_use` blocks.
    Assistant,
    /// System-injected record (hooks, compaction boundaries, errors).
    System,
    /// Transient progress record emitted while a tool runs.
    Progress,
    /// Conversation summary marker, keyed by `leafUuid`.
    Summary,
    /// File history snapshot marker, keyed by `messageId`.
    FileHistorySnapshot,
    /// Prompt queue bookkeeping record.
    QueueOperation,
    /// Any kind not listed above, kept verbatim.
    Other(String),
}

impl MessageKind {
    /// Wire string for this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
            Self::Progress => "progress",
            Self::Summary => "summary",
            Self::FileHistorySnapshot => "file-history-snapshot",
            Self::QueueOperation => "queue-operation",
            Self::Other(s) => s,
        }
    }

    /// Whether records of this kind take part in the parent chain.
    ///
    /// A record is addressable only if its kind qualifies **and** it
    /// carries an id.
    #[must_use]
    pub fn is_addressable_kind(&self) -> bool {
        matches!(self, Self::User | Self::Assistant)
    }

    /// Wire field holding the secondary identifier for this kind, if any.
    #[must_use]
    pub fn secondary_id_field(&self) -> Option<&'static str> {
        match self {
            Self::FileHistorySnapshot => Some("messageId"),
            Self::Summary => Some("leafUuid"),
            _ => None,
        }
    }
}

impl From<String> for MessageKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "user" => Self::User,
            "assistant" => Self::Assistant,
            "system" => Self::System,
            "progress" => Self::Progress,
            "summary" => Self::Summary,
            "file-history-snapshot" => Self::FileHistorySnapshot,
            "queue-operation" => Self::QueueOperation,
            _ => Self::Other(s),
        }
    }
}

impl From<MessageKind> for String {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
