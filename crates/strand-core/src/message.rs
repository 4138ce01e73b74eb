//! The [`TranscriptMessage`] struct: one line of a transcript.
//!
//! Only the fields the integrity checks read are typed: `type`, `uuid` and
//! `parentUuid`. Everything else stays in a JSON map. A record remembers the
//! key order it was read with and writes its fields back in that order, so
//! an untouched record re-encodes to the same bytes.
//!
//! `parentUuid` has three wire states (missing, `null`, a string). The record
//! remembers which one it saw; chain logic only sees
//! [`parent_id()`](TranscriptMessage::parent_id).

use std::collections::HashSet;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::ids::{MessageId, ToolUseId};
use crate::kind::MessageKind;

const TYPE: &str = "type";
const UUID: &str = "uuid";
const PARENT_UUID: &str = "parentUuid";

/// A single transcript record.
#[derive(Clone, Debug)]
pub struct TranscriptMessage {
    /// Record kind discriminator (`type`).
    pub kind: MessageKind,
    /// Record id (`uuid`). Unique within a transcript when present.
    pub id: Option<MessageId>,
    /// `None` when the field is missing, `Some(None)` when it is `null`.
    parent: Option<Option<MessageId>>,
    /// All remaining fields, untouched.
    pub extra: Map<String, Value>,
    /// Top-level keys in the order they were read.
    key_order: Vec<String>,
}

impl PartialEq for TranscriptMessage {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.id == other.id
            && self.parent == other.parent
            && self.extra == other.extra
    }
}

impl<'de> Deserialize<'de> for TranscriptMessage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut extra = Map::<String, Value>::deserialize(deserializer)?;
        let key_order = extra.keys().cloned().collect();

        let kind = match extra.remove(TYPE) {
            Some(Value::String(s)) => MessageKind::from(s),
            Some(other) => {
                return Err(D::Error::custom(format!(
                    "invalid `type`: expected a string, found {other}"
                )));
            }
            None => return Err(D::Error::missing_field(TYPE)),
        };
        let id = extra
            .remove(UUID)
            .map(Option::<MessageId>::deserialize)
            .transpose()
            .map_err(D::Error::custom)?
            .flatten();
        let parent = extra
            .remove(PARENT_UUID)
            .map(Option::<MessageId>::deserialize)
            .transpose()
            .map_err(D::Error::custom)?;

        Ok(Self {
            kind,
            id,
            parent,
            extra,
            key_order,
        })
    }
}

impl Serialize for TranscriptMessage {
    /// Writes keys in their original order, then any typed field that was
    /// absent on read, then any field added since.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        let mut written: HashSet<&str> = HashSet::new();
        let keys = self
            .key_order
            .iter()
            .map(String::as_str)
            .chain([TYPE, UUID, PARENT_UUID])
            .chain(self.extra.keys().map(String::as_str));

        for key in keys {
            if !written.insert(key) {
                continue;
            }
            match key {
                TYPE => map.serialize_entry(TYPE, &self.kind)?,
                UUID => {
                    if self.id.is_some() || self.key_order.iter().any(|k| k == UUID) {
                        map.serialize_entry(UUID, &self.id)?;
                    }
                }
                PARENT_UUID => {
                    if let Some(parent) = &self.parent {
                        map.serialize_entry(PARENT_UUID, parent)?;
                    }
                }
                other => {
                    if let Some(value) = self.extra.get(other) {
                        map.serialize_entry(other, value)?;
                    }
                }
            }
        }
        map.end()
    }
}

impl TranscriptMessage {
    /// Create an empty record of the given kind.
    #[must_use]
    pub fn new(kind: MessageKind) -> Self {
        Self {
            kind,
            id: None,
            parent: None,
            extra: Map::new(),
            key_order: Vec::new(),
        }
    }

    /// Builder: set the record id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<MessageId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder: set `parentUuid` (`None` writes an explicit `null`).
    #[must_use]
    pub fn with_parent(mut self, parent: Option<&str>) -> Self {
        self.set_parent_id(parent.map(MessageId::from));
        self
    }

    /// Builder: set an arbitrary untyped field.
    #[must_use]
    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        let _ = self.extra.insert(key.to_owned(), value);
        self
    }

    /// Whether this record takes part in the parent chain.
    #[must_use]
    pub fn is_addressable(&self) -> bool {
        self.kind.is_addressable_kind() && self.id.is_some()
    }

    /// The record id, but only for addressable records.
    #[must_use]
    pub fn addressable_id(&self) -> Option<&MessageId> {
        if self.kind.is_addressable_kind() {
            self.id.as_ref()
        } else {
            None
        }
    }

    /// The parent reference, treating a missing field and `null` alike.
    #[must_use]
    pub fn parent_id(&self) -> Option<&MessageId> {
        self.parent.as_ref().and_then(Option::as_ref)
    }

    /// Whether `parentUuid` was present on the wire (even as `null`).
    #[must_use]
    pub fn has_parent_field(&self) -> bool {
        self.parent.is_some()
    }

    /// Overwrite the parent reference. The field is always written back.
    pub fn set_parent_id(&mut self, parent: Option<MessageId>) {
        self.parent = Some(parent);
    }

    /// Secondary identifier for kinds without a `uuid`.
    ///
    /// `messageId` for file history snapshots, `leafUuid` for summaries.
    #[must_use]
    pub fn secondary_id(&self) -> Option<&str> {
        let field = self.kind.secondary_id_field()?;
        self.extra.get(field).and_then(Value::as_str)
    }

    /// Content blocks of the embedded API message (`message.content[]`).
    ///
    /// Plain-string content has no blocks.
    pub fn content_blocks(&self) -> impl Iterator<Item = &Value> {
        self.extra
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
    }

    /// Ids of `tool_use` blocks emitted by this record.
    #[must_use]
    pub fn tool_use_ids(&self) -> Vec<ToolUseId> {
        self.blocks_of_type("tool_use", "id")
    }

    /// Invocation ids referenced by `tool_result` blocks in this record.
    #[must_use]
    pub fn tool_result_ids(&self) -> Vec<ToolUseId> {
        self.blocks_of_type("tool_result", "tool_use_id")
    }

    /// Owning tool invocation of a progress record (`parentToolUseID`).
    #[must_use]
    pub fn parent_tool_use_id(&self) -> Option<ToolUseId> {
        self.extra
            .get("parentToolUseID")
            .and_then(Value::as_str)
            .map(ToolUseId::from)
    }

    fn blocks_of_type(&self, block_type: &str, id_field: &str) -> Vec<ToolUseId> {
        self.content_blocks()
            .filter(|block| block.get("type").and_then(Value::as_str) == Some(block_type))
            .filter_map(|block| block.get(id_field).and_then(Value::as_str))
            .map(ToolUseId::from)
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
