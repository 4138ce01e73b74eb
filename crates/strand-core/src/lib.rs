//! # strand-core
//!
//! Foundation types shared by every strand crate.
//!
//! - **Branded IDs**: [`MessageId`] and [`ToolUseId`] newtypes for type safety
//! - **Record kinds**: [`MessageKind`] with a verbatim fallback for unknown kinds
//! - **Records**: [`TranscriptMessage`], one transcript line with lossless
//!   round-tripping of untouched fields
//! - **Logging**: [`logging::init_subscriber`] for binaries

#![deny(unsafe_code)]

pub mod ids;
pub mod kind;
pub mod logging;
pub mod message;

pub use ids::{MessageId, ToolUseId};
pub use kind::MessageKind;
pub use message::TranscriptMessage;
