//! # strand-chain
//!
//! Integrity engine for transcript message chains.
//!
//! Validators are read-only and report defects as data:
//!
//! - [`validate_chain`]: `parentUuid` linkage among addressable records
//! - [`validate_tool_use_result`]: `tool_use` / `tool_result` pairing
//! - [`validate_progress_messages`]: progress records whose owner is gone
//!
//! Mutations take the sequence by value and hand it back with a summary of
//! what changed:
//!
//! - [`auto_repair_chain`]: relink defective parents to the nearest
//!   preceding addressable record
//! - [`delete_message_with_chain_repair`]: remove one record and splice its
//!   children onto its parent

#![deny(unsafe_code)]

pub mod chain;
pub mod delete;
pub mod progress;
pub mod repair;
pub mod report;
pub mod tool_use;

#[cfg(test)]
mod testutil;

pub use chain::{ChainError, validate_chain};
pub use delete::{DeleteTarget, Deletion, delete_message_with_chain_repair};
pub use progress::{ProgressError, validate_progress_messages};
pub use repair::{ChainRepair, Repair, auto_repair_chain};
pub use report::ValidationReport;
pub use tool_use::{ToolUseResultError, validate_tool_use_result};
