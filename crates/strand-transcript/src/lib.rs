//! # strand-transcript
//!
//! Load and save Claude Code transcript files (`*.jsonl`), one
//! [`TranscriptMessage`](strand_core::TranscriptMessage) per line.
//!
//! Records round-trip losslessly: fields the engine never reads are written
//! back exactly as they were loaded.

#![deny(unsafe_code)]

pub mod errors;
pub mod io;
pub mod jsonl;
pub mod options;

pub use errors::{Result, TranscriptError};
pub use io::{load_transcript, save_transcript, with_suffix};
pub use jsonl::{parse_transcript, read_transcript, to_jsonl};
pub use options::TranscriptOptions;
