//! # strand-cli
//!
//! Library half of the `strand` binary: argument definitions and the
//! subcommand implementations, kept out of `main.rs` so integration tests
//! can drive them against temporary files.

#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command, TargetArgs};
