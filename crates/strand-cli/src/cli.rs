//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use strand_chain::DeleteTarget;

/// Validate and repair Claude Code transcript chains.
#[derive(Parser, Debug)]
#[command(name = "strand", version, about = "Transcript message-chain integrity tool")]
pub struct Cli {
    /// Settings file (defaults to `~/.strand/settings.json`).
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `strand_chain=trace`. `RUST_LOG` wins.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report chain, tool pairing and progress defects.
    Validate {
        /// Transcript file.
        file: PathBuf,
        /// Print the reports as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Relink broken and orphaned parents.
    Repair {
        /// Transcript file.
        file: PathBuf,
        /// Show the repairs without writing the file.
        #[arg(long)]
        dry_run: bool,
    },
    /// Remove one record and relink its children.
    Delete {
        /// Transcript file.
        file: PathBuf,
        /// Which record to remove.
        #[command(flatten)]
        target: TargetArgs,
        /// Show the result without writing the file.
        #[arg(long)]
        dry_run: bool,
    },
}

/// Exactly one deletion key.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    /// Record `uuid`.
    #[arg(long)]
    pub uuid: Option<String>,
    /// File history snapshot `messageId`.
    #[arg(long)]
    pub snapshot: Option<String>,
    /// Summary `leafUuid`.
    #[arg(long)]
    pub summary: Option<String>,
}

impl TargetArgs {
    /// The chosen key. clap guarantees exactly one is set.
    pub fn into_target(self) -> Option<DeleteTarget> {
        match (self.uuid, self.snapshot, self.summary) {
            (Some(id), None, None) => Some(DeleteTarget::Message(id.into())),
            (None, Some(id), None) => Some(DeleteTarget::Snapshot(id)),
            (None, None, Some(id)) => Some(DeleteTarget::Summary(id)),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
