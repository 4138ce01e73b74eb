//! # strand
//!
//! Validate, repair and edit Claude Code transcript chains.
//!
//! Exit status: 0 on success, 1 when `validate` finds defects, 2 on any
//! failure to load, parse or write.

#![deny(unsafe_code)]

use std::process::ExitCode;

use anyhow::{Result, anyhow};
use clap::Parser;
use strand_cli::commands::{self, render_delete, render_repair, render_validate};
use strand_cli::config::load_cli_settings;
use strand_cli::{Cli, Command};
use strand_settings::{get_settings, init_settings, settings_path};
use strand_transcript::TranscriptOptions;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Returns `Ok(false)` when validation found defects.
fn run(cli: Cli) -> Result<bool> {
    let loaded = load_cli_settings(cli.settings.as_deref(), &settings_path())?;
    let _ = init_settings(loaded);
    let settings = get_settings();
    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&settings.logging.level);
    strand_core::logging::init_subscriber(level);

    let options = TranscriptOptions::from(&settings.transcript);
    match cli.command {
        Command::Validate { file, json } => {
            let outcome = commands::validate(&file, &options)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print!("{}", render_validate(&outcome));
            }
            Ok(outcome.is_valid())
        }
        Command::Repair { file, dry_run } => {
            let result = commands::repair(&file, dry_run, &options)?;
            print!("{}", render_repair(&result, dry_run));
            Ok(true)
        }
        Command::Delete {
            file,
            target,
            dry_run,
        } => {
            let target = target
                .into_target()
                .ok_or_else(|| anyhow!("exactly one of --uuid, --snapshot, --summary is required"))?;
            let result = commands::delete(&file, &target, dry_run, &options)?;
            print!("{}", render_delete(&result, dry_run));
            Ok(true)
        }
    }
}
