// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Stats and snapshot command implementation.

use std::io::Write;

use goalsplice::cli::{Cli, OutputFormat, SnapshotArgs, StatsArgs};
use goalsplice::error::ExitCode;
use goalsplice::{DocumentCache, DocumentSource, Error};

use crate::cmd_render::{load_config, open_cache};

/// Run the stats command.
pub fn run_stats(cli: &Cli, args: &StatsArgs) -> anyhow::Result<ExitCode> {
    let config = load_config(cli)?;
    let stats = open_cache(&config, &args.source)?.stats();

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match args.output {
        OutputFormat::Text => {
            writeln!(handle, "challenges: {}", stats.challenges)?;
            writeln!(handle, "goals: {}", stats.goals)?;
            writeln!(handle, "bytes: {}", stats.total_bytes)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut handle, &stats)?;
            writeln!(handle)?;
        }
    }
    Ok(ExitCode::Success)
}

/// Run the snapshot command.
pub fn run_snapshot(cli: &Cli, args: &SnapshotArgs) -> anyhow::Result<ExitCode> {
    let config = load_config(cli)?;
    let definitions = args
        .definitions
        .clone()
        .or_else(|| config.cache.definitions.clone())
        .ok_or_else(|| {
            Error::Argument(
                "no definitions: pass --definitions or set cache.definitions in goalsplice.toml"
                    .to_string(),
            )
        })?;

    let cache = DocumentSource::Definitions(definitions).open()?;
    cache.persist(&args.out).map_err(Error::from)?;

    let stats = cache.stats();
    tracing::info!(
        path = %args.out.display(),
        challenges = stats.challenges,
        goals = stats.goals,
        "wrote snapshot"
    );
    eprintln!(
        "goalsplice: wrote {} challenges ({} goals) to {}",
        stats.challenges,
        stats.goals,
        args.out.display()
    );
    Ok(ExitCode::Success)
}
