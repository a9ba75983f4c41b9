// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Render and goal command implementation.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use goalsplice::cli::{Cli, GoalArgs, RenderArgs, SourceArgs};
use goalsplice::config::{self, Config};
use goalsplice::error::ExitCode;
use goalsplice::{DocumentSource, ProgressLookup, ResponseBuilder};

/// Run the render command.
pub fn run(cli: &Cli, args: &RenderArgs) -> anyhow::Result<ExitCode> {
    let config = load_config(cli)?;
    let builder = open_builder(&config, &args.source)?;
    let lookup = load_progress(args.progress.as_deref())?;

    let body = if args.single {
        let [id] = args.ids.as_slice() else {
            return Err(goalsplice::Error::Argument(
                "--single takes exactly one challenge ID".to_string(),
            )
            .into());
        };
        builder.build_single_challenge(id, &lookup)?
    } else {
        builder.build_challenges_response(&args.ids, &lookup)?
    };

    write_body(&body)?;
    Ok(ExitCode::Success)
}

/// Run the goal command.
pub fn run_goal(cli: &Cli, args: &GoalArgs) -> anyhow::Result<ExitCode> {
    let config = load_config(cli)?;
    let builder = open_builder(&config, &args.source)?;
    let lookup = load_progress(args.progress.as_deref())?;

    let body = builder.build_goal_response(&args.id, lookup.get(&args.id))?;
    write_body(&body)?;
    Ok(ExitCode::Success)
}

pub(crate) fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let cwd = std::env::current_dir()?;
    Ok(config::resolve(cli.config.as_deref(), &cwd)?)
}

pub(crate) fn open_cache(
    config: &Config,
    source: &SourceArgs,
) -> anyhow::Result<goalsplice::StaticCache> {
    let source = DocumentSource::resolve(
        source.definitions.as_deref(),
        source.snapshot.as_deref(),
        &config.cache,
    )?;
    Ok(source.open()?)
}

fn open_builder(config: &Config, source: &SourceArgs) -> anyhow::Result<ResponseBuilder> {
    let cache = open_cache(config, source)?;
    Ok(ResponseBuilder::new(Some(Arc::new(cache))).with_sizing(config.response))
}

fn load_progress(path: Option<&Path>) -> anyhow::Result<ProgressLookup> {
    match path {
        Some(path) => Ok(ProgressLookup::load(path)?),
        None => Ok(ProgressLookup::new()),
    }
}

fn write_body(body: &[u8]) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(body)?;
    writeln!(handle)?;
    handle.flush()?;
    Ok(())
}
