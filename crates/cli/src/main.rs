// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Goalsplice CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use goalsplice::cli::{Cli, Command};
use goalsplice::error::ExitCode;

mod cmd_cache;
mod cmd_render;

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("GOALSPLICE_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("goalsplice: {}", e);
            match e.downcast_ref::<goalsplice::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Render(args)) => cmd_render::run(&cli, args),
        Some(Command::Goal(args)) => cmd_render::run_goal(&cli, args),
        Some(Command::Stats(args)) => cmd_cache::run_stats(&cli, args),
        Some(Command::Snapshot(args)) => cmd_cache::run_snapshot(&cli, args),
    }
}
