// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Render challenge responses with per-user goal progress
#[derive(Parser)]
#[command(name = "goalsplice")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "GOALSPLICE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render challenges with progress injected
    Render(RenderArgs),
    /// Render a single goal with progress injected
    Goal(GoalArgs),
    /// Show document cache statistics
    Stats(StatsArgs),
    /// Write a cache snapshot from challenge definitions
    Snapshot(SnapshotArgs),
}

/// Where static documents are loaded from.
#[derive(clap::Args, Default)]
pub struct SourceArgs {
    /// Challenge definitions JSON file
    #[arg(long, short = 'd', value_name = "FILE")]
    pub definitions: Option<PathBuf>,

    /// Cache snapshot written by `goalsplice snapshot`
    #[arg(long, value_name = "FILE", conflicts_with = "definitions")]
    pub snapshot: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct RenderArgs {
    /// Challenge IDs, in response order
    #[arg(value_name = "ID")]
    pub ids: Vec<String>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Progress records JSON file (array of records)
    #[arg(long, short = 'p', value_name = "FILE")]
    pub progress: Option<PathBuf>,

    /// Render the single challenge document instead of the envelope
    #[arg(long)]
    pub single: bool,
}

#[derive(clap::Args)]
pub struct GoalArgs {
    /// Goal ID
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Progress records JSON file (array of records)
    #[arg(long, short = 'p', value_name = "FILE")]
    pub progress: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct SnapshotArgs {
    /// Snapshot file to write
    #[arg(value_name = "OUT")]
    pub out: PathBuf,

    /// Challenge definitions JSON file
    #[arg(long, short = 'd', value_name = "FILE")]
    pub definitions: Option<PathBuf>,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
