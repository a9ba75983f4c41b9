// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Progress injection into pre-serialized challenge and goal JSON.
//!
//! Static documents are serialized once into a [`StaticCache`]. Each request
//! then splices per-user progress fields into those bytes with a single
//! string-aware scan, never parsing the documents into a tree.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod escape;
pub mod goal_id;
pub mod inject;
pub mod model;
pub mod progress;
pub mod response;
pub mod scan;
pub mod source;

pub use cache::{CacheStats, DocumentCache, StaticCache};
pub use config::{Config, SizingConfig};
pub use error::{Error, ExitCode, Result};
pub use inject::{inject_challenge, inject_goal};
pub use model::{Challenge, Goal};
pub use progress::{GoalStatus, Progress, ProgressLookup};
pub use response::ResponseBuilder;
pub use source::DocumentSource;

#[cfg(test)]
pub mod test_utils;
