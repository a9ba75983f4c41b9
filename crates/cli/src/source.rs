// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Selection of where static documents are loaded from.

use std::path::{Path, PathBuf};

use crate::cache::StaticCache;
use crate::config::CacheConfig;
use crate::error::{Error, Result};
use crate::model::load_challenges;

/// Origin of the static documents for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Challenge definitions JSON, serialized at warm-up.
    Definitions(PathBuf),
    /// Postcard snapshot of an already warmed cache.
    Snapshot(PathBuf),
}

impl DocumentSource {
    /// Pick the source: command-line flags first, then `[cache]` config
    /// (snapshot before definitions).
    pub fn resolve(
        definitions: Option<&Path>,
        snapshot: Option<&Path>,
        config: &CacheConfig,
    ) -> Result<Self> {
        if let Some(path) = snapshot {
            return Ok(Self::Snapshot(path.to_path_buf()));
        }
        if let Some(path) = definitions {
            return Ok(Self::Definitions(path.to_path_buf()));
        }
        if let Some(path) = &config.snapshot {
            return Ok(Self::Snapshot(path.clone()));
        }
        if let Some(path) = &config.definitions {
            return Ok(Self::Definitions(path.clone()));
        }
        Err(Error::Argument(
            "no document source: pass --definitions or --snapshot, or set [cache] in goalsplice.toml"
                .to_string(),
        ))
    }

    /// Load a warmed cache from this source.
    pub fn open(&self) -> Result<StaticCache> {
        match self {
            Self::Definitions(path) => {
                let challenges = load_challenges(path)?;
                tracing::debug!(
                    path = %path.display(),
                    challenges = challenges.len(),
                    "loaded definitions"
                );
                StaticCache::from_challenges(&challenges)
            }
            Self::Snapshot(path) => StaticCache::from_snapshot(path),
        }
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
