// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Static document cache.
//!
//! Challenge and goal definitions are serialized once at warm-up and held as
//! shared immutable bytes. Readers get an `Arc<[u8]>` clone, so no shard lock
//! is held while a response is being built.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use aho_corasick::AhoCorasick;
use dashmap::DashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Challenge;
use crate::scan::rfind_byte;

/// Snapshot format version.
/// v1: Initial postcard layout (challenges with goal ids, goals).
pub const SNAPSHOT_VERSION: u32 = 1;

/// Keys the injector appends; a static document must not carry them.
pub const RESERVED_KEYS: [&str; 4] = [
    "\"progress\"",
    "\"status\"",
    "\"completedAt\"",
    "\"claimedAt\"",
];

/// Read path of the document cache consumed by the response builder.
pub trait DocumentCache: Send + Sync {
    /// Pre-serialized challenge document.
    fn challenge_json(&self, id: &str) -> Option<Arc<[u8]>>;

    /// Pre-serialized goal document.
    fn goal_json(&self, id: &str) -> Option<Arc<[u8]>>;

    /// Number of goals in a challenge (0 if unknown).
    fn goal_count(&self, id: &str) -> usize;

    fn stats(&self) -> CacheStats;
}

/// Cache population statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of challenge documents.
    pub challenges: usize,
    /// Number of goal documents.
    pub goals: usize,
    /// Bytes held across all documents.
    pub total_bytes: usize,
}

/// Error type for snapshot operations.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Postcard(#[from] postcard::Error),

    /// Snapshot version mismatch.
    #[error("snapshot version mismatch (found {found}, expected {})", SNAPSHOT_VERSION)]
    VersionMismatch { found: u32 },

    /// Written by a different goalsplice version.
    #[error("snapshot written by goalsplice {found}")]
    CrateVersionMismatch { found: String },
}

impl From<SnapshotError> for Error {
    fn from(err: SnapshotError) -> Self {
        Error::Snapshot(err.to_string())
    }
}

#[derive(Debug, Clone)]
struct ChallengeEntry {
    json: Arc<[u8]>,
    goal_ids: Vec<String>,
}

/// Challenge document ready for insertion.
struct Prepared {
    id: String,
    json: Vec<u8>,
    goals: Vec<(String, Vec<u8>)>,
}

/// Snapshot serialization format.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    crate_version: String,
    challenges: Vec<SnapshotChallenge>,
    goals: Vec<(String, Vec<u8>)>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotChallenge {
    id: String,
    json: Vec<u8>,
    goal_ids: Vec<String>,
}

/// Concurrent in-memory document cache.
#[derive(Debug, Default)]
pub struct StaticCache {
    challenges: DashMap<String, ChallengeEntry>,
    goals: DashMap<String, Arc<[u8]>>,
}

impl StaticCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache populated from definitions.
    pub fn from_challenges(challenges: &[Challenge]) -> Result<Self> {
        let cache = Self::new();
        cache.warm_up(challenges)?;
        Ok(cache)
    }

    /// Replace the cache contents with the given definitions.
    ///
    /// All documents are serialized and validated before anything is
    /// inserted; on error the cache is left as it was. New entries are
    /// inserted before stale ones are removed, so a concurrent reader never
    /// sees a known ID disappear mid-reload.
    pub fn warm_up(&self, challenges: &[Challenge]) -> Result<()> {
        let validator = DocumentValidator::new()?;

        let prepared: Vec<Prepared> = challenges
            .par_iter()
            .map(|c| prepare(c, &validator))
            .collect::<Result<_>>()?;

        self.replace(prepared);

        let stats = self.stats();
        tracing::info!(
            challenges = stats.challenges,
            goals = stats.goals,
            bytes = stats.total_bytes,
            "cache warmed up"
        );
        Ok(())
    }

    /// Insert one pre-serialized challenge and its goal documents.
    ///
    /// Documents are validated the same way as at warm-up.
    pub fn insert_raw_challenge(
        &self,
        id: &str,
        json: Vec<u8>,
        goals: Vec<(String, Vec<u8>)>,
    ) -> Result<()> {
        let validator = DocumentValidator::new()?;
        validator.validate(id, &json)?;
        for (goal_id, goal_json) in &goals {
            validator.validate(goal_id, goal_json)?;
        }
        self.insert(Prepared {
            id: id.to_string(),
            json,
            goals,
        });
        Ok(())
    }

    /// Write the cache contents to a snapshot file.
    pub fn persist(&self, path: &Path) -> std::result::Result<(), SnapshotError> {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
            challenges: self
                .challenges
                .iter()
                .map(|e| SnapshotChallenge {
                    id: e.key().clone(),
                    json: e.value().json.to_vec(),
                    goal_ids: e.value().goal_ids.clone(),
                })
                .collect(),
            goals: self
                .goals
                .iter()
                .map(|e| (e.key().clone(), e.value().to_vec()))
                .collect(),
        };

        // Write atomically via temp file
        let bytes = postcard::to_allocvec(&snapshot)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, &bytes)?;
        std::fs::rename(&temp_path, path)?;

        tracing::info!(path = %path.display(), bytes = bytes.len(), "snapshot written");
        Ok(())
    }

    /// Load a cache from a snapshot file, re-validating every document.
    pub fn from_snapshot(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(SnapshotError::from)?;
        let snapshot: Snapshot = postcard::from_bytes(&bytes).map_err(SnapshotError::from)?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::VersionMismatch {
                found: snapshot.version,
            }
            .into());
        }
        if snapshot.crate_version != env!("CARGO_PKG_VERSION") {
            return Err(SnapshotError::CrateVersionMismatch {
                found: snapshot.crate_version,
            }
            .into());
        }

        let validator = DocumentValidator::new()?;
        let cache = Self::new();
        for (id, json) in snapshot.goals {
            validator.validate(&id, &json)?;
            cache.goals.insert(id, Arc::from(json));
        }
        for c in snapshot.challenges {
            validator.validate(&c.id, &c.json)?;
            cache.challenges.insert(
                c.id,
                ChallengeEntry {
                    json: Arc::from(c.json),
                    goal_ids: c.goal_ids,
                },
            );
        }

        tracing::info!(path = %path.display(), "snapshot loaded");
        Ok(cache)
    }

    fn insert(&self, prepared: Prepared) {
        let goal_ids = prepared.goals.iter().map(|(id, _)| id.clone()).collect();
        for (goal_id, json) in prepared.goals {
            self.goals.insert(goal_id, Arc::from(json));
        }
        self.challenges.insert(
            prepared.id,
            ChallengeEntry {
                json: Arc::from(prepared.json),
                goal_ids,
            },
        );
    }

    fn replace(&self, prepared: Vec<Prepared>) {
        let mut live_challenges = HashSet::with_capacity(prepared.len());
        let mut live_goals = HashSet::new();
        for p in &prepared {
            live_challenges.insert(p.id.clone());
            live_goals.extend(p.goals.iter().map(|(id, _)| id.clone()));
        }

        for p in prepared {
            self.insert(p);
        }

        self.challenges.retain(|id, _| live_challenges.contains(id));
        self.goals.retain(|id, _| live_goals.contains(id));
    }
}

impl DocumentCache for StaticCache {
    fn challenge_json(&self, id: &str) -> Option<Arc<[u8]>> {
        self.challenges.get(id).map(|e| Arc::clone(&e.json))
    }

    fn goal_json(&self, id: &str) -> Option<Arc<[u8]>> {
        self.goals.get(id).map(|e| Arc::clone(e.value()))
    }

    fn goal_count(&self, id: &str) -> usize {
        self.challenges.get(id).map_or(0, |e| e.goal_ids.len())
    }

    fn stats(&self) -> CacheStats {
        let challenge_bytes: usize = self.challenges.iter().map(|e| e.json.len()).sum();
        let goal_bytes: usize = self.goals.iter().map(|e| e.value().len()).sum();
        CacheStats {
            challenges: self.challenges.len(),
            goals: self.goals.len(),
            total_bytes: challenge_bytes + goal_bytes,
        }
    }
}

fn prepare(challenge: &Challenge, validator: &DocumentValidator) -> Result<Prepared> {
    let json = to_json(&challenge.id, challenge)?;
    validator.validate(&challenge.id, &json)?;

    let goals = challenge
        .goals
        .iter()
        .map(|g| {
            let goal_json = to_json(&g.id, g)?;
            validator.validate(&g.id, &goal_json)?;
            Ok((g.id.clone(), goal_json))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Prepared {
        id: challenge.id.clone(),
        json,
        goals,
    })
}

fn to_json<T: Serialize>(id: &str, value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| Error::InvalidDocument {
        id: id.to_string(),
        reason: e.to_string(),
    })
}

/// Checks the injection preconditions on a static document.
pub struct DocumentValidator {
    reserved: AhoCorasick,
}

impl DocumentValidator {
    pub fn new() -> Result<Self> {
        let reserved = AhoCorasick::new(RESERVED_KEYS)
            .map_err(|e| Error::Internal(format!("reserved key matcher: {e}")))?;
        Ok(Self { reserved })
    }

    /// Reject documents without a closing brace or carrying a reserved key.
    ///
    /// A reserved name counts as a key when its opening quote is not escaped
    /// and the next non-whitespace byte is `:`.
    pub fn validate(&self, id: &str, json: &[u8]) -> Result<()> {
        let invalid = |reason: String| Error::InvalidDocument {
            id: id.to_string(),
            reason,
        };

        if rfind_byte(json, b'}').is_none() {
            return Err(invalid("missing closing brace".to_string()));
        }

        for m in self.reserved.find_iter(json) {
            let escaped = m.start() > 0 && json[m.start() - 1] == b'\\';
            let followed_by_colon = json[m.end()..]
                .iter()
                .find(|b| !b.is_ascii_whitespace())
                .is_some_and(|&b| b == b':');
            if !escaped && followed_by_colon {
                let key = RESERVED_KEYS[m.pattern().as_usize()];
                return Err(invalid(format!("reserved key {key} already present")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
