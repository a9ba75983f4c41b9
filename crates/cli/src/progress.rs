// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-user progress records and the injected field suffix.

use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::escape::write_escaped;

/// Suffix rendered for a goal with no progress record.
pub const DEFAULT_FIELDS: &[u8] =
    br#","progress":0,"status":"not_started","completedAt":"","claimedAt":"""#;

/// Lifecycle of a goal for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Claimed,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::NotStarted => "not_started",
            GoalStatus::InProgress => "in_progress",
            GoalStatus::Completed => "completed",
            GoalStatus::Claimed => "claimed",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of one user toward one goal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    #[serde(default)]
    pub user_id: String,
    pub goal_id: String,
    #[serde(default)]
    pub challenge_id: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub progress: i32,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub claimed_at: Option<DateTime<Utc>>,
}

/// Per-request mapping from goal ID to progress.
#[derive(Debug, Clone, Default)]
pub struct ProgressLookup {
    by_goal: HashMap<String, Progress>,
}

impl ProgressLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lookup from records. A later record for the same goal wins.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Progress>,
    {
        let by_goal = records
            .into_iter()
            .map(|p| (p.goal_id.clone(), p))
            .collect();
        Self { by_goal }
    }

    /// Load progress records from a JSON array file.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let records: Vec<Progress> = serde_json::from_slice(&bytes).map_err(|e| Error::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::from_records(records))
    }

    pub fn insert(&mut self, progress: Progress) -> Option<Progress> {
        self.by_goal.insert(progress.goal_id.clone(), progress)
    }

    pub fn get(&self, goal_id: &str) -> Option<&Progress> {
        self.by_goal.get(goal_id)
    }

    pub fn len(&self) -> usize {
        self.by_goal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_goal.is_empty()
    }
}

impl FromIterator<Progress> for ProgressLookup {
    fn from_iter<I: IntoIterator<Item = Progress>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}

/// Append the progress suffix for a goal to `out`.
///
/// Key order is fixed: `progress`, `status`, `completedAt`, `claimedAt`.
/// Missing timestamps render as `""`.
pub fn write_fields(out: &mut Vec<u8>, progress: Option<&Progress>) {
    let Some(p) = progress else {
        out.extend_from_slice(DEFAULT_FIELDS);
        return;
    };

    // Writing into a Vec cannot fail.
    let _ = write!(out, r#","progress":{}"#, p.progress);
    out.extend_from_slice(br#","status":""#);
    write_escaped(out, p.status.as_str());
    out.extend_from_slice(br#"","completedAt":""#);
    write_timestamp(out, p.completed_at.as_ref());
    out.extend_from_slice(br#"","claimedAt":""#);
    write_timestamp(out, p.claimed_at.as_ref());
    out.push(b'"');
}

/// Render the progress suffix into a new buffer.
pub fn build_fields(progress: Option<&Progress>) -> Vec<u8> {
    let mut out = Vec::with_capacity(FIELDS_CAPACITY);
    write_fields(&mut out, progress);
    out
}

/// Upper bound of a rendered suffix with both timestamps set.
pub(crate) const FIELDS_CAPACITY: usize = 128;

fn write_timestamp(out: &mut Vec<u8>, ts: Option<&DateTime<Utc>>) {
    if let Some(ts) = ts {
        out.extend_from_slice(ts.to_rfc3339_opts(SecondsFormat::Secs, true).as_bytes());
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
