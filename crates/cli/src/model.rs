// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Challenge and goal definitions.
//!
//! These are serialized once at cache warm-up; the request path only ever
//! sees the resulting bytes.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A named group of goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    #[serde(rename = "challengeId")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

/// A single objective a user can complete and claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(rename = "goalId")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: GoalType,
    #[serde(default)]
    pub event_source: EventSource,
    pub requirement: Requirement,
    pub reward: Reward,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

/// How progress toward a goal accumulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    /// Progress mirrors the latest stat value.
    #[default]
    Absolute,
    /// Each event adds to progress.
    Increment,
    /// Counted at most once per UTC day.
    Daily,
}

/// Event stream that drives a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    Login,
    #[default]
    Statistic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub stat_code: String,
    #[serde(default = "Requirement::default_operator")]
    pub operator: String,
    pub target_value: i32,
}

impl Requirement {
    fn default_operator() -> String {
        ">=".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    #[serde(rename = "type")]
    pub kind: RewardType,
    pub reward_id: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RewardType {
    Item,
    Wallet,
}

/// Definitions file layout: either a bare array or `{"challenges": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum DefinitionsFile {
    List(Vec<Challenge>),
    Wrapped { challenges: Vec<Challenge> },
}

/// Load challenge definitions from a JSON file.
pub fn load_challenges(path: &Path) -> Result<Vec<Challenge>> {
    let bytes = std::fs::read(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_challenges(&bytes, path)
}

/// Parse challenge definitions, rejecting duplicate challenge or goal IDs.
///
/// Goal IDs are global: progress lookups are keyed by goal ID alone.
pub fn parse_challenges(bytes: &[u8], path: &Path) -> Result<Vec<Challenge>> {
    let file: DefinitionsFile = serde_json::from_slice(bytes).map_err(|e| Error::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    let challenges = match file {
        DefinitionsFile::List(list) => list,
        DefinitionsFile::Wrapped { challenges } => challenges,
    };

    let mut seen_challenges = HashSet::new();
    let mut seen_goals = HashSet::new();
    for challenge in &challenges {
        if !seen_challenges.insert(challenge.id.as_str()) {
            return Err(Error::Config {
                message: format!("duplicate challenge id: {}", challenge.id),
                path: Some(path.to_path_buf()),
            });
        }
        for goal in &challenge.goals {
            if !seen_goals.insert(goal.id.as_str()) {
                return Err(Error::Config {
                    message: format!("duplicate goal id: {} (in {})", goal.id, challenge.id),
                    path: Some(path.to_path_buf()),
                });
            }
        }
    }

    Ok(challenges)
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
