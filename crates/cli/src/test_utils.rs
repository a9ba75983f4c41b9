// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.
//!
//! Provides common fixtures for unit tests in the goalsplice crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use crate::cache::StaticCache;
use crate::model::{Challenge, EventSource, Goal, GoalType, Requirement, Reward, RewardType};
use crate::progress::{GoalStatus, Progress};

/// A statistic-driven goal rewarding one "sword" item.
pub fn goal(id: &str, stat_code: &str, target: i32) -> Goal {
    Goal {
        id: id.to_string(),
        name: format!("Goal {id}"),
        description: String::new(),
        kind: GoalType::Absolute,
        event_source: EventSource::Statistic,
        requirement: Requirement {
            stat_code: stat_code.to_string(),
            operator: ">=".to_string(),
            target_value: target,
        },
        reward: Reward {
            kind: RewardType::Item,
            reward_id: "sword".to_string(),
            quantity: 1,
        },
        prerequisites: Vec::new(),
    }
}

/// `daily` with goals g1, g2 and `weekly` with goal g3.
pub fn sample_challenges() -> Vec<Challenge> {
    vec![
        Challenge {
            id: "daily".to_string(),
            name: "Daily Challenge".to_string(),
            description: "Resets every day".to_string(),
            goals: vec![goal("g1", "kills", 10), goal("g2", "wins", 20)],
        },
        Challenge {
            id: "weekly".to_string(),
            name: "Weekly Challenge".to_string(),
            description: String::new(),
            goals: vec![goal("g3", "matches", 50)],
        },
    ]
}

/// A warmed cache holding [`sample_challenges`].
pub fn warmed_cache() -> Arc<StaticCache> {
    let cache = StaticCache::new();
    cache.warm_up(&sample_challenges()).unwrap();
    Arc::new(cache)
}

/// A progress record with no timestamps.
pub fn progress(goal_id: &str, value: i32, status: GoalStatus) -> Progress {
    Progress {
        user_id: "user-1".to_string(),
        goal_id: goal_id.to_string(),
        challenge_id: String::new(),
        namespace: "test".to_string(),
        progress: value,
        status,
        completed_at: None,
        claimed_at: None,
    }
}

/// Parse bytes as JSON, panicking with the raw text on failure.
pub fn parse_json(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|e| panic!("invalid JSON ({e}): {}", String::from_utf8_lossy(bytes)))
}
