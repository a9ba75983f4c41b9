// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Final response assembly.
//!
//! Fetches static documents from the cache, injects per-user progress and
//! writes the result into a single pre-sized buffer.

use std::sync::Arc;

use crate::cache::DocumentCache;
use crate::config::SizingConfig;
use crate::error::{Error, Result};
use crate::inject::{inject_challenge_into, inject_goal};
use crate::progress::{FIELDS_CAPACITY, Progress, ProgressLookup};

const ENVELOPE_OPEN: &[u8] = b"{\"challenges\":[";
const ENVELOPE_CLOSE: &[u8] = b"]}";

/// Upper bound on reserved bytes per static byte, before the per-goal
/// suffix allowance.
const MAX_GROWTH_FACTOR: usize = 4;

/// Response body for an empty challenge list.
pub const EMPTY_CHALLENGES_RESPONSE: &[u8] = b"{\"challenges\":[]}";

/// Builds JSON response bodies from cached static documents.
#[derive(Clone)]
pub struct ResponseBuilder {
    cache: Option<Arc<dyn DocumentCache>>,
    sizing: SizingConfig,
}

impl ResponseBuilder {
    pub fn new(cache: Option<Arc<dyn DocumentCache>>) -> Self {
        Self {
            cache,
            sizing: SizingConfig::default(),
        }
    }

    /// Override the capacity estimate parameters.
    pub fn with_sizing(mut self, sizing: SizingConfig) -> Self {
        self.sizing = sizing;
        self
    }

    fn cache(&self) -> Result<&dyn DocumentCache> {
        self.cache.as_deref().ok_or(Error::CacheUnavailable)
    }

    /// Build `{"challenges":[...]}` for `ids`, in order.
    ///
    /// Any unknown ID fails the whole response.
    pub fn build_challenges_response<S: AsRef<str>>(
        &self,
        ids: &[S],
        lookup: &ProgressLookup,
    ) -> Result<Vec<u8>> {
        let cache = self.cache()?;

        if ids.is_empty() {
            return Ok(EMPTY_CHALLENGES_RESPONSE.to_vec());
        }

        let docs = ids
            .iter()
            .map(|id| {
                let id = id.as_ref();
                cache
                    .challenge_json(id)
                    .map(|json| (id, json))
                    .ok_or_else(|| Error::ChallengeNotFound { id: id.to_string() })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut out = Vec::with_capacity(self.estimate_capacity(cache, &docs));
        out.extend_from_slice(ENVELOPE_OPEN);
        for (i, (_, json)) in docs.iter().enumerate() {
            if i > 0 {
                out.push(b',');
            }
            inject_challenge_into(&mut out, json, lookup)?;
        }
        out.extend_from_slice(ENVELOPE_CLOSE);

        tracing::debug!(
            challenges = docs.len(),
            bytes = out.len(),
            capacity = out.capacity(),
            "built challenges response"
        );
        Ok(out)
    }

    /// Build one injected challenge document.
    pub fn build_single_challenge(&self, id: &str, lookup: &ProgressLookup) -> Result<Vec<u8>> {
        let cache = self.cache()?;
        let json = cache
            .challenge_json(id)
            .ok_or_else(|| Error::ChallengeNotFound { id: id.to_string() })?;

        let capacity = self.reserve_for(json.len(), cache.goal_count(id), 0);
        let mut out = Vec::with_capacity(capacity);
        inject_challenge_into(&mut out, &json, lookup)?;
        Ok(out)
    }

    /// Build one injected goal document.
    pub fn build_goal_response(&self, id: &str, progress: Option<&Progress>) -> Result<Vec<u8>> {
        let cache = self.cache()?;
        let json = cache
            .goal_json(id)
            .ok_or_else(|| Error::GoalNotFound { id: id.to_string() })?;
        Ok(inject_goal(&json, progress))
    }

    /// Output capacity guess: envelope plus, per challenge, its static size
    /// and a fixed allowance per goal.
    fn estimate_capacity(&self, cache: &dyn DocumentCache, docs: &[(&str, Arc<[u8]>)]) -> usize {
        let (static_len, goals) = docs.iter().fold((0usize, 0usize), |(len, goals), (id, json)| {
            (
                len.saturating_add(json.len()),
                goals.saturating_add(cache.goal_count(id)),
            )
        });
        self.reserve_for(
            static_len.saturating_add(ENVELOPE_OPEN.len() + ENVELOPE_CLOSE.len()),
            goals,
            self.sizing.envelope_overhead,
        )
    }

    /// Static length plus overheads, capped at a multiple of the static
    /// length regardless of the configured overheads.
    fn reserve_for(&self, static_len: usize, goals: usize, envelope: usize) -> usize {
        // Every goal occupies at least `{}` plus a separator.
        let goals = goals.min(static_len / 2);
        let wanted = static_len
            .saturating_add(envelope)
            .saturating_add(goals.saturating_mul(self.sizing.goal_overhead));
        let ceiling = static_len
            .saturating_mul(MAX_GROWTH_FACTOR)
            .saturating_add(goals.saturating_mul(FIELDS_CAPACITY));
        wanted.min(ceiling)
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
