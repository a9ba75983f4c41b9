// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Progress injection into pre-serialized goal and challenge documents.
//!
//! Static bytes are only ever read. Every function here writes into a fresh
//! or caller-owned buffer, copying untouched spans verbatim and splicing the
//! progress suffix before each goal's closing brace.

use crate::error::{Error, Result};
use crate::goal_id::extract_goal_id;
use crate::progress::{FIELDS_CAPACITY, Progress, ProgressLookup, write_fields};
use crate::scan::{GoalSpans, find, find_byte_from, match_closing_bracket, rfind_byte};

const GOALS_KEY: &[u8] = b"\"goals\":";

/// Inject progress fields into one goal document.
///
/// A document without a closing brace is returned unchanged.
pub fn inject_goal(goal: &[u8], progress: Option<&Progress>) -> Vec<u8> {
    let mut out = Vec::with_capacity(goal.len() + FIELDS_CAPACITY);
    write_goal(&mut out, goal, progress);
    out
}

/// Inject progress into every goal of a challenge document.
///
/// A challenge with no `"goals":` key is returned unchanged.
pub fn inject_challenge(challenge: &[u8], lookup: &ProgressLookup) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(challenge.len() + 4 * FIELDS_CAPACITY);
    write_challenge(&mut out, challenge, lookup)?;
    Ok(out)
}

/// Append the injected form of `challenge` to `out`.
///
/// On error `out` is truncated back to its length on entry.
pub fn inject_challenge_into(
    out: &mut Vec<u8>,
    challenge: &[u8],
    lookup: &ProgressLookup,
) -> Result<()> {
    let mark = out.len();
    let result = write_challenge(out, challenge, lookup);
    if result.is_err() {
        out.truncate(mark);
    }
    result
}

fn write_challenge(out: &mut Vec<u8>, challenge: &[u8], lookup: &ProgressLookup) -> Result<()> {
    let Some(key) = find(challenge, GOALS_KEY) else {
        out.extend_from_slice(challenge);
        return Ok(());
    };

    let open = find_byte_from(challenge, b'[', key + GOALS_KEY.len()).ok_or(
        Error::MalformedGoalsArray {
            reason: "missing opening bracket",
        },
    )?;
    let close = match_closing_bracket(challenge, open).ok_or(Error::MalformedGoalsArray {
        reason: "missing closing bracket",
    })?;

    out.extend_from_slice(&challenge[..=open]);

    let interior = &challenge[open + 1..close];
    for (ordinal, span) in GoalSpans::new(interior).enumerate() {
        let goal = &interior[span];
        let goal_id =
            extract_goal_id(goal).map_err(|source| Error::GoalIdExtraction { ordinal, source })?;

        if ordinal > 0 {
            out.push(b',');
        }
        write_goal(out, goal, lookup.get(goal_id));
    }

    out.extend_from_slice(&challenge[close..]);
    Ok(())
}

/// Append `goal` with the progress suffix spliced before its last `}`.
fn write_goal(out: &mut Vec<u8>, goal: &[u8], progress: Option<&Progress>) {
    let Some(close) = rfind_byte(goal, b'}') else {
        tracing::debug!(len = goal.len(), "goal without closing brace passed through");
        out.extend_from_slice(goal);
        return;
    };

    let body = &goal[..close];
    out.extend_from_slice(body);

    let mark = out.len();
    write_fields(out, progress);
    // `{}` has no member to follow, so drop the leading comma.
    if is_empty_object(body) {
        out.remove(mark);
    }

    out.extend_from_slice(&goal[close..]);
}

fn is_empty_object(body: &[u8]) -> bool {
    body.iter()
        .rev()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|&b| b == b'{')
}

#[cfg(test)]
#[path = "inject_tests.rs"]
mod tests;
