// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Goal ID extraction from a single goal object.
//!
//! The value is located by punctuation only: the first `"goalId"`, the next
//! `:`, then the next pair of quotes. The closing quote is not escape-aware,
//! so goal IDs must not contain `"`.

use crate::scan::{find, find_byte_from};

const GOAL_ID_KEY: &[u8] = b"\"goalId\"";

/// Failure locating the `goalId` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GoalIdError {
    #[error("field not found: goalId")]
    FieldNotFound,

    #[error("missing ':' after goalId")]
    MissingColon,

    #[error("missing opening quote for goalId value")]
    MissingOpeningQuote,

    #[error("missing closing quote for goalId value")]
    MissingClosingQuote,

    #[error("goalId value is not valid UTF-8")]
    InvalidUtf8,
}

/// Return the `goalId` string value of one goal object, borrowed from it.
pub fn extract_goal_id(goal: &[u8]) -> Result<&str, GoalIdError> {
    let key = find(goal, GOAL_ID_KEY).ok_or(GoalIdError::FieldNotFound)?;
    let colon = find_byte_from(goal, b':', key + GOAL_ID_KEY.len())
        .ok_or(GoalIdError::MissingColon)?;
    let open = find_byte_from(goal, b'"', colon + 1).ok_or(GoalIdError::MissingOpeningQuote)?;
    let close = find_byte_from(goal, b'"', open + 1).ok_or(GoalIdError::MissingClosingQuote)?;

    std::str::from_utf8(&goal[open + 1..close]).map_err(|_| GoalIdError::InvalidUtf8)
}

#[cfg(test)]
#[path = "goal_id_tests.rs"]
mod tests;
