// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use crate::goal_id::GoalIdError;

/// Goalsplice error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No document cache was attached to the response builder.
    #[error("document cache unavailable")]
    CacheUnavailable,

    /// Challenge ID has no static document in the cache.
    #[error("challenge not found: {id}")]
    ChallengeNotFound { id: String },

    /// Goal ID has no static document in the cache.
    #[error("goal not found: {id}")]
    GoalNotFound { id: String },

    /// The `"goals"` array of a challenge document is not delimited.
    #[error("malformed goals array: {reason}")]
    MalformedGoalsArray { reason: &'static str },

    /// A goal object inside a challenge has no usable `goalId`.
    #[error("goal #{ordinal}: failed to extract goal id: {source}")]
    GoalIdExtraction {
        ordinal: usize,
        #[source]
        source: GoalIdError,
    },

    /// A static document was rejected at warm-up.
    #[error("invalid document {id}: {reason}")]
    InvalidDocument { id: String, reason: String },

    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Definitions or progress file could not be decoded.
    #[error("json error: {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Cache snapshot could not be read or written.
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type using goalsplice Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Response rendered
    Success = 0,
    /// Requested challenge or goal does not exist
    NotFound = 1,
    /// Configuration or argument error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::ChallengeNotFound { .. } | Error::GoalNotFound { .. } => ExitCode::NotFound,
            Error::Config { .. } | Error::Argument(_) => ExitCode::ConfigError,
            Error::Json { .. } | Error::InvalidDocument { .. } => ExitCode::ConfigError,
            Error::CacheUnavailable
            | Error::MalformedGoalsArray { .. }
            | Error::GoalIdExtraction { .. }
            | Error::Io { .. }
            | Error::Snapshot(_)
            | Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
