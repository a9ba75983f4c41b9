// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles goalsplice.toml parsing with version validation and unknown key
//! warnings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "goalsplice.toml";

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "cache", "response"];

/// Known `[cache]` keys.
const KNOWN_CACHE_KEYS: &[&str] = &["definitions", "snapshot"];

/// Known `[response]` keys.
const KNOWN_RESPONSE_KEYS: &[&str] = &["envelope_overhead", "goal_overhead"];

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    #[serde(default)]
    cache: Option<toml::Value>,

    #[serde(default)]
    response: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Where static documents come from.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Output buffer sizing.
    #[serde(default)]
    pub response: SizingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            cache: CacheConfig::default(),
            response: SizingConfig::default(),
        }
    }
}

/// Document source configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// JSON file of challenge definitions.
    #[serde(default)]
    pub definitions: Option<PathBuf>,

    /// Postcard snapshot written by `goalsplice snapshot`.
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
}

/// Capacity estimate for response buffers.
///
/// Only affects how often the output buffer reallocates, never its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SizingConfig {
    /// Bytes reserved for the envelope.
    #[serde(default = "SizingConfig::default_envelope_overhead")]
    pub envelope_overhead: usize,

    /// Bytes reserved per goal for the injected fields.
    #[serde(default = "SizingConfig::default_goal_overhead")]
    pub goal_overhead: usize,
}

impl SizingConfig {
    pub(crate) fn default_envelope_overhead() -> usize {
        100
    }

    pub(crate) fn default_goal_overhead() -> usize {
        150
    }
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            envelope_overhead: Self::default_envelope_overhead(),
            goal_overhead: Self::default_goal_overhead(),
        }
    }
}

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Parse config from string content, warning on unknown keys.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let config_error = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    // First check version
    let version_check: VersionOnly =
        toml::from_str(content).map_err(|e| config_error(e.to_string()))?;

    let version = version_check
        .version
        .ok_or_else(|| config_error("missing required field: version".to_string()))?;

    if version != SUPPORTED_VERSION {
        return Err(config_error(format!(
            "unsupported config version {} (supported: {})\n  Upgrade goalsplice to use this config.",
            version, SUPPORTED_VERSION
        )));
    }

    let flexible: FlexibleConfig =
        toml::from_str(content).map_err(|e| config_error(e.to_string()))?;

    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, key);
        }
    }
    warn_unknown_section_keys(path, "cache", flexible.cache.as_ref(), KNOWN_CACHE_KEYS);
    warn_unknown_section_keys(
        path,
        "response",
        flexible.response.as_ref(),
        KNOWN_RESPONSE_KEYS,
    );

    // Parse full config
    toml::from_str(content).map_err(|e| config_error(e.to_string()))
}

/// Resolve the config to use: explicit path, else `goalsplice.toml` in
/// `dir` if present, else defaults.
pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Config> {
    if let Some(path) = explicit {
        return load(path);
    }

    let candidate = dir.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        tracing::debug!(path = %candidate.display(), "using config");
        return load(&candidate);
    }

    Ok(Config::default())
}

fn warn_unknown_section_keys(
    path: &Path,
    section: &str,
    value: Option<&toml::Value>,
    known: &[&str],
) {
    let Some(toml::Value::Table(t)) = value else {
        return;
    };
    for key in t.keys() {
        if !known.contains(&key.as_str()) {
            warn_unknown_key(path, &format!("{}.{}", section, key));
        }
    }
}

fn warn_unknown_key(path: &Path, key: &str) {
    tracing::warn!(path = %path.display(), key, "unrecognized config field");
    eprintln!(
        "goalsplice: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
