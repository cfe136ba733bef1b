//! Configuration file loading with precedence handling.

use crate::model::{FilterState, PlatformId, SortBy, ViewMode};
use crate::view_state::{default_display_offset, utc_offset_from_hours};
use chrono::FixedOffset;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "CASHLENS_CONFIG";
/// Environment variable overriding the view mode.
pub const ENV_VIEW_MODE: &str = "CASHLENS_VIEW_MODE";
/// Environment variable overriding the sort order.
pub const ENV_SORT: &str = "CASHLENS_SORT";
/// Environment variable overriding the display offset, in hours east of UTC.
pub const ENV_UTC_OFFSET: &str = "CASHLENS_UTC_OFFSET";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/cashlens/config.toml`:
///
/// ```toml
/// view_mode = "max"
/// sort_by = "name-asc"
/// platforms = [1, 4]
/// utc_offset_hours = -3
/// log_file_path = "/tmp/cashlens.log"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Initial view mode (`global` or `max`).
    #[serde(default)]
    pub view_mode: Option<String>,

    /// Initial sort key (`cashback-desc`, `name-asc`, `name-desc`).
    #[serde(default)]
    pub sort_by: Option<String>,

    /// Platform ids active at startup.
    #[serde(default)]
    pub platforms: Option<Vec<i64>>,

    /// Hours east of UTC that timestamps are shown in.
    #[serde(default)]
    pub utc_offset_hours: Option<i32>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Initial view mode.
    pub view_mode: ViewMode,
    /// Initial sort order.
    pub sort_by: SortBy,
    /// Initially active platforms; empty disables the platform filter.
    pub platforms: BTreeSet<PlatformId>,
    /// Offset timestamps are shown in.
    pub display_offset: FixedOffset,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Global,
            sort_by: SortBy::CashbackDesc,
            platforms: BTreeSet::new(),
            display_offset: default_display_offset(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Filter state the interactive session starts from.
    pub fn initial_filter(&self, query: Option<&str>) -> FilterState {
        let mut filter = FilterState::with_query(query.unwrap_or_default());
        filter.view_mode = self.view_mode;
        filter.sort_by = self.sort_by;
        filter.active_platforms = self.platforms.clone();
        filter
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/cashlens/cashlens.log` on Linux, or the
/// platform state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("cashlens").join("cashlens.log"),
        None => PathBuf::from("cashlens.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/cashlens/config.toml` on Linux.
/// Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cashlens").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CASHLENS_CONFIG` environment variable
/// 3. Default path `~/.config/cashlens/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
///
/// Mode and sort strings are parsed leniently: unknown values fall back
/// to `global` and catalog order rather than failing. An offset outside
/// -23..=23 hours keeps the default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        view_mode: config
            .view_mode
            .as_deref()
            .map_or(defaults.view_mode, ViewMode::parse_lenient),
        sort_by: config
            .sort_by
            .as_deref()
            .map_or(defaults.sort_by, SortBy::parse_lenient),
        platforms: config
            .platforms
            .map(|ids| ids.into_iter().map(PlatformId::new).collect())
            .unwrap_or(defaults.platforms),
        display_offset: config
            .utc_offset_hours
            .and_then(utc_offset_from_hours)
            .unwrap_or(defaults.display_offset),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `CASHLENS_VIEW_MODE`, `CASHLENS_SORT` and `CASHLENS_UTC_OFFSET`.
/// An offset that is not a whole number of hours in range is ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(mode) = std::env::var(ENV_VIEW_MODE) {
        config.view_mode = ViewMode::parse_lenient(&mode);
    }

    if let Ok(sort) = std::env::var(ENV_SORT) {
        config.sort_by = SortBy::parse_lenient(&sort);
    }

    if let Some(offset) = std::env::var(ENV_UTC_OFFSET)
        .ok()
        .and_then(|hours| hours.trim().parse::<i32>().ok())
        .and_then(utc_offset_from_hours)
    {
        config.display_offset = offset;
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence. Only flags the user actually
/// passed are applied; an empty platform list leaves the config value.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    view_mode_override: Option<ViewMode>,
    sort_override: Option<SortBy>,
    platform_override: Vec<PlatformId>,
) -> ResolvedConfig {
    if let Some(mode) = view_mode_override {
        config.view_mode = mode;
    }

    if let Some(sort) = sort_override {
        config.sort_by = sort;
    }

    if !platform_override.is_empty() {
        config.platforms = platform_override.into_iter().collect();
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
