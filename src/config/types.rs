// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for packdesk.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, RepoConfig, SubmitConfig, PathsConfig
//! ```
//!
//! # Submission
//!
//! ```text
//! SubmitMode:      Individual (default) | Batch
//! LargeItemPolicy: Split (default)      | Inline
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Payload size above which a batch item gets its own commit (1 MiB).
pub const DEFAULT_LARGE_ITEM_THRESHOLD: u64 = 1024 * 1024;

/// How staged changes are flushed to the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitMode {
    /// One Contents API call per file; moves are left staged.
    #[default]
    Individual,
    /// Git Data API blobs, trees and commits.
    Batch,
}

impl std::fmt::Display for SubmitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Individual => write!(f, "individual"),
            Self::Batch => write!(f, "batch"),
        }
    }
}

impl std::str::FromStr for SubmitMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "individual" => Ok(Self::Individual),
            "batch" => Ok(Self::Batch),
            _ => Err(ConfigError::InvalidValue {
                section: "submit".to_string(),
                key: "mode".to_string(),
                message: format!("expected 'individual' or 'batch', got '{s}'"),
            }),
        }
    }
}

/// What batch mode does with items above the large-item threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LargeItemPolicy {
    /// Each large item becomes its own blob/tree/commit/ref sequence before
    /// the regular batch commit.
    #[default]
    Split,
    /// Every item goes into the single regular commit.
    Inline,
}

impl std::fmt::Display for LargeItemPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Split => write!(f, "split"),
            Self::Inline => write!(f, "inline"),
        }
    }
}

impl std::str::FromStr for LargeItemPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "split" => Ok(Self::Split),
            "inline" => Ok(Self::Inline),
            _ => Err(ConfigError::InvalidValue {
                section: "submit".to_string(),
                key: "large_items".to_string(),
                message: format!("expected 'split' or 'inline', got '{s}'"),
            }),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Print what would be sent without calling the API for writes.
    pub dry: bool,
    /// Log level for stderr output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// The GitHub repository holding the launcher content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub name: String,
    /// Branch every read and write targets.
    pub branch: String,
    /// REST API base URL.
    pub api_url: String,
    /// Directory holding one subdirectory per server.
    pub servers_root: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            owner: "kiroku67".to_string(),
            name: "launcher-template".to_string(),
            branch: "main".to_string(),
            api_url: "https://api.github.com".to_string(),
            servers_root: "docs/servers".to_string(),
        }
    }
}

impl RepoConfig {
    /// `owner/name`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Browser URL of the repository.
    #[must_use]
    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

/// Submission settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubmitConfig {
    /// Default mode for `packdesk submit`.
    pub mode: SubmitMode,
    /// Payload size in bytes above which an item is "large" in batch mode.
    pub large_item_threshold: u64,
    /// Handling of large items in batch mode.
    pub large_items: LargeItemPolicy,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            mode: SubmitMode::default(),
            large_item_threshold: DEFAULT_LARGE_ITEM_THRESHOLD,
            large_items: LargeItemPolicy::default(),
        }
    }
}
