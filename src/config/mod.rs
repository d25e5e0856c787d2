// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for packdesk.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. packdesk.toml (cwd, optional)
//! 3. --ini files
//! 4. PACKDESK_* env vars
//! 5. --set / CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! PACKDESK_GLOBAL__DRY=true        → global.dry = true
//! PACKDESK_REPO__BRANCH=staging    → repo.branch = "staging"
//! PACKDESK_SUBMIT__MODE=batch      → submit.mode = "batch"
//! ```
//!
//! The GitHub token never lives here; it belongs to the secret store.

pub mod loader;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{GlobalConfig, RepoConfig, SubmitConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Target repository.
    pub repo: RepoConfig,
    /// Submission settings.
    pub submit: SubmitConfig,
    /// Local state paths.
    pub paths: PathsConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use packdesk::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("packdesk.toml")
    ///     .with_env_prefix("PACKDESK")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve paths and validate values the type system can't express.
    ///
    /// # Errors
    ///
    /// Returns an error if a repository coordinate is empty, the large-item
    /// threshold is zero, or path resolution fails.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        for (key, value) in [
            ("owner", &self.repo.owner),
            ("name", &self.repo.name),
            ("branch", &self.repo.branch),
            ("api_url", &self.repo.api_url),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingKey {
                    section: "repo".to_string(),
                    key: key.to_string(),
                }
                .into());
            }
        }

        if self.submit.large_item_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                section: "submit".to_string(),
                key: "large_item_threshold".to_string(),
                message: "must be greater than zero".to_string(),
            }
            .into());
        }

        self.repo.api_url = self.repo.api_url.trim_end_matches('/').to_string();
        self.repo.servers_root = self.repo.servers_root.trim_matches('/').to_string();

        self.paths.resolve()
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_repo_options(&mut options);
        self.format_submit_options(&mut options);
        self.format_paths_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_repo_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("repo.owner".into(), self.repo.owner.clone());
        options.insert("repo.name".into(), self.repo.name.clone());
        options.insert("repo.branch".into(), self.repo.branch.clone());
        options.insert("repo.api_url".into(), self.repo.api_url.clone());
        options.insert("repo.servers_root".into(), self.repo.servers_root.clone());
    }

    fn format_submit_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("submit.mode".into(), self.submit.mode.to_string());
        options.insert(
            "submit.large_item_threshold".into(),
            self.submit.large_item_threshold.to_string(),
        );
        options.insert(
            "submit.large_items".into(),
            self.submit.large_items.to_string(),
        );
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "paths.state_dir".into(),
            self.paths.state_dir.display().to_string(),
        );
        options.insert(
            "paths.secrets".into(),
            self.paths.secrets_file().display().to_string(),
        );
        options.insert(
            "paths.stage".into(),
            self.paths.stage_file().display().to_string(),
        );
    }
}
