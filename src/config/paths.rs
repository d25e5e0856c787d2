// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! state_dir/           (default: .packdesk)
//!   secrets.json       token, last server
//!   stage.json         staged ledger for one server
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Local state locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding local state.
    pub state_dir: PathBuf,
    /// Secret store file (default: `state_dir/secrets.json`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets: Option<PathBuf>,
    /// Staged ledger file (default: `state_dir/stage.json`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(".packdesk"),
            secrets: None,
            stage: None,
        }
    }
}

impl PathsConfig {
    /// Resolve relative file paths against `state_dir` and fill in defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `state_dir` is empty.
    pub fn resolve(&mut self) -> Result<()> {
        if self.state_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingKey {
                section: "paths".to_string(),
                key: "state_dir".to_string(),
            }
            .into());
        }

        let resolve = |path: &mut Option<PathBuf>, parent: &Path, default: &str| match path {
            Some(p) if p.is_relative() => {
                *path = Some(parent.join(p.clone()));
            }
            None => {
                *path = Some(parent.join(default));
            }
            _ => {}
        };

        let state_dir = self.state_dir.clone();
        resolve(&mut self.secrets, &state_dir, "secrets.json");
        resolve(&mut self.stage, &state_dir, "stage.json");

        Ok(())
    }

    /// Secret store file.
    #[must_use]
    pub fn secrets_file(&self) -> PathBuf {
        self.secrets
            .clone()
            .unwrap_or_else(|| self.state_dir.join("secrets.json"))
    }

    /// Staged ledger file.
    #[must_use]
    pub fn stage_file(&self) -> PathBuf {
        self.stage
            .clone()
            .unwrap_or_else(|| self.state_dir.join("stage.json"))
    }
}
