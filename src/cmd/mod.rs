// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   account, config, server, stage, submit
//!
//! state_dir/secrets.json  <-- FileSecretStore (token, last server)
//! state_dir/stage.json    <-- ledger::store   (staged changes)
//! ```

pub mod account;
pub mod config;
pub mod server;
pub mod stage;
pub mod submit;


use anyhow::Context;

use crate::auth;
use crate::config::Config;
use crate::error::Result;
use crate::remote::{GitHubStore, Session};
use crate::secrets::{FileSecretStore, LAST_SERVER_KEY, SecretStore};

/// Secret store under the configured state directory.
#[must_use]
pub fn secret_store(config: &Config) -> FileSecretStore {
    FileSecretStore::new(config.paths.secrets_file())
}

/// Server named on the command line, else the last one selected.
///
/// # Errors
///
/// Returns an error if neither is available or the secret store is unreadable.
pub fn resolve_server(requested: Option<&str>, secrets: &impl SecretStore) -> Result<String> {
    if let Some(server) = requested.map(str::trim).filter(|s| !s.is_empty()) {
        return Ok(server.to_string());
    }
    secrets
        .get(LAST_SERVER_KEY)?
        .filter(|s| !s.is_empty())
        .context("no server selected (run `packdesk use <server>` or pass --server)")
}

/// Session from the stored token.
///
/// # Errors
///
/// Returns an error if no token is stored or GitHub rejects it.
pub async fn open_session(
    config: &Config,
    secrets: &impl SecretStore,
) -> Result<Session<GitHubStore>> {
    auth::check_token(secrets, &config.repo)
        .await
        .with_context(|| format!("cannot open {}", config.repo.full_name()))
}
