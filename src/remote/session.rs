// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Authenticated session.
//!
//! A [`Session`] is the only way to reach the remote store from the rest of
//! the crate. It is created once the token has been verified and then passed
//! by reference to every operation.

use tracing::info;

use super::{GitHubStore, RemoteStore};
use crate::config::types::RepoConfig;
use crate::error::{AuthError, PanelResult, RemoteError};

/// Verified access to one repository branch.
#[derive(Debug)]
pub struct Session<S = GitHubStore> {
    store: S,
    repo: RepoConfig,
    login: String,
}

impl<S: RemoteStore> Session<S> {
    /// Open a session over an arbitrary store, verifying its credential.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` for 401/403 answers, otherwise the
    /// remote error.
    pub async fn with_store(store: S, repo: RepoConfig) -> PanelResult<Self> {
        let login = store
            .authenticated_user()
            .await
            .map_err(classify_auth_failure)?;
        info!(login = %login, repo = %repo.full_name(), branch = %repo.branch, "authenticated");
        Ok(Self { store, repo, login })
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn repo(&self) -> &RepoConfig {
        &self.repo
    }

    #[must_use]
    pub fn branch(&self) -> &str {
        &self.repo.branch
    }

    #[must_use]
    pub fn servers_root(&self) -> &str {
        &self.repo.servers_root
    }

    /// Login of the token owner.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }
}

/// Map a failed `/user` call: rejected credentials are an auth error,
/// anything else stays a transport problem.
pub(crate) fn classify_auth_failure(err: RemoteError) -> crate::error::PanelError {
    if err.is_unauthorized() {
        AuthError::InvalidToken {
            message: err.api_body().unwrap_or("bad credentials").to_string(),
        }
        .into()
    } else {
        err.into()
    }
}
