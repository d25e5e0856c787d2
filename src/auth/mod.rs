// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Token lifecycle.
//!
//! ```text
//! check_token    stored token --> GET /user --> Session
//!                   401/403 --> token deleted, AuthError::InvalidToken
//! authenticate   new token --> GET /user --> stored --> Session
//! update_token   same, replacing the stored token only once verified
//! logout         delete token and last server
//! ```

use tracing::{info, warn};

use crate::config::types::RepoConfig;
use crate::error::{AuthError, PanelError, PanelResult};
use crate::remote::{GitHubStore, RemoteStore, Session};
use crate::secrets::{LAST_SERVER_KEY, SecretStore, TOKEN_KEY};

/// The stored token.
///
/// # Errors
///
/// Returns `AuthError::MissingToken` if none is stored.
pub fn stored_token(secrets: &impl SecretStore) -> PanelResult<String> {
    secrets
        .get(TOKEN_KEY)?
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::MissingToken.into())
}

/// Open a session with the stored token.
///
/// # Errors
///
/// Returns `AuthError::MissingToken` when no token is stored and
/// `AuthError::InvalidToken` when GitHub rejects it (the stored token is
/// deleted first). Transport failures leave the token in place.
pub async fn check_token(
    secrets: &impl SecretStore,
    repo: &RepoConfig,
) -> PanelResult<Session<GitHubStore>> {
    let token = stored_token(secrets)?;
    let store = GitHubStore::from_config(repo, token)?;
    resume_session(secrets, store, repo).await
}

/// Verify a store built from the stored token, clearing the token if the
/// remote rejects it.
///
/// # Errors
///
/// See [`check_token`].
pub async fn resume_session<S: RemoteStore>(
    secrets: &impl SecretStore,
    store: S,
    repo: &RepoConfig,
) -> PanelResult<Session<S>> {
    match Session::with_store(store, repo.clone()).await {
        Err(PanelError::Auth(err)) => {
            warn!(error = %err, "stored token rejected, clearing it");
            secrets.delete(TOKEN_KEY)?;
            Err(PanelError::Auth(err))
        }
        other => other,
    }
}

/// Verify `token` and store it.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if GitHub rejects the token; nothing is
/// stored in that case.
pub async fn authenticate(
    secrets: &impl SecretStore,
    repo: &RepoConfig,
    token: &str,
) -> PanelResult<Session<GitHubStore>> {
    let session = verify_and_store(secrets, repo, token).await?;
    info!(login = session.login(), "logged in");
    Ok(session)
}

/// Replace the stored token once `token` is verified.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if GitHub rejects the token; the old
/// token stays stored in that case.
pub async fn update_token(
    secrets: &impl SecretStore,
    repo: &RepoConfig,
    token: &str,
) -> PanelResult<Session<GitHubStore>> {
    let session = verify_and_store(secrets, repo, token).await?;
    info!(login = session.login(), "token replaced");
    Ok(session)
}

async fn verify_and_store(
    secrets: &impl SecretStore,
    repo: &RepoConfig,
    token: &str,
) -> PanelResult<Session<GitHubStore>> {
    let token = non_empty(token)?;
    let store = GitHubStore::from_config(repo, token)?;
    store_verified(secrets, store, repo, token).await
}

/// Open a session over `store` and, once verified, store `token`.
///
/// # Errors
///
/// Returns the verification error without touching the secret store.
pub async fn store_verified<S: RemoteStore>(
    secrets: &impl SecretStore,
    store: S,
    repo: &RepoConfig,
    token: &str,
) -> PanelResult<Session<S>> {
    let session = Session::with_store(store, repo.clone()).await?;
    secrets.set(TOKEN_KEY, token)?;
    Ok(session)
}

/// Forget the token and the last selected server.
///
/// # Errors
///
/// Returns an error if the secret store cannot be written.
pub fn logout(secrets: &impl SecretStore) -> PanelResult<()> {
    secrets.delete(TOKEN_KEY)?;
    secrets.delete(LAST_SERVER_KEY)?;
    info!("logged out");
    Ok(())
}

fn non_empty(token: &str) -> PanelResult<&str> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidToken {
            message: "token is empty".to_string(),
        }
        .into());
    }
    Ok(token)
}

#[cfg(test)]
mod tests;
