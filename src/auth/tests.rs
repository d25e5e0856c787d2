// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{logout, resume_session, store_verified, stored_token, update_token};
use crate::error::{AuthError, PanelError};
use crate::remote::test_utils::{MockStore, test_repo};
use crate::secrets::{LAST_SERVER_KEY, MemorySecretStore, SecretStore, TOKEN_KEY};

#[test]
fn test_stored_token_missing() {
    let secrets = MemorySecretStore::new();
    let err = stored_token(&secrets).unwrap_err();
    assert!(matches!(
        err,
        PanelError::Auth(ref e) if matches!(**e, AuthError::MissingToken)
    ));
}

#[tokio::test]
async fn test_resume_session_keeps_valid_token() {
    let secrets = MemorySecretStore::new();
    secrets.set(TOKEN_KEY, "good").unwrap();

    let session = resume_session(&secrets, MockStore::new(), &test_repo())
        .await
        .unwrap();

    assert_eq!(session.login(), "octocat");
    assert_eq!(secrets.get(TOKEN_KEY).unwrap().as_deref(), Some("good"));
}

#[tokio::test]
async fn test_resume_session_clears_rejected_token() {
    let secrets = MemorySecretStore::new();
    secrets.set(TOKEN_KEY, "expired").unwrap();
    secrets.set(LAST_SERVER_KEY, "survival").unwrap();

    let err = resume_session(&secrets, MockStore::new().unauthorized(), &test_repo())
        .await
        .unwrap_err();

    assert!(matches!(err, PanelError::Auth(_)));
    assert_eq!(secrets.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(
        secrets.get(LAST_SERVER_KEY).unwrap().as_deref(),
        Some("survival")
    );
}

#[tokio::test]
async fn test_store_verified_only_stores_good_tokens() {
    let secrets = MemorySecretStore::new();
    secrets.set(TOKEN_KEY, "old").unwrap();

    let result = store_verified(&secrets, MockStore::new().unauthorized(), &test_repo(), "bad").await;
    assert!(result.is_err());
    assert_eq!(secrets.get(TOKEN_KEY).unwrap().as_deref(), Some("old"));

    store_verified(&secrets, MockStore::new(), &test_repo(), "new")
        .await
        .unwrap();
    assert_eq!(secrets.get(TOKEN_KEY).unwrap().as_deref(), Some("new"));
}

#[tokio::test]
async fn test_update_token_rejects_blank_token() {
    let secrets = MemorySecretStore::new();
    secrets.set(TOKEN_KEY, "old").unwrap();

    let Err(err) = update_token(&secrets, &test_repo(), "   ").await else {
        panic!("blank token accepted");
    };

    assert!(matches!(
        err,
        PanelError::Auth(ref e) if matches!(**e, AuthError::InvalidToken { .. })
    ));
    assert_eq!(secrets.get(TOKEN_KEY).unwrap().as_deref(), Some("old"));
}

#[test]
fn test_logout_clears_token_and_server() {
    let secrets = MemorySecretStore::new();
    secrets.set(TOKEN_KEY, "t").unwrap();
    secrets.set(LAST_SERVER_KEY, "s").unwrap();

    logout(&secrets).unwrap();

    assert_eq!(secrets.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(secrets.get(LAST_SERVER_KEY).unwrap(), None);
}
