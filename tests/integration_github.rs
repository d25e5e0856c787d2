// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the GitHub store using wiremock.
//!
//! Covers:
//! - Token verification and the stored-token lifecycle
//! - Contents API listings, 404 handling and raw error bodies
//! - Server metadata read/modify/write
//! - Both submission modes end to end

use packdesk::auth;
use packdesk::config::types::{LargeItemPolicy, RepoConfig, SubmitMode};
use packdesk::error::{AuthError, PanelError, RemoteError};
use packdesk::files;
use packdesk::layout::Slot;
use packdesk::ledger::{Ledger, LedgerState, NewFile};
use packdesk::remote::{GitHubStore, RemoteStore, Session, encode_content};
use packdesk::secrets::{MemorySecretStore, SecretStore, TOKEN_KEY};
use packdesk::servers;
use packdesk::submit::{BatchOptions, SubmitReport, submit_ledger};
use serde_json::json;
use wiremock::matchers::{bearer_token, body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "ghp_test";
const REPO: &str = "/repos/acme/packs";

fn repo_config(server: &MockServer) -> RepoConfig {
    RepoConfig {
        owner: "acme".to_string(),
        name: "packs".to_string(),
        api_url: server.uri(),
        ..RepoConfig::default()
    }
}

async fn mount_user(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(bearer_token(TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat"})))
        .mount(server)
        .await;
}

async fn session(server: &MockServer) -> Session<GitHubStore> {
    mount_user(server).await;
    let repo = repo_config(server);
    let store = GitHubStore::from_config(&repo, TOKEN).unwrap();
    Session::with_store(store, repo).await.unwrap()
}

fn jar(name: &str) -> NewFile {
    NewFile::new(name, Slot::mods(Slot::REQUIRED), b"PK\x03\x04jar".to_vec())
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_authenticate_stores_verified_token() {
    let server = MockServer::start().await;
    mount_user(&server).await;
    let secrets = MemorySecretStore::new();

    let session = auth::authenticate(&secrets, &repo_config(&server), TOKEN)
        .await
        .unwrap();

    assert_eq!(session.login(), "octocat");
    assert_eq!(secrets.get(TOKEN_KEY).unwrap().as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn test_rejected_stored_token_is_cleared() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"message":"Bad credentials"}"#),
        )
        .mount(&server)
        .await;
    let secrets = MemorySecretStore::new();
    secrets.set(TOKEN_KEY, "ghp_revoked").unwrap();

    let err = auth::check_token(&secrets, &repo_config(&server))
        .await
        .unwrap_err();

    match err {
        PanelError::Auth(auth) => assert!(matches!(*auth, AuthError::InvalidToken { .. })),
        other => panic!("expected auth error, got {other:?}"),
    }
    assert_eq!(secrets.get(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_server_error_keeps_stored_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    let secrets = MemorySecretStore::new();
    secrets.set(TOKEN_KEY, TOKEN).unwrap();

    let err = auth::check_token(&secrets, &repo_config(&server))
        .await
        .unwrap_err();

    assert!(matches!(err, PanelError::Remote(_)));
    assert_eq!(secrets.get(TOKEN_KEY).unwrap().as_deref(), Some(TOKEN));
}

// =============================================================================
// Contents API
// =============================================================================

#[tokio::test]
async fn test_list_files_reads_branch_and_skips_directories() {
    let server = MockServer::start().await;
    let session = session(&server).await;
    Mock::given(method("GET"))
        .and(path(format!(
            "{REPO}/contents/docs/servers/survival/forgemods/required"
        )))
        .and(query_param("ref", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": "file", "name": "jei.jar", "size": 2048, "sha": "s1",
             "path": "docs/servers/survival/forgemods/required/jei.jar"},
            {"type": "dir", "name": "old", "sha": "s2",
             "path": "docs/servers/survival/forgemods/required/old"}
        ])))
        .mount(&server)
        .await;

    let listed = files::list_files(&session, "survival", &Slot::mods(Slot::REQUIRED))
        .await
        .unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "jei.jar");
    assert_eq!(listed[0].size, 2048);
    assert_eq!(listed[0].sha, "s1");
}

#[tokio::test]
async fn test_enterprise_api_prefix_is_kept_in_repo_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/v3{REPO}/contents/docs/servers/survival/files/resourcepacks"
        )))
        .and(query_param("ref", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": "file", "name": "faithful.zip", "size": 10, "sha": "s1",
             "path": "docs/servers/survival/files/resourcepacks/faithful.zip"}
        ])))
        .mount(&server)
        .await;
    let repo = RepoConfig {
        api_url: format!("{}/api/v3/", server.uri()),
        ..repo_config(&server)
    };
    let store = GitHubStore::from_config(&repo, TOKEN).unwrap();
    let session = Session::with_store(store, repo).await.unwrap();

    let listed = files::list_files(&session, "survival", &Slot::files(Slot::RESOURCEPACKS))
        .await
        .unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "faithful.zip");
}

#[tokio::test]
async fn test_missing_slot_lists_as_empty() {
    let server = MockServer::start().await;
    let session = session(&server).await;
    Mock::given(method("GET"))
        .and(path(format!(
            "{REPO}/contents/docs/servers/survival/files/shaderpacks"
        )))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let listed = files::list_files(&session, "survival", &Slot::files(Slot::SHADERPACKS))
        .await
        .unwrap();

    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_api_error_body_is_kept_verbatim() {
    let server = MockServer::start().await;
    let body = r#"{"message":"sha wasn't supplied","status":"422"}"#;
    Mock::given(method("PUT"))
        .and(path(format!("{REPO}/contents/a/b.jar")))
        .respond_with(ResponseTemplate::new(422).set_body_string(body))
        .mount(&server)
        .await;
    let store = GitHubStore::from_config(&repo_config(&server), TOKEN).unwrap();

    let err = store
        .create_or_update_file("a/b.jar", "AA==", "msg", "main", None)
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::Api { status: 422, .. }));
    assert_eq!(err.api_body(), Some(body));
}

#[tokio::test]
async fn test_update_server_metadata_writes_on_current_sha() {
    let server = MockServer::start().await;
    let session = session(&server).await;
    let meta_path = format!("{REPO}/contents/docs/servers/survival/servermeta.json");
    let current = json!({
        "meta": {"name": "Survival", "address": "play.example.net", "description": "",
                 "mainServer": true, "autoconnect": false, "icon": "icon.png"},
        "java": {"min": 17}
    });
    Mock::given(method("GET"))
        .and(path(meta_path.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "file", "name": "servermeta.json", "size": 120, "sha": "meta-1",
            "path": "docs/servers/survival/servermeta.json", "encoding": "base64",
            "content": encode_content(current.to_string().as_bytes()),
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(meta_path))
        .and(body_partial_json(json!({
            "sha": "meta-1",
            "branch": "main",
            "message": "⚙️ Update server settings for survival",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = servers::get_server_metadata(&session, "survival")
        .await
        .unwrap();
    assert_eq!(file.metadata.meta.name, "Survival");
    assert_eq!(file.metadata.meta.extra["icon"], "icon.png");
    assert_eq!(file.metadata.rest["java"]["min"], 17);

    file.metadata.meta.autoconnect = true;
    servers::update_server_metadata(&session, "survival", &file.metadata)
        .await
        .unwrap();
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test]
async fn test_individual_submit_keeps_failed_upload_staged() {
    let server = MockServer::start().await;
    let session = session(&server).await;
    let dir = format!("{REPO}/contents/docs/servers/survival/forgemods/required");
    Mock::given(method("PUT"))
        .and(path(format!("{dir}/a.jar")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("{dir}/b.jar")))
        .respond_with(ResponseTemplate::new(409).set_body_string(r#"{"message":"conflict"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let mut ledger = Ledger::new("survival");
    ledger.add_pending_change(jar("a.jar")).unwrap();
    ledger.add_pending_change(jar("b.jar")).unwrap();

    let report = submit_ledger(
        &session,
        &mut ledger,
        SubmitMode::Individual,
        BatchOptions {
            large_item_threshold: 1024,
            large_items: LargeItemPolicy::Split,
        },
        &(),
    )
    .await
    .unwrap();

    let SubmitReport::Individual(report) = report else {
        panic!("expected individual report");
    };
    assert_eq!((report.success, report.failed), (1, 1));
    assert_eq!(
        report.failures[0].api_body.as_deref(),
        Some(r#"{"message":"conflict"}"#)
    );
    assert_eq!(ledger.state(), LedgerState::Staging);
    assert_eq!(ledger.new_files().len(), 1);
    assert_eq!(ledger.new_files()[0].file_name, "b.jar");
}

#[tokio::test]
async fn test_batch_submit_builds_one_commit() {
    let server = MockServer::start().await;
    let session = session(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("{REPO}/git/ref/heads/main")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ref": "refs/heads/main", "object": {"sha": "head-0"}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{REPO}/git/commits/head-0")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"sha": "head-0", "tree": {"sha": "tree-0"}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{REPO}/git/blobs")))
        .and(body_json(json!({
            "content": encode_content(b"PK\x03\x04jar"),
            "encoding": "base64",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sha": "blob-1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{REPO}/git/trees")))
        .and(body_json(json!({
            "base_tree": "tree-0",
            "tree": [
                {"path": "docs/servers/survival/forgemods/required/jei.jar",
                 "mode": "100644", "type": "blob", "sha": "blob-1"},
                {"path": "docs/servers/survival/files/old.txt",
                 "mode": "100644", "type": "blob", "sha": null},
            ],
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sha": "tree-1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{REPO}/git/commits")))
        .and(body_json(json!({
            "message": "🎮 Batch update: 2 changes\n\nadd: jei.jar\ndelete: old.txt",
            "tree": "tree-1",
            "parents": ["head-0"],
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sha": "commit-1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{REPO}/git/refs/heads/main")))
        .and(body_json(json!({"sha": "commit-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut ledger = Ledger::new("survival");
    ledger.add_pending_change(jar("jei.jar")).unwrap();
    ledger
        .add_pending_change(packdesk::ledger::DeletedFile {
            file_name: "old.txt".to_string(),
            file_path: "docs/servers/survival/files/old.txt".to_string(),
            file_type: packdesk::layout::FileType::Files,
            sha: "old-sha".to_string(),
        })
        .unwrap();

    let report = submit_ledger(
        &session,
        &mut ledger,
        SubmitMode::Batch,
        BatchOptions {
            large_item_threshold: 1024,
            large_items: LargeItemPolicy::Split,
        },
        &(),
    )
    .await
    .unwrap();

    let SubmitReport::Batch(report) = report else {
        panic!("expected batch report");
    };
    assert_eq!(report.head_before, "head-0");
    assert_eq!(report.head_after, "commit-1");
    assert_eq!(report.commits(), vec!["commit-1"]);
    assert_eq!(ledger.state(), LedgerState::Empty);
}

#[tokio::test]
async fn test_batch_failure_leaves_everything_staged() {
    let server = MockServer::start().await;
    let session = session(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("{REPO}/git/ref/heads/main")))
        .respond_with(ResponseTemplate::new(409).set_body_string(r#"{"message":"Git Repository is empty."}"#))
        .mount(&server)
        .await;

    let mut ledger = Ledger::new("survival");
    ledger.add_pending_change(jar("jei.jar")).unwrap();

    let err = submit_ledger(
        &session,
        &mut ledger,
        SubmitMode::Batch,
        BatchOptions {
            large_item_threshold: 1024,
            large_items: LargeItemPolicy::Split,
        },
        &(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.api_body(), Some(r#"{"message":"Git Repository is empty."}"#));
    assert_eq!(ledger.state(), LedgerState::Staging);
    assert_eq!(ledger.counts().total(), 1);
}
