// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{
    ServerMetadata, get_server_metadata, list_servers, save_last_server, select_server,
    update_server_metadata,
};
use crate::remote::test_utils::{Call, MockStore, test_repo};
use crate::remote::{Content, ContentEntry, EntryKind, Session, decode_content, encode_content};
use crate::secrets::{LAST_SERVER_KEY, MemorySecretStore, SecretStore};

const META_PATH: &str = "docs/servers/survival/servermeta.json";

fn entry(kind: EntryKind, name: &str) -> ContentEntry {
    ContentEntry {
        kind,
        name: name.to_string(),
        path: format!("docs/servers/{name}"),
        size: 0,
        sha: format!("sha-{name}"),
        content: None,
    }
}

fn metadata_file(json: &str) -> Content {
    Content::File(ContentEntry {
        kind: EntryKind::File,
        name: "servermeta.json".to_string(),
        path: META_PATH.to_string(),
        size: json.len() as u64,
        sha: "meta-sha".to_string(),
        content: Some(encode_content(json.as_bytes())),
    })
}

async fn session(store: MockStore) -> Session<MockStore> {
    Session::with_store(store, test_repo()).await.unwrap()
}

#[test]
fn test_select_server_prefers_last_if_present() {
    let servers = vec!["a".to_string(), "b".to_string()];
    assert_eq!(select_server(&servers, Some("b")).as_deref(), Some("b"));
    assert_eq!(select_server(&servers, Some("gone")).as_deref(), Some("a"));
    assert_eq!(select_server(&servers, None).as_deref(), Some("a"));
    assert_eq!(select_server(&[], Some("a")), None);
}

#[tokio::test]
async fn test_list_servers_keeps_directories_only() {
    let store = MockStore::new().with_content(
        "docs/servers",
        Content::Directory(vec![
            entry(EntryKind::Dir, "creative"),
            entry(EntryKind::File, "README.md"),
            entry(EntryKind::Dir, "survival"),
        ]),
    );
    let session = session(store).await;
    let secrets = MemorySecretStore::new();
    save_last_server(&secrets, "survival").unwrap();

    let list = list_servers(&session, &secrets).await.unwrap();

    assert_eq!(list.servers, vec!["creative", "survival"]);
    assert_eq!(list.selected.as_deref(), Some("survival"));
    assert_eq!(
        secrets.get(LAST_SERVER_KEY).unwrap().as_deref(),
        Some("survival")
    );
}

#[tokio::test]
async fn test_get_metadata_keeps_unknown_fields() {
    let json = r#"{
        "meta": {"name": "Survival", "address": "play.example.net", "mainServer": true, "icon": "x.png"},
        "modules": [{"id": "forge"}]
    }"#;
    let session = session(MockStore::new().with_content(META_PATH, metadata_file(json))).await;

    let file = get_server_metadata(&session, "survival").await.unwrap();

    assert_eq!(file.sha, "meta-sha");
    assert_eq!(file.metadata.meta.name, "Survival");
    assert!(file.metadata.meta.main_server);
    assert!(!file.metadata.meta.autoconnect);
    assert_eq!(file.metadata.meta.extra["icon"], "x.png");
    assert!(file.metadata.rest.contains_key("modules"));
}

#[tokio::test]
async fn test_update_metadata_writes_pretty_json_with_current_sha() {
    let json = r#"{"meta": {"name": "Old"}, "modules": []}"#;
    let session = session(MockStore::new().with_content(META_PATH, metadata_file(json))).await;

    let mut metadata = get_server_metadata(&session, "survival")
        .await
        .unwrap()
        .metadata;
    metadata.meta.name = "New".to_string();
    metadata.meta.autoconnect = true;
    update_server_metadata(&session, "survival", &metadata)
        .await
        .unwrap();

    let calls = session.store().calls();
    let Some(Call::CreateOrUpdateFile {
        path,
        content,
        message,
        sha,
    }) = calls.last()
    else {
        panic!("expected a file update, got {calls:?}");
    };
    assert_eq!(path, META_PATH);
    assert_eq!(sha.as_deref(), Some("meta-sha"));
    assert_eq!(message, "⚙️ Update server settings for survival");

    let written = String::from_utf8(decode_content("test", content).unwrap()).unwrap();
    assert!(written.contains("\n  \"meta\""));
    let parsed: ServerMetadata = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed, metadata);
}

#[tokio::test]
async fn test_missing_metadata_is_an_error() {
    let session = session(MockStore::new()).await;
    assert!(get_server_metadata(&session, "survival").await.is_err());
}
