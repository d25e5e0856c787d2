// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{list_all, list_files};
use crate::layout::Slot;
use crate::remote::test_utils::{MockStore, test_repo};
use crate::remote::{Content, ContentEntry, EntryKind, Session};

fn file(dir: &str, name: &str, size: u64) -> ContentEntry {
    ContentEntry {
        kind: EntryKind::File,
        name: name.to_string(),
        path: format!("{dir}/{name}"),
        size,
        sha: format!("sha-{name}"),
        content: None,
    }
}

#[tokio::test]
async fn test_missing_directory_lists_empty() {
    let session = Session::with_store(MockStore::new(), test_repo())
        .await
        .unwrap();

    let files = list_files(&session, "survival", &Slot::mods(Slot::REQUIRED))
        .await
        .unwrap();

    assert!(files.is_empty());
}

#[tokio::test]
async fn test_other_errors_propagate() {
    let dir = "docs/servers/survival/forgemods/required";
    let store = MockStore::new().fail_path(dir);
    let session = Session::with_store(store, test_repo()).await.unwrap();

    assert!(
        list_files(&session, "survival", &Slot::mods(Slot::REQUIRED))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_list_all_skips_subdirectories() {
    let files_dir = "docs/servers/survival/files";
    let mods_dir = "docs/servers/survival/forgemods/required";
    let mut shaderpacks = file(files_dir, "shaderpacks", 0);
    shaderpacks.kind = EntryKind::Dir;

    let store = MockStore::new()
        .with_content(
            mods_dir,
            Content::Directory(vec![file(mods_dir, "jei.jar", 100), file(mods_dir, "ae2.jar", 50)]),
        )
        .with_content(
            files_dir,
            Content::Directory(vec![shaderpacks, file(files_dir, "options.txt", 7)]),
        );
    let session = Session::with_store(store, test_repo()).await.unwrap();

    let listings = list_all(&session, "survival").await.unwrap();

    assert_eq!(listings.len(), 6);
    assert_eq!(listings[0].files.len(), 2);
    assert_eq!(listings[0].total_size(), 150);
    assert!(listings[0].find("jei.jar").is_some());
    let loose: Vec<_> = listings[5].files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(loose, vec!["options.txt"]);
    assert_eq!(session.store().count("get_content"), 6);
}
