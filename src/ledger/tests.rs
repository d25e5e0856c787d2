// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::store;
use super::{
    ChangeKind, DeletedFile, Ledger, LedgerCounts, LedgerSnapshot, LedgerState, MovedFile, NewFile,
};
use crate::error::LedgerError;
use crate::layout::{FileType, Slot};

fn new_jar(name: &str) -> NewFile {
    NewFile::new(name, Slot::mods(Slot::REQUIRED), b"PK\x03\x04data".to_vec())
}

fn moved(name: &str) -> MovedFile {
    MovedFile {
        file_name: name.to_string(),
        file_type: FileType::ForgeMods,
        from_category: Slot::REQUIRED.to_string(),
        to_category: Slot::OPTIONAL_OFF.to_string(),
        sha: format!("sha-{name}"),
        data: None,
    }
}

fn deleted(name: &str) -> DeletedFile {
    DeletedFile {
        file_name: name.to_string(),
        file_path: format!("docs/servers/s/files/{name}"),
        file_type: FileType::Files,
        sha: format!("sha-{name}"),
    }
}

fn staged() -> Ledger {
    let mut ledger = Ledger::new("survival");
    ledger.add_pending_change(new_jar("a.jar")).unwrap();
    ledger.add_pending_change(moved("b.jar")).unwrap();
    ledger.add_pending_change(deleted("c.txt")).unwrap();
    ledger
}

#[test]
fn test_same_kind_and_name_yields_one_entry() {
    let mut ledger = Ledger::new("survival");

    assert!(ledger.add_pending_change(new_jar("jei.jar")).unwrap());
    let mut again = new_jar("jei.jar");
    again.slot = Slot::mods(Slot::OPTIONAL_ON);
    assert!(!ledger.add_pending_change(again).unwrap());

    assert_eq!(ledger.counts().new, 1);
    assert_eq!(ledger.new_files()[0].slot, Slot::mods(Slot::REQUIRED));
}

#[test]
fn test_same_name_in_different_kinds_is_allowed() {
    let mut ledger = Ledger::new("survival");
    ledger.add_pending_change(new_jar("x.jar")).unwrap();
    ledger.add_pending_change(moved("x.jar")).unwrap();
    ledger.add_pending_change(deleted("x.jar")).unwrap();

    assert_eq!(
        ledger.counts(),
        LedgerCounts {
            new: 1,
            moved: 1,
            deleted: 1
        }
    );
}

#[test]
fn test_remove_filters_by_name() {
    let mut ledger = staged();

    assert_eq!(
        ledger
            .remove_pending_change(ChangeKind::New, "a.jar")
            .unwrap(),
        1
    );
    assert_eq!(
        ledger
            .remove_pending_change(ChangeKind::New, "a.jar")
            .unwrap(),
        0
    );
    assert_eq!(
        ledger
            .remove_pending_change(ChangeKind::Deleted, "b.jar")
            .unwrap(),
        0
    );
    assert_eq!(ledger.counts().total(), 2);
}

#[test]
fn test_clear_zeroes_all_counts() {
    let mut ledger = staged();
    assert_eq!(ledger.state(), LedgerState::Staging);

    ledger.clear().unwrap();

    assert_eq!(ledger.counts(), LedgerCounts::default());
    assert_eq!(ledger.state(), LedgerState::Empty);
}

#[test]
fn test_begin_submit_requires_staged_changes() {
    let mut ledger = Ledger::new("survival");
    assert!(matches!(
        ledger.begin_submit(),
        Err(LedgerError::NothingStaged)
    ));
}

#[test]
fn test_submitting_rejects_mutation_and_second_submit() {
    let mut ledger = staged();
    let snapshot = ledger.begin_submit().unwrap();
    assert_eq!(snapshot.counts().total(), 3);
    assert_eq!(ledger.state(), LedgerState::Submitting);

    assert!(matches!(
        ledger.begin_submit(),
        Err(LedgerError::SubmitInProgress)
    ));
    assert!(matches!(
        ledger.add_pending_change(new_jar("z.jar")),
        Err(LedgerError::SubmitInProgress)
    ));
    assert!(matches!(
        ledger.remove_pending_change(ChangeKind::New, "a.jar"),
        Err(LedgerError::SubmitInProgress)
    ));
    assert!(matches!(ledger.clear(), Err(LedgerError::SubmitInProgress)));
}

#[test]
fn test_finish_submit_transitions() {
    let mut ledger = staged();
    let snapshot = ledger.begin_submit().unwrap();
    let residual = LedgerSnapshot {
        moved: snapshot.moved,
        ..LedgerSnapshot::default()
    };
    assert_eq!(ledger.finish_submit(residual).unwrap(), LedgerState::Staging);
    assert_eq!(ledger.counts().moved, 1);
    assert_eq!(ledger.counts().new, 0);

    ledger.begin_submit().unwrap();
    assert_eq!(
        ledger.finish_submit(LedgerSnapshot::default()).unwrap(),
        LedgerState::Empty
    );

    assert!(matches!(
        ledger.finish_submit(LedgerSnapshot::default()),
        Err(LedgerError::NotSubmitting)
    ));
}

#[test]
fn test_snapshot_new_bytes_uses_declared_size() {
    let mut snapshot = LedgerSnapshot::default();
    let mut file = new_jar("a.jar");
    file.size = 3000;
    snapshot.insert(file.into());
    snapshot.insert(new_jar("b.jar").into());
    assert_eq!(snapshot.new_bytes(), 3008);
}

#[test]
fn test_serialized_payload_is_base64() {
    let ledger = staged();
    let json = serde_json::to_value(&ledger).unwrap();

    assert_eq!(json["server"], "survival");
    assert_eq!(json["new"][0]["data"], "UEsDBGRhdGE=");
    assert!(json["moved"][0].get("data").is_none());
    assert!(json.get("submitting").is_none());
}

#[test]
fn test_store_round_trip_and_server_binding() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("stage.json");
    let mut ledger = staged();
    let mut with_data = moved("d.jar");
    with_data.data = Some(vec![0, 159, 255]);
    ledger.add_pending_change(with_data).unwrap();

    store::save(&path, &ledger).unwrap();

    let back = store::load(&path, "survival").unwrap();
    assert_eq!(back, ledger);
    assert_eq!(back.state(), LedgerState::Staging);

    let other = store::load(&path, "creative").unwrap();
    assert!(other.is_empty());
    assert_eq!(other.server(), "creative");
}

#[test]
fn test_store_save_empty_removes_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("stage.json");
    store::save(&path, &staged()).unwrap();
    assert!(path.exists());

    store::save(&path, &Ledger::new("survival")).unwrap();
    assert!(!path.exists());
    assert!(store::load_any(&path).unwrap().is_none());
}
