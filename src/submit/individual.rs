// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Individual mode: one Contents API call per staged file.

use tracing::{debug, warn};

use super::{SubmitProgress, format_size};
use crate::error::RemoteError;
use crate::layout::base_name;
use crate::ledger::{ChangeKind, LedgerSnapshot};
use crate::remote::{RemoteStore, Session, encode_content};

/// One item that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub kind: ChangeKind,
    pub file_name: String,
    pub message: String,
    /// Raw API error body, if GitHub sent one.
    pub api_body: Option<String>,
}

impl ItemFailure {
    fn new(kind: ChangeKind, file_name: &str, err: &RemoteError) -> Self {
        Self {
            kind,
            file_name: file_name.to_string(),
            message: err.to_string(),
            api_body: err.api_body().map(str::to_string),
        }
    }
}

/// Outcome of an individual-mode submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndividualReport {
    pub success: usize,
    pub failed: usize,
    /// Declared bytes of successful uploads.
    pub uploaded_bytes: u64,
    /// Declared bytes of every staged upload.
    pub total_bytes: u64,
    /// Moves left staged; this mode does not apply them.
    pub moves_skipped: usize,
    /// Deletes dropped because they carried no remote path.
    pub deletes_without_path: usize,
    pub failures: Vec<ItemFailure>,
}

impl IndividualReport {
    #[must_use]
    pub fn summary(&self) -> String {
        let mut text = if self.failed > 0 {
            format!(
                "Completed with errors: {} succeeded, {} failed. Total uploaded: {}",
                self.success,
                self.failed,
                format_size(self.uploaded_bytes)
            )
        } else {
            format!(
                "Successfully submitted {} changes. Total uploaded: {}",
                self.success,
                format_size(self.uploaded_bytes)
            )
        };
        if self.moves_skipped > 0 {
            text.push_str(&format!(
                "\n{} move(s) not applied: individual mode cannot move files, \
                 use batch mode or delete and re-upload them",
                self.moves_skipped
            ));
        }
        text
    }
}

/// Upload percentage, guarding an all-empty batch.
#[must_use]
pub fn percent(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (u128::from(done) * 100 + u128::from(total) / 2) / u128::from(total);
    u8::try_from(pct.min(100)).unwrap_or(100)
}

/// Commit message of a single upload.
#[must_use]
pub fn add_message(file_type: &str, file_name: &str) -> String {
    format!("➕ Add {file_type}: {file_name}")
}

/// Commit message of a single delete.
#[must_use]
pub fn delete_message(file_path: &str) -> String {
    format!("🗑️ Delete {}", base_name(file_path))
}

/// Calls `submit_individual` would make for `snapshot`, in order.
#[must_use]
pub fn outline(servers_root: &str, server: &str, snapshot: &LedgerSnapshot) -> Vec<String> {
    let mut lines: Vec<String> = snapshot
        .new
        .iter()
        .map(|f| {
            let path = f.slot.file_path(servers_root, server, &f.file_name);
            match &f.replaces_sha {
                Some(sha) => format!("put {path} ({}, replaces {sha})", format_size(f.size)),
                None => format!("put {path} ({})", format_size(f.size)),
            }
        })
        .collect();
    lines.extend(snapshot.deleted.iter().map(|d| {
        if d.file_path.is_empty() {
            format!("skip delete of {}: no remote path", d.file_name)
        } else {
            format!("delete {}", d.file_path)
        }
    }));
    lines.extend(
        snapshot
            .moved
            .iter()
            .map(|m| format!("keep move of {} staged", m.file_name)),
    );
    lines
}

/// Apply new files, then deletes, one call each.
///
/// Returns the report and the residual: failed items plus all moves.
pub async fn submit_individual<S: RemoteStore>(
    session: &Session<S>,
    server: &str,
    snapshot: &LedgerSnapshot,
    progress: &dyn SubmitProgress,
) -> (IndividualReport, LedgerSnapshot) {
    let store = session.store();
    let branch = session.branch();
    let mut report = IndividualReport {
        total_bytes: snapshot.new_bytes(),
        ..IndividualReport::default()
    };
    let mut residual = LedgerSnapshot::default();

    let total = snapshot.new.len();
    for (i, file) in snapshot.new.iter().enumerate() {
        let pct = percent(report.uploaded_bytes, report.total_bytes);
        progress.uploading(i + 1, total, &file.file_name, file.size, pct);

        let path = file
            .slot
            .file_path(session.servers_root(), server, &file.file_name);
        debug!(path, size = file.size, "uploading");

        let result = store
            .create_or_update_file(
                &path,
                &encode_content(&file.data),
                &add_message(file.slot.file_type.as_str(), &file.file_name),
                branch,
                file.replaces_sha.as_deref(),
            )
            .await;

        match result {
            Ok(()) => {
                report.success += 1;
                report.uploaded_bytes += file.size;
                progress.finished(true);
            }
            Err(err) => {
                warn!(file = %file.file_name, error = %err, body = ?err.api_body(), "upload failed");
                report.failed += 1;
                report
                    .failures
                    .push(ItemFailure::new(ChangeKind::New, &file.file_name, &err));
                residual.new.push(file.clone());
                progress.finished(false);
            }
        }
    }

    let total = snapshot.deleted.len();
    for (i, file) in snapshot.deleted.iter().enumerate() {
        progress.deleting(i + 1, total, &file.file_name);

        if file.file_path.is_empty() {
            warn!(file = %file.file_name, "delete has no remote path, dropping it");
            report.deletes_without_path += 1;
            progress.finished(false);
            continue;
        }

        let result = store
            .delete_file(
                &file.file_path,
                &delete_message(&file.file_path),
                &file.sha,
                branch,
            )
            .await;

        match result {
            Ok(()) => {
                report.success += 1;
                progress.finished(true);
            }
            Err(err) => {
                warn!(file = %file.file_name, error = %err, body = ?err.api_body(), "delete failed");
                report.failed += 1;
                report
                    .failures
                    .push(ItemFailure::new(ChangeKind::Deleted, &file.file_name, &err));
                residual.deleted.push(file.clone());
                progress.finished(false);
            }
        }
    }

    if !snapshot.moved.is_empty() {
        warn!(
            count = snapshot.moved.len(),
            "moves are not applied in individual mode and stay staged"
        );
        report.moves_skipped = snapshot.moved.len();
        residual.moved.clone_from(&snapshot.moved);
    }

    (report, residual)
}
