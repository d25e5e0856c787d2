// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Batch mode: Git Data API commits.
//!
//! ```text
//! head = branch_head(branch)
//!
//! large item (payload > threshold, split policy), one at a time:
//!   blob = create_blob(payload)
//!   tree = create_tree(commit_tree(head), [path -> blob, from -> null])
//!   head = create_commit(message, tree, [head]); update_ref(branch, head)
//!
//! regular items, if any:
//!   base = commit_tree(head)
//!   add     path -> create_blob(payload)
//!   move    to   -> create_blob(payload) or existing sha; from -> null
//!   delete  path -> null
//!   tree = create_tree(base, entries)
//!   head = create_commit("Batch update: n changes ...", tree, [head])
//!   update_ref(branch, head)
//! ```
//!
//! The first failure stops everything. Once a large-item commit has moved
//! the branch, a later failure is a [`SubmitError::ConsistencyGap`].

use std::future::Future;

use tracing::{debug, error, info, warn};

use super::{BatchOptions, SubmitProgress, action_name};
use crate::config::types::LargeItemPolicy;
use crate::error::{RemoteError, RemoteResult, SubmitError};
use crate::ledger::{ChangeKind, LedgerSnapshot};
use crate::remote::{RemoteStore, Session, TreeEntry, encode_content};

/// Outcome of a batch submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Branch head before the first commit.
    pub head_before: String,
    /// Branch head after the last commit.
    pub head_after: String,
    /// One commit per large item, in order.
    pub large_commits: Vec<String>,
    /// The commit holding every regular item, if there were any.
    pub regular_commit: Option<String>,
    /// Number of changes applied.
    pub changes: usize,
    /// Bytes of payload sent as blobs.
    pub uploaded_bytes: u64,
}

impl BatchReport {
    /// Every commit created, oldest first.
    #[must_use]
    pub fn commits(&self) -> Vec<&str> {
        self.large_commits
            .iter()
            .chain(self.regular_commit.as_ref())
            .map(String::as_str)
            .collect()
    }

    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Successfully submitted {} changes in {} commit(s). Total uploaded: {}",
            self.changes,
            self.commits().len(),
            super::format_size(self.uploaded_bytes)
        )
    }
}

/// A staged change resolved to repository paths.
#[derive(Debug, Clone)]
struct BatchItem<'a> {
    kind: ChangeKind,
    file_name: &'a str,
    /// Target path: destination for adds and moves.
    path: String,
    payload: Option<&'a [u8]>,
    /// Blob to reuse for a move without a re-read payload.
    existing_sha: Option<&'a str>,
    /// Path removed by a move.
    source_path: Option<String>,
}

impl BatchItem<'_> {
    fn payload_len(&self) -> u64 {
        self.payload.map_or(0, |p| p.len() as u64)
    }
}

fn plan<'a>(servers_root: &str, server: &str, snapshot: &'a LedgerSnapshot) -> Vec<BatchItem<'a>> {
    let adds = snapshot.new.iter().map(|f| BatchItem {
        kind: ChangeKind::New,
        file_name: &f.file_name,
        path: f.slot.file_path(servers_root, server, &f.file_name),
        payload: Some(&f.data),
        existing_sha: None,
        source_path: None,
    });
    let moves = snapshot.moved.iter().map(|m| BatchItem {
        kind: ChangeKind::Moved,
        file_name: &m.file_name,
        path: m.to_slot().file_path(servers_root, server, &m.file_name),
        payload: m.data.as_deref(),
        existing_sha: Some(&m.sha),
        source_path: Some(m.from_slot().file_path(servers_root, server, &m.file_name)),
    });
    let deletes = snapshot
        .deleted
        .iter()
        .filter(|d| {
            if d.file_path.is_empty() {
                warn!(file = %d.file_name, "delete has no remote path, skipping it");
                return false;
            }
            true
        })
        .map(|d| BatchItem {
            kind: ChangeKind::Deleted,
            file_name: &d.file_name,
            path: d.file_path.clone(),
            payload: None,
            existing_sha: None,
            source_path: None,
        });

    adds.chain(moves).chain(deletes).collect()
}

fn is_large(item: &BatchItem<'_>, options: BatchOptions) -> bool {
    options.large_items == LargeItemPolicy::Split
        && item.kind != ChangeKind::Deleted
        && item.payload_len() > options.large_item_threshold
}

/// Commits `submit_batch` would create for `snapshot`, one line per change.
#[must_use]
pub fn outline(
    servers_root: &str,
    server: &str,
    snapshot: &LedgerSnapshot,
    options: BatchOptions,
) -> Vec<String> {
    let (large, regular): (Vec<_>, Vec<_>) = plan(servers_root, server, snapshot)
        .into_iter()
        .partition(|item| is_large(item, options));

    let mut lines = Vec::new();
    for item in &large {
        lines.push(format!(
            "commit \"{}\" ({})",
            large_item_message(item.kind, item.file_name),
            super::format_size(item.payload_len())
        ));
        lines.push(format!("  + {}", item.path));
        if let Some(source) = &item.source_path {
            lines.push(format!("  - {source}"));
        }
    }

    if regular.is_empty() {
        return lines;
    }

    lines.push(format!(
        "commit \"🎮 Batch update: {} changes\"",
        regular.len()
    ));
    for item in &regular {
        match item.kind {
            ChangeKind::Deleted => lines.push(format!("  - {}", item.path)),
            ChangeKind::New | ChangeKind::Moved => {
                lines.push(format!("  + {}", item.path));
                if let Some(source) = &item.source_path {
                    lines.push(format!("  - {source}"));
                }
            }
        }
    }
    lines
}

/// Commit message of a large item's own commit.
#[must_use]
pub fn large_item_message(kind: ChangeKind, file_name: &str) -> String {
    match kind {
        ChangeKind::Moved => format!("🔄 Move: {file_name}"),
        _ => format!("➕ Add: {file_name}"),
    }
}

/// Commit message of the regular batch commit.
#[must_use]
pub fn batch_message<'a>(changes: impl IntoIterator<Item = (ChangeKind, &'a str)>) -> String {
    let lines: Vec<String> = changes
        .into_iter()
        .map(|(kind, name)| format!("{}: {name}", action_name(kind)))
        .collect();
    format!(
        "🎮 Batch update: {} changes\n\n{}",
        lines.len(),
        lines.join("\n")
    )
}

/// Runs remote steps, turning failures into [`SubmitError`].
struct Steps<'a> {
    progress: &'a dyn SubmitProgress,
    applied: Vec<String>,
}

impl Steps<'_> {
    async fn run<T>(
        &self,
        stage: String,
        call: impl Future<Output = RemoteResult<T>>,
    ) -> Result<T, SubmitError> {
        self.progress.step(&stage);
        match call.await {
            Ok(value) => {
                self.progress.finished(true);
                Ok(value)
            }
            Err(source) => {
                self.progress.finished(false);
                error!(
                    stage = %stage,
                    error = %source,
                    body = ?source.api_body(),
                    applied = self.applied.len(),
                    "batch aborted"
                );
                Err(self.failure(stage, source))
            }
        }
    }

    fn failure(&self, stage: String, source: RemoteError) -> SubmitError {
        if self.applied.is_empty() {
            SubmitError::Aborted { stage, source }
        } else {
            SubmitError::ConsistencyGap {
                stage,
                applied_commits: self.applied.clone(),
                source,
            }
        }
    }
}

/// Apply `snapshot` through blobs, trees and commits.
///
/// # Errors
///
/// Returns the first failing step as `SubmitError::Aborted`, or as
/// `SubmitError::ConsistencyGap` when large-item commits already reached
/// the branch.
pub async fn submit_batch<S: RemoteStore>(
    session: &Session<S>,
    server: &str,
    snapshot: &LedgerSnapshot,
    options: BatchOptions,
    progress: &dyn SubmitProgress,
) -> Result<BatchReport, SubmitError> {
    let store = session.store();
    let branch = session.branch();
    let items = plan(session.servers_root(), server, snapshot);

    let (large, regular): (Vec<_>, Vec<_>) =
        items.into_iter().partition(|item| is_large(item, options));
    debug!(
        large = large.len(),
        regular = regular.len(),
        threshold = options.large_item_threshold,
        policy = %options.large_items,
        "batch planned"
    );

    let mut steps = Steps {
        progress,
        applied: Vec::new(),
    };
    let mut report = BatchReport::default();

    let mut head = steps
        .run(format!("resolve {branch}"), store.branch_head(branch))
        .await?;
    report.head_before.clone_from(&head);

    // A large move adds and removes in the same commit, so the mod is never
    // present in both categories.
    for item in &large {
        let payload = item.payload.unwrap_or_default();
        let name = item.file_name;

        let blob = steps
            .run(
                format!("create blob for {name}"),
                store.create_blob(&encode_content(payload)),
            )
            .await?;
        let base_tree = steps
            .run(format!("read commit {head}"), store.commit_tree(&head))
            .await?;
        let mut entries = vec![TreeEntry::blob(&item.path, blob)];
        if let Some(source) = &item.source_path {
            entries.push(TreeEntry::removal(source));
        }
        let tree = steps
            .run(
                format!("create tree for {name}"),
                store.create_tree(&base_tree, &entries),
            )
            .await?;
        let parents = [head.clone()];
        let commit = steps
            .run(
                format!("create commit for {name}"),
                store.create_commit(&large_item_message(item.kind, name), &tree, &parents),
            )
            .await?;
        steps
            .run(
                format!("update {branch} for {name}"),
                store.update_ref(branch, &commit),
            )
            .await?;

        info!(file = name, commit = %commit, size = item.payload_len(), "large item committed");
        steps.applied.push(commit.clone());
        report.large_commits.push(commit.clone());
        report.uploaded_bytes += item.payload_len();
        report.changes += 1;
        head = commit;
    }

    if !regular.is_empty() {
        let base_tree = steps
            .run(format!("read commit {head}"), store.commit_tree(&head))
            .await?;

        let mut entries = Vec::new();
        for item in &regular {
            match item.kind {
                ChangeKind::Deleted => entries.push(TreeEntry::removal(&item.path)),
                ChangeKind::New | ChangeKind::Moved => {
                    let sha = if let Some(payload) = item.payload {
                        let sha = steps
                            .run(
                                format!("create blob for {}", item.file_name),
                                store.create_blob(&encode_content(payload)),
                            )
                            .await?;
                        report.uploaded_bytes += item.payload_len();
                        sha
                    } else {
                        item.existing_sha.unwrap_or_default().to_string()
                    };
                    entries.push(TreeEntry::blob(&item.path, sha));
                    if let Some(source) = &item.source_path {
                        entries.push(TreeEntry::removal(source));
                    }
                }
            }
        }

        let tree = steps
            .run(
                format!("create tree with {} entries", entries.len()),
                store.create_tree(&base_tree, &entries),
            )
            .await?;

        let message = batch_message(regular.iter().map(|i| (i.kind, i.file_name)));
        let parents = [head.clone()];
        let commit = steps
            .run(
                "create batch commit".to_string(),
                store.create_commit(&message, &tree, &parents),
            )
            .await?;
        steps
            .run(format!("update {branch}"), store.update_ref(branch, &commit))
            .await?;

        info!(commit = %commit, changes = regular.len(), "batch committed");
        report.changes += regular.len();
        report.regular_commit = Some(commit.clone());
        head = commit;
    }

    report.head_after = head;
    Ok(report)
}
