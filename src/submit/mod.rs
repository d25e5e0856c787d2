// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Flushing the ledger to the repository.
//!
//! ```text
//! submit_ledger
//!   ledger.begin_submit() --> snapshot
//!        |
//!        +-- Individual: new (PUT contents) then deleted (DELETE contents)
//!        |     per-item failures isolated, moves left staged
//!        |
//!        +-- Batch:      branch head
//!        |     large items: blob -> tree -> commit -> ref, one by one
//!        |     the rest:    blobs -> one tree -> one commit -> ref
//!        |     first failure aborts
//!        v
//!   ledger.finish_submit(residual)
//! ```
//!
//! Remote calls are awaited strictly one after another; batch mode threads
//! the branch head from each commit into the next.

pub mod batch;
pub mod individual;


use tracing::info;

use crate::config::types::{LargeItemPolicy, SubmitConfig, SubmitMode};
use crate::error::PanelResult;
use crate::ledger::{ChangeKind, Ledger, LedgerSnapshot};
use crate::remote::{RemoteStore, Session};

pub use batch::{BatchReport, submit_batch};
pub use individual::{IndividualReport, ItemFailure, submit_individual};

/// Observer for submission progress. Every method defaults to a no-op.
pub trait SubmitProgress {
    /// Upload `index` (1-based) of `total` is starting.
    fn uploading(&self, index: usize, total: usize, file_name: &str, size: u64, percent: u8) {
        let _ = (index, total, file_name, size, percent);
    }

    /// Delete `index` (1-based) of `total` is starting.
    fn deleting(&self, index: usize, total: usize, file_name: &str) {
        let _ = (index, total, file_name);
    }

    /// A batch-mode step is starting.
    fn step(&self, description: &str) {
        let _ = description;
    }

    /// An item or step finished.
    fn finished(&self, ok: bool) {
        let _ = ok;
    }
}

/// Progress that goes nowhere.
impl SubmitProgress for () {}

/// Batch-mode tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Payloads strictly larger than this many bytes are "large".
    pub large_item_threshold: u64,
    pub large_items: LargeItemPolicy,
}

impl From<&SubmitConfig> for BatchOptions {
    fn from(config: &SubmitConfig) -> Self {
        Self {
            large_item_threshold: config.large_item_threshold,
            large_items: config.large_items,
        }
    }
}

/// Result of a completed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReport {
    Individual(IndividualReport),
    Batch(BatchReport),
}

impl SubmitReport {
    /// One-paragraph summary for the operator.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Individual(report) => report.summary(),
            Self::Batch(report) => report.summary(),
        }
    }
}

/// Submit everything staged in `ledger`.
///
/// The ledger is `Submitting` for the duration. Afterwards it holds what was
/// not applied: failed items and moves in individual mode, everything when
/// batch mode fails, nothing when batch mode succeeds.
///
/// # Errors
///
/// Returns a ledger error if nothing is staged or a submission is already
/// running, and the batch error if batch mode fails. Individual-mode item
/// failures are reported in [`IndividualReport`], not as errors.
pub async fn submit_ledger<S: RemoteStore>(
    session: &Session<S>,
    ledger: &mut Ledger,
    mode: SubmitMode,
    options: BatchOptions,
    progress: &dyn SubmitProgress,
) -> PanelResult<SubmitReport> {
    let snapshot = ledger.begin_submit()?;
    let server = ledger.server().to_string();
    info!(server, %mode, counts = %snapshot.counts(), "submitting");

    match mode {
        SubmitMode::Individual => {
            let (report, residual) =
                submit_individual(session, &server, &snapshot, progress).await;
            let state = ledger.finish_submit(residual)?;
            info!(
                success = report.success,
                failed = report.failed,
                %state,
                "individual submit done"
            );
            Ok(SubmitReport::Individual(report))
        }
        SubmitMode::Batch => {
            match submit_batch(session, &server, &snapshot, options, progress).await {
                Ok(report) => {
                    ledger.finish_submit(LedgerSnapshot::default())?;
                    info!(head = %report.head_after, "batch submit done");
                    Ok(SubmitReport::Batch(report))
                }
                Err(err) => {
                    ledger.finish_submit(snapshot)?;
                    Err(err.into())
                }
            }
        }
    }
}

/// What a submission of `snapshot` would do, without calling the remote.
#[must_use]
pub fn describe_plan(
    servers_root: &str,
    server: &str,
    snapshot: &LedgerSnapshot,
    mode: SubmitMode,
    options: BatchOptions,
) -> Vec<String> {
    match mode {
        SubmitMode::Individual => individual::outline(servers_root, server, snapshot),
        SubmitMode::Batch => batch::outline(servers_root, server, snapshot, options),
    }
}

/// Verb used for a change in commit messages and summaries.
#[must_use]
pub const fn action_name(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::New => "add",
        ChangeKind::Moved => "move",
        ChangeKind::Deleted => "delete",
    }
}

/// Human-readable byte count: `0 B`, `512 B`, `1.5 KB`, `2 MB`.
///
/// Two decimals at most, trailing zeros dropped, capped at GB.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{rounded:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text} {}", UNITS[unit])
}
