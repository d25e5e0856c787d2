// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pending change ledger.
//!
//! ```text
//!            add / remove                 begin_submit
//!   Empty ----------------> Staging --------------------> Submitting
//!     ^                     |  ^                              |
//!     |       clear         |  |   finish_submit(residual)    |
//!     +---------------------+  +------------------------------+
//!     +-----------------------------------------------------+
//!                 finish_submit(empty residual)
//! ```
//!
//! Three ordered lists (new, moved, deleted), each holding at most one
//! change per file name. While a submission runs every mutation is
//! rejected with [`LedgerError::SubmitInProgress`].

mod payload;
pub mod store;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LedgerError;
use crate::layout::{FileType, Slot};

/// Which of the three lists a change lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    New,
    Moved,
    Deleted,
}

impl ChangeKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Moved => "moved",
            Self::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file to upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFile {
    pub file_name: String,
    pub slot: Slot,
    /// Raw file contents.
    #[serde(with = "payload")]
    pub data: Vec<u8>,
    /// Declared size shown to the operator and used for progress.
    pub size: u64,
    /// Sha of the remote file this upload overwrites.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaces_sha: Option<String>,
}

impl NewFile {
    #[must_use]
    pub fn new(file_name: impl Into<String>, slot: Slot, data: Vec<u8>) -> Self {
        let size = data.len() as u64;
        Self {
            file_name: file_name.into(),
            slot,
            data,
            size,
            replaces_sha: None,
        }
    }
}

/// A remote file to move to another category of the same type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedFile {
    pub file_name: String,
    pub file_type: FileType,
    pub from_category: String,
    pub to_category: String,
    /// Current blob sha at the source path.
    pub sha: String,
    /// Contents re-read by the operator, if any.
    #[serde(
        default,
        with = "payload::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Vec<u8>>,
}

impl MovedFile {
    #[must_use]
    pub fn from_slot(&self) -> Slot {
        Slot::new(self.file_type, self.from_category.clone())
    }

    #[must_use]
    pub fn to_slot(&self) -> Slot {
        Slot::new(self.file_type, self.to_category.clone())
    }
}

/// A remote file to delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedFile {
    pub file_name: String,
    /// Full repository path; an empty path cannot be deleted.
    pub file_path: String,
    pub file_type: FileType,
    pub sha: String,
}

/// One staged change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingChange {
    Add(NewFile),
    Move(MovedFile),
    Delete(DeletedFile),
}

impl PendingChange {
    #[must_use]
    pub const fn kind(&self) -> ChangeKind {
        match self {
            Self::Add(_) => ChangeKind::New,
            Self::Move(_) => ChangeKind::Moved,
            Self::Delete(_) => ChangeKind::Deleted,
        }
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        match self {
            Self::Add(c) => &c.file_name,
            Self::Move(c) => &c.file_name,
            Self::Delete(c) => &c.file_name,
        }
    }
}

impl From<NewFile> for PendingChange {
    fn from(change: NewFile) -> Self {
        Self::Add(change)
    }
}

impl From<MovedFile> for PendingChange {
    fn from(change: MovedFile) -> Self {
        Self::Move(change)
    }
}

impl From<DeletedFile> for PendingChange {
    fn from(change: DeletedFile) -> Self {
        Self::Delete(change)
    }
}

/// Session state of a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerState {
    Empty,
    Staging,
    Submitting,
}

impl std::fmt::Display for LedgerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Staging => write!(f, "staging"),
            Self::Submitting => write!(f, "submitting"),
        }
    }
}

/// Per-list counts for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerCounts {
    pub new: usize,
    pub moved: usize,
    pub deleted: usize,
}

impl LedgerCounts {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.new + self.moved + self.deleted
    }
}

impl std::fmt::Display for LedgerCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} new, {} moved, {} deleted",
            self.new, self.moved, self.deleted
        )
    }
}

/// The staged lists, detached from the ledger for one submission. Also
/// used for the residual handed back by `finish_submit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub new: Vec<NewFile>,
    #[serde(default)]
    pub moved: Vec<MovedFile>,
    #[serde(default)]
    pub deleted: Vec<DeletedFile>,
}

impl LedgerSnapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.moved.is_empty() && self.deleted.is_empty()
    }

    #[must_use]
    pub fn counts(&self) -> LedgerCounts {
        LedgerCounts {
            new: self.new.len(),
            moved: self.moved.len(),
            deleted: self.deleted.len(),
        }
    }

    /// Sum of declared sizes of new files.
    #[must_use]
    pub fn new_bytes(&self) -> u64 {
        self.new.iter().map(|f| f.size).sum()
    }

    /// Insert `change` unless its list already holds the same file name.
    /// Returns whether it was inserted.
    pub fn insert(&mut self, change: PendingChange) -> bool {
        fn push_unique<T>(list: &mut Vec<T>, item: T, name: impl Fn(&T) -> &str) -> bool {
            if list.iter().any(|c| name(c) == name(&item)) {
                return false;
            }
            list.push(item);
            true
        }

        match change {
            PendingChange::Add(c) => push_unique(&mut self.new, c, |c| c.file_name.as_str()),
            PendingChange::Move(c) => push_unique(&mut self.moved, c, |c| c.file_name.as_str()),
            PendingChange::Delete(c) => push_unique(&mut self.deleted, c, |c| c.file_name.as_str()),
        }
    }

    /// Drop every entry of `kind` named `file_name`. Returns how many went.
    pub fn remove(&mut self, kind: ChangeKind, file_name: &str) -> usize {
        fn retain<T>(list: &mut Vec<T>, keep: impl Fn(&T) -> bool) -> usize {
            let before = list.len();
            list.retain(keep);
            before - list.len()
        }

        match kind {
            ChangeKind::New => retain(&mut self.new, |c| c.file_name != file_name),
            ChangeKind::Moved => retain(&mut self.moved, |c| c.file_name != file_name),
            ChangeKind::Deleted => retain(&mut self.deleted, |c| c.file_name != file_name),
        }
    }
}

/// Staged changes for one server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    server: String,
    #[serde(flatten)]
    changes: LedgerSnapshot,
    #[serde(skip)]
    submitting: bool,
}

impl Ledger {
    /// An empty ledger bound to `server`.
    #[must_use]
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            changes: LedgerSnapshot::default(),
            submitting: false,
        }
    }

    #[must_use]
    pub fn server(&self) -> &str {
        &self.server
    }

    #[must_use]
    pub fn state(&self) -> LedgerState {
        if self.submitting {
            LedgerState::Submitting
        } else if self.changes.is_empty() {
            LedgerState::Empty
        } else {
            LedgerState::Staging
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    #[must_use]
    pub fn counts(&self) -> LedgerCounts {
        self.changes.counts()
    }

    /// All staged lists.
    #[must_use]
    pub const fn changes(&self) -> &LedgerSnapshot {
        &self.changes
    }

    #[must_use]
    pub fn new_files(&self) -> &[NewFile] {
        &self.changes.new
    }

    #[must_use]
    pub fn moved_files(&self) -> &[MovedFile] {
        &self.changes.moved
    }

    #[must_use]
    pub fn deleted_files(&self) -> &[DeletedFile] {
        &self.changes.deleted
    }

    /// Whether a new file named `file_name` is staged for `slot`.
    #[must_use]
    pub fn has_new(&self, file_name: &str, slot: &Slot) -> bool {
        self.changes
            .new
            .iter()
            .any(|c| c.file_name == file_name && &c.slot == slot)
    }

    /// Stage `change`. A change whose file name is already in its list is
    /// ignored and `Ok(false)` is returned.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::SubmitInProgress` while submitting.
    pub fn add_pending_change(
        &mut self,
        change: impl Into<PendingChange>,
    ) -> Result<bool, LedgerError> {
        self.ensure_idle()?;
        let change = change.into();
        let kind = change.kind();
        let name = change.file_name().to_string();
        let inserted = self.changes.insert(change);
        debug!(%kind, file = %name, inserted, "stage change");
        Ok(inserted)
    }

    /// Remove every change of `kind` named `file_name`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::SubmitInProgress` while submitting.
    pub fn remove_pending_change(
        &mut self,
        kind: ChangeKind,
        file_name: &str,
    ) -> Result<usize, LedgerError> {
        self.ensure_idle()?;
        let removed = self.changes.remove(kind, file_name);
        debug!(%kind, file = file_name, removed, "unstage change");
        Ok(removed)
    }

    /// Drop all staged changes.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::SubmitInProgress` while submitting.
    pub fn clear(&mut self) -> Result<(), LedgerError> {
        self.ensure_idle()?;
        self.changes = LedgerSnapshot::default();
        Ok(())
    }

    /// Enter `Submitting` and hand out the staged changes.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::SubmitInProgress` if already submitting, or
    /// `LedgerError::NothingStaged` if the ledger is empty.
    pub fn begin_submit(&mut self) -> Result<LedgerSnapshot, LedgerError> {
        match self.state() {
            LedgerState::Submitting => Err(LedgerError::SubmitInProgress),
            LedgerState::Empty => Err(LedgerError::NothingStaged),
            LedgerState::Staging => {
                self.submitting = true;
                debug!(counts = %self.counts(), "submission started");
                Ok(self.changes.clone())
            }
        }
    }

    /// Leave `Submitting`; the ledger keeps exactly `residual`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotSubmitting` without a prior `begin_submit`.
    pub fn finish_submit(&mut self, residual: LedgerSnapshot) -> Result<LedgerState, LedgerError> {
        if !self.submitting {
            return Err(LedgerError::NotSubmitting);
        }
        self.submitting = false;
        self.changes = residual;
        debug!(counts = %self.counts(), state = %self.state(), "submission finished");
        Ok(self.state())
    }

    fn ensure_idle(&self) -> Result<(), LedgerError> {
        if self.submitting {
            return Err(LedgerError::SubmitInProgress);
        }
        Ok(())
    }
}
