// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Staging rules applied before a change enters the ledger.
//!
//! ```text
//! add     extension per slot --> ZIP header (mods) --> duplicate check
//!         duplicate + force  --> upload replaces the remote blob
//! move    forgemods only, different category, file must exist remotely
//! delete  staged as new here --> unstage
//!         otherwise          --> must exist remotely
//! ```


use std::path::Path;

use tracing::{debug, warn};

use crate::error::{PanelResult, StageError};
use crate::layout::{FileType, Slot};
use crate::ledger::{ChangeKind, DeletedFile, Ledger, MovedFile, NewFile};
use crate::remote::RemoteFileRef;

/// Leading bytes of a ZIP (and therefore JAR) archive.
pub const ZIP_MAGIC: [u8; 4] = *b"PK\x03\x04";

/// What staging did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// Added to the ledger.
    Staged,
    /// Added; the upload will overwrite the remote blob with this sha.
    Replacing { sha: String },
    /// Replaced a change already staged under the same name.
    Restaged,
    /// The ledger already holds a change with this name.
    AlreadyStaged,
    /// A staged new file was dropped instead of deleting anything remotely.
    Unstaged,
}

/// A file read from local disk.
#[derive(Debug, Clone)]
pub struct LocalFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Read `path` for staging.
///
/// # Errors
///
/// Returns `StageError::Read` if the file cannot be read or has no name.
pub async fn read_local_file(path: &Path) -> Result<LocalFile, StageError> {
    let read_error = |source| StageError::Read {
        path: path.display().to_string(),
        source,
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            read_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path has no file name",
            ))
        })?;
    let data = tokio::fs::read(path).await.map_err(read_error)?;
    debug!(path = %path.display(), bytes = data.len(), "read local file");

    Ok(LocalFile { file_name, data })
}

/// Check extension and archive header for an upload into `slot`.
///
/// # Errors
///
/// Returns `StageError::InvalidExtension` or `StageError::NotAnArchive`.
pub fn validate_upload(slot: &Slot, file_name: &str, data: &[u8]) -> Result<(), StageError> {
    if let Some(expected) = slot.required_extension()
        && !file_name.to_lowercase().ends_with(expected)
    {
        return Err(StageError::InvalidExtension {
            slot: slot.to_string(),
            file_name: file_name.to_string(),
            expected,
        });
    }

    if slot.requires_archive() && !data.starts_with(&ZIP_MAGIC) {
        return Err(StageError::NotAnArchive {
            file_name: file_name.to_string(),
        });
    }

    Ok(())
}

/// Stage `file` as a new upload into `slot`.
///
/// `remote` is the current listing of `slot`. A name already present there
/// or staged for the same slot is a duplicate; with `force` it is staged
/// anyway, replacing the remote file or the earlier staged copy.
///
/// # Errors
///
/// Returns a validation error, `StageError::Duplicate` without `force`, or
/// a ledger error while a submission runs.
pub fn stage_add(
    ledger: &mut Ledger,
    remote: &[RemoteFileRef],
    slot: &Slot,
    file: LocalFile,
    force: bool,
) -> PanelResult<StageOutcome> {
    validate_upload(slot, &file.file_name, &file.data)?;

    let existing = remote.iter().find(|f| f.name == file.file_name);
    let pending = ledger.has_new(&file.file_name, slot);

    if (existing.is_some() || pending) && !force {
        return Err(StageError::Duplicate {
            file_name: file.file_name,
            slot: slot.to_string(),
        }
        .into());
    }
    if existing.is_some() || pending {
        warn!(
            file = %file.file_name,
            kind = slot.label(),
            "staging duplicate, the existing file will be overwritten"
        );
    }

    let mut change = NewFile::new(file.file_name, slot.clone(), file.data);
    change.replaces_sha = existing.map(|f| f.sha.clone());
    let replaces = change.replaces_sha.clone();

    if pending {
        ledger.remove_pending_change(ChangeKind::New, &change.file_name)?;
        ledger.add_pending_change(change)?;
        return Ok(StageOutcome::Restaged);
    }

    if !ledger.add_pending_change(change)? {
        return Ok(StageOutcome::AlreadyStaged);
    }
    Ok(match replaces {
        Some(sha) => StageOutcome::Replacing { sha },
        None => StageOutcome::Staged,
    })
}

/// Stage a move of `file_name` from `from` to `to_category`.
///
/// `remote` is the current listing of `from`. `data`, if given, is the
/// file re-read by the operator and is uploaded at the destination.
///
/// # Errors
///
/// Returns `StageError::MoveNotAllowed` for non-mod slots,
/// `StageError::SameCategory`, `StageError::UnknownRemoteFile`, or a
/// validation error for `data`.
pub fn stage_move(
    ledger: &mut Ledger,
    remote: &[RemoteFileRef],
    from: &Slot,
    file_name: &str,
    to_category: &str,
    data: Option<Vec<u8>>,
) -> PanelResult<StageOutcome> {
    if from.file_type != FileType::ForgeMods {
        return Err(StageError::MoveNotAllowed {
            file_type: from.file_type.to_string(),
        }
        .into());
    }
    if from.category == to_category {
        return Err(StageError::SameCategory {
            file_name: file_name.to_string(),
            category: to_category.to_string(),
        }
        .into());
    }

    let source = remote
        .iter()
        .find(|f| f.name == file_name)
        .ok_or_else(|| StageError::UnknownRemoteFile {
            file_name: file_name.to_string(),
            slot: from.to_string(),
        })?;

    if let Some(bytes) = &data {
        validate_upload(&Slot::mods(to_category), file_name, bytes)?;
    }

    let change = MovedFile {
        file_name: file_name.to_string(),
        file_type: from.file_type,
        from_category: from.category.clone(),
        to_category: to_category.to_string(),
        sha: source.sha.clone(),
        data,
    };

    Ok(if ledger.add_pending_change(change)? {
        StageOutcome::Staged
    } else {
        StageOutcome::AlreadyStaged
    })
}

/// Stage deletion of `file_name` from `slot`.
///
/// A file only staged as new in `slot` is unstaged instead.
///
/// # Errors
///
/// Returns `StageError::UnknownRemoteFile` if the file is neither staged
/// nor in `remote`.
pub fn stage_delete(
    ledger: &mut Ledger,
    remote: &[RemoteFileRef],
    slot: &Slot,
    file_name: &str,
) -> PanelResult<StageOutcome> {
    if ledger.has_new(file_name, slot) {
        ledger.remove_pending_change(ChangeKind::New, file_name)?;
        return Ok(StageOutcome::Unstaged);
    }

    let target = remote
        .iter()
        .find(|f| f.name == file_name)
        .ok_or_else(|| StageError::UnknownRemoteFile {
            file_name: file_name.to_string(),
            slot: slot.to_string(),
        })?;

    let change = DeletedFile {
        file_name: file_name.to_string(),
        file_path: target.path.clone(),
        file_type: slot.file_type,
        sha: target.sha.clone(),
    };

    Ok(if ledger.add_pending_change(change)? {
        StageOutcome::Staged
    } else {
        StageOutcome::AlreadyStaged
    })
}
