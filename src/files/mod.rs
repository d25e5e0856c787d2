// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote file listings per slot.
//!
//! A slot directory that does not exist yet lists as empty.

use tracing::debug;

use crate::error::{PanelResult, RemoteError};
use crate::layout::Slot;
use crate::remote::{EntryKind, RemoteFileRef, RemoteStore, Session};

/// Files of one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotListing {
    pub slot: Slot,
    pub files: Vec<RemoteFileRef>,
}

impl SlotListing {
    /// Sum of file sizes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    #[must_use]
    pub fn find(&self, file_name: &str) -> Option<&RemoteFileRef> {
        self.files.iter().find(|f| f.name == file_name)
    }
}

/// Files directly inside `slot` for `server`.
///
/// Subdirectories are skipped, so the loose-files slot does not report
/// `shaderpacks/` and `resourcepacks/`.
///
/// # Errors
///
/// Returns the remote error for anything but a missing directory.
pub async fn list_files<S: RemoteStore>(
    session: &Session<S>,
    server: &str,
    slot: &Slot,
) -> PanelResult<Vec<RemoteFileRef>> {
    let path = slot.dir_path(session.servers_root(), server);

    let content = match session.store().get_content(&path, session.branch()).await {
        Ok(content) => content,
        Err(RemoteError::NotFound { .. }) => {
            debug!(path, "slot directory missing, listing as empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let files: Vec<RemoteFileRef> = content
        .into_entries()
        .into_iter()
        .filter(|e| e.kind == EntryKind::File)
        .map(RemoteFileRef::from)
        .collect();
    debug!(path, count = files.len(), "listed files");
    Ok(files)
}

/// Listings of the six standard slots, in display order.
///
/// # Errors
///
/// Returns the first listing error.
pub async fn list_all<S: RemoteStore>(
    session: &Session<S>,
    server: &str,
) -> PanelResult<Vec<SlotListing>> {
    let mut listings = Vec::new();
    for slot in Slot::standard() {
        let files = list_files(session, server, &slot).await?;
        listings.push(SlotListing { slot, files });
    }
    Ok(listings)
}

#[cfg(test)]
mod tests;
