// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Keeping the ledger between invocations.
//!
//! ```text
//! stage.json  { "server": "survival", "new": [...], "moved": [...], "deleted": [...] }
//! ```
//!
//! The file belongs to one server. Loading it for another server discards
//! it, the same as switching servers discards staged changes.

use std::path::Path;

use tracing::{info, warn};

use super::Ledger;
use crate::error::StoreError;
use crate::utility::fs::{read_json, remove_file, write_json_atomic};

/// Load the ledger stored at `path` for `server`.
///
/// Returns an empty ledger if there is no file or it belongs to another
/// server.
///
/// # Errors
///
/// Returns `StoreError` if the file exists but cannot be read or parsed.
pub fn load(path: &Path, server: &str) -> Result<Ledger, StoreError> {
    match read_json::<Ledger>(path)? {
        Some(ledger) if ledger.server() == server => Ok(ledger),
        Some(ledger) => {
            if !ledger.is_empty() {
                warn!(
                    staged_for = ledger.server(),
                    server,
                    counts = %ledger.counts(),
                    "discarding changes staged for another server"
                );
            }
            Ok(Ledger::new(server))
        }
        None => Ok(Ledger::new(server)),
    }
}

/// Load whatever ledger is stored, regardless of server.
///
/// # Errors
///
/// Returns `StoreError` if the file exists but cannot be read or parsed.
pub fn load_any(path: &Path) -> Result<Option<Ledger>, StoreError> {
    read_json(path)
}

/// Persist `ledger`; an empty ledger removes the file.
///
/// # Errors
///
/// Returns `StoreError::Io` if the file cannot be written or removed.
pub fn save(path: &Path, ledger: &Ledger) -> Result<(), StoreError> {
    if ledger.is_empty() {
        return remove_file(path);
    }
    write_json_atomic(path, ledger)
}

/// Drop the stored ledger, e.g. when the operator switches servers.
///
/// # Errors
///
/// Returns `StoreError::Io` if the file cannot be removed.
pub fn discard(path: &Path) -> Result<(), StoreError> {
    if path.exists() {
        info!(path = %path.display(), "staged changes discarded");
    }
    remove_file(path)
}
