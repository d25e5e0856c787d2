// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local JSON state files.
//!
//! ```text
//! write_json_atomic(path, value)
//!   create_dir_all(parent)
//!   NamedTempFile::new_in(parent) --> serde_json (pretty) --> persist(path)
//! ```
//!
//! A reader never observes a half-written file.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::trace;

use crate::error::StoreError;

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Read and parse `path`. A missing file yields `Ok(None)`.
///
/// # Errors
///
/// Returns `StoreError::Io` if the file exists but cannot be read, or
/// `StoreError::Parse` if it does not hold a valid `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path, e)),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| StoreError::Parse {
            path: path.display().to_string(),
            source,
        })
}

/// Serialize `value` and atomically replace `path` with it.
///
/// # Errors
///
/// Returns `StoreError::Io` if the directory, temp file or rename fails.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;

    let json = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    let mut file = NamedTempFile::new_in(parent).map_err(|e| io_error(parent, e))?;
    file.write_all(&json).map_err(|e| io_error(file.path(), e))?;
    file.as_file().sync_all().map_err(|e| io_error(path, e))?;
    file.persist(path).map_err(|e| io_error(path, e.error))?;

    trace!(path = %path.display(), bytes = json.len(), "state written");
    Ok(())
}

/// Delete `path`; a missing file is fine.
///
/// # Errors
///
/// Returns `StoreError::Io` for any other failure.
pub fn remove_file(path: &Path) -> Result<(), StoreError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_error(path, e)),
    }
}
