// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote content store.
//!
//! ```text
//!            RemoteStore (trait)
//!   Contents API          Git Data API
//!   get_content           branch_head --> commit_tree
//!   create_or_update_file create_blob --> create_tree
//!   delete_file           create_commit --> update_ref
//!            |
//!     +------+------+
//!     v             v
//! GitHubStore    (test doubles)
//!  reqwest
//!            |
//!            v
//!   Session: store + repo target + login,
//!            built once after authentication
//! ```
//!
//! All calls are awaited one at a time by the caller; nothing here fans out.

pub mod github;
pub mod session;

#[cfg(test)]
pub(crate) mod test_utils;


use std::future::Future;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{RemoteError, RemoteResult};

pub use github::GitHubStore;
pub use session::Session;

/// Git file mode for a regular, non-executable file.
pub const MODE_REGULAR_FILE: &str = "100644";

/// Kind of an entry returned by the Contents API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
}

/// One item from a Contents API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub size: u64,
    pub sha: String,
    /// Base64 payload, present when a single file was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A Contents API response: a directory listing or one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Directory(Vec<ContentEntry>),
    File(ContentEntry),
}

impl Content {
    /// Directory entries; a single file yields an empty listing.
    #[must_use]
    pub fn into_entries(self) -> Vec<ContentEntry> {
        match self {
            Self::Directory(entries) => entries,
            Self::File(_) => Vec::new(),
        }
    }
}

/// Base64 for request bodies.
#[must_use]
pub fn encode_content(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a Contents API payload, which GitHub wraps at 60 columns.
///
/// # Errors
///
/// Returns `RemoteError::Decode` if the payload is not valid base64.
pub fn decode_content(what: &str, encoded: &str) -> RemoteResult<Vec<u8>> {
    let compact: String = encoded.split_ascii_whitespace().collect();
    STANDARD
        .decode(compact)
        .map_err(|e| RemoteError::Decode {
            what: what.to_string(),
            message: e.to_string(),
        })
}

/// Snapshot of a file the remote currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFileRef {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub sha: String,
}

impl From<ContentEntry> for RemoteFileRef {
    fn from(entry: ContentEntry) -> Self {
        Self {
            name: entry.name,
            path: entry.path,
            size: entry.size,
            sha: entry.sha,
        }
    }
}

/// One entry of a tree mutation. A `None` sha removes `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    pub mode: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sha: Option<String>,
}

impl TreeEntry {
    /// Point `path` at an existing blob.
    #[must_use]
    pub fn blob(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: MODE_REGULAR_FILE.to_string(),
            kind: "blob".to_string(),
            sha: Some(sha.into()),
        }
    }

    /// Remove `path` from the tree.
    #[must_use]
    pub fn removal(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: MODE_REGULAR_FILE.to_string(),
            kind: "blob".to_string(),
            sha: None,
        }
    }

    #[must_use]
    pub const fn is_removal(&self) -> bool {
        self.sha.is_none()
    }
}

/// Operations the panel needs from the content host.
///
/// Implementations are bound to one repository; `branch` selects the ref.
pub trait RemoteStore {
    /// Login of the token owner. Fails with 401 for a bad token.
    fn authenticated_user(&self) -> impl Future<Output = RemoteResult<String>> + Send;

    /// File or directory at `path` on `git_ref`. Missing paths yield
    /// [`RemoteError::NotFound`](crate::error::RemoteError::NotFound).
    fn get_content(
        &self,
        path: &str,
        git_ref: &str,
    ) -> impl Future<Output = RemoteResult<Content>> + Send;

    /// Create `path`, or replace it when `sha` names its current blob.
    fn create_or_update_file(
        &self,
        path: &str,
        content_base64: &str,
        message: &str,
        branch: &str,
        sha: Option<&str>,
    ) -> impl Future<Output = RemoteResult<()>> + Send;

    /// Delete `path`, whose current blob is `sha`.
    fn delete_file(
        &self,
        path: &str,
        message: &str,
        sha: &str,
        branch: &str,
    ) -> impl Future<Output = RemoteResult<()>> + Send;

    /// Commit sha the branch currently points at.
    fn branch_head(&self, branch: &str) -> impl Future<Output = RemoteResult<String>> + Send;

    /// Tree sha of a commit.
    fn commit_tree(&self, commit_sha: &str) -> impl Future<Output = RemoteResult<String>> + Send;

    /// Store a blob and return its sha.
    fn create_blob(&self, content_base64: &str)
    -> impl Future<Output = RemoteResult<String>> + Send;

    /// Apply `entries` on top of `base_tree` and return the new tree sha.
    fn create_tree(
        &self,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> impl Future<Output = RemoteResult<String>> + Send;

    /// Create a commit and return its sha.
    fn create_commit(
        &self,
        message: &str,
        tree: &str,
        parents: &[String],
    ) -> impl Future<Output = RemoteResult<String>> + Send;

    /// Move `branch` to `commit_sha`.
    fn update_ref(
        &self,
        branch: &str,
        commit_sha: &str,
    ) -> impl Future<Output = RemoteResult<()>> + Send;
}
