// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Recording in-memory [`RemoteStore`] for unit tests.
//!
//! Every call is appended to a log; shas are deterministic
//! (`blob-1`, `tree-2`, `commit-3`, ...), and individual calls can be made
//! to fail by path or by operation name.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::{Content, RemoteStore, TreeEntry};
use crate::config::types::RepoConfig;
use crate::error::{RemoteError, RemoteResult};

pub(crate) const HEAD: &str = "head-0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    AuthenticatedUser,
    GetContent {
        path: String,
    },
    CreateOrUpdateFile {
        path: String,
        content: String,
        message: String,
        sha: Option<String>,
    },
    DeleteFile {
        path: String,
        message: String,
        sha: String,
    },
    BranchHead,
    CommitTree {
        commit: String,
    },
    CreateBlob {
        content: String,
    },
    CreateTree {
        base_tree: String,
        entries: Vec<TreeEntry>,
    },
    CreateCommit {
        message: String,
        tree: String,
        parents: Vec<String>,
    },
    UpdateRef {
        sha: String,
    },
}

impl Call {
    pub(crate) const fn op(&self) -> &'static str {
        match self {
            Self::AuthenticatedUser => "authenticated_user",
            Self::GetContent { .. } => "get_content",
            Self::CreateOrUpdateFile { .. } => "create_or_update_file",
            Self::DeleteFile { .. } => "delete_file",
            Self::BranchHead => "branch_head",
            Self::CommitTree { .. } => "commit_tree",
            Self::CreateBlob { .. } => "create_blob",
            Self::CreateTree { .. } => "create_tree",
            Self::CreateCommit { .. } => "create_commit",
            Self::UpdateRef { .. } => "update_ref",
        }
    }
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<Call>,
    next_id: usize,
    op_counts: HashMap<&'static str, usize>,
}

#[derive(Debug, Default)]
pub(crate) struct MockStore {
    state: Mutex<State>,
    failing_paths: HashSet<String>,
    failing_ops: HashMap<&'static str, usize>,
    contents: HashMap<String, Content>,
    unauthorized: bool,
}

impl MockStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// File writes and deletes on `path` fail with a 409.
    pub(crate) fn fail_path(mut self, path: impl Into<String>) -> Self {
        self.failing_paths.insert(path.into());
        self
    }

    /// The `nth` (1-based) call of `op` fails with a 422.
    pub(crate) fn fail_op(mut self, op: &'static str, nth: usize) -> Self {
        self.failing_ops.insert(op, nth);
        self
    }

    /// `get_content(path)` answers with `content`; unknown paths are 404.
    pub(crate) fn with_content(mut self, path: impl Into<String>, content: Content) -> Self {
        self.contents.insert(path.into(), content);
        self
    }

    /// `authenticated_user` answers 401.
    pub(crate) const fn unauthorized(mut self) -> Self {
        self.unauthorized = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().map(|s| s.calls.clone()).unwrap_or_default()
    }

    pub(crate) fn ops(&self) -> Vec<&'static str> {
        self.calls().iter().map(Call::op).collect()
    }

    pub(crate) fn count(&self, op: &str) -> usize {
        self.calls().iter().filter(|c| c.op() == op).count()
    }

    /// Record `call`, returning a fresh id or the configured failure.
    fn record(&self, call: Call, path: Option<&str>) -> RemoteResult<usize> {
        let mut state = self.state.lock().map_err(|_| RemoteError::Decode {
            what: "mock state".to_string(),
            message: "poisoned".to_string(),
        })?;
        let op = call.op();
        state.calls.push(call);
        let seen = {
            let counter = state.op_counts.entry(op).or_insert(0);
            *counter += 1;
            *counter
        };

        if path.is_some_and(|p| self.failing_paths.contains(p)) {
            return Err(RemoteError::Api {
                status: 409,
                url: format!("mock://{op}/{}", path.unwrap_or_default()),
                body: r#"{"message":"conflict"}"#.to_string(),
            });
        }
        if self.failing_ops.get(op) == Some(&seen) {
            return Err(RemoteError::Api {
                status: 422,
                url: format!("mock://{op}"),
                body: format!(r#"{{"message":"{op} rejected"}}"#),
            });
        }

        state.next_id += 1;
        Ok(state.next_id)
    }
}

impl RemoteStore for MockStore {
    async fn authenticated_user(&self) -> RemoteResult<String> {
        self.record(Call::AuthenticatedUser, None)?;
        if self.unauthorized {
            return Err(RemoteError::Api {
                status: 401,
                url: "mock://user".to_string(),
                body: r#"{"message":"Bad credentials"}"#.to_string(),
            });
        }
        Ok("octocat".to_string())
    }

    async fn get_content(&self, path: &str, _git_ref: &str) -> RemoteResult<Content> {
        self.record(
            Call::GetContent {
                path: path.to_string(),
            },
            Some(path),
        )?;
        self.contents
            .get(path)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound {
                path: path.to_string(),
            })
    }

    async fn create_or_update_file(
        &self,
        path: &str,
        content_base64: &str,
        message: &str,
        _branch: &str,
        sha: Option<&str>,
    ) -> RemoteResult<()> {
        self.record(
            Call::CreateOrUpdateFile {
                path: path.to_string(),
                content: content_base64.to_string(),
                message: message.to_string(),
                sha: sha.map(str::to_string),
            },
            Some(path),
        )?;
        Ok(())
    }

    async fn delete_file(
        &self,
        path: &str,
        message: &str,
        sha: &str,
        _branch: &str,
    ) -> RemoteResult<()> {
        self.record(
            Call::DeleteFile {
                path: path.to_string(),
                message: message.to_string(),
                sha: sha.to_string(),
            },
            Some(path),
        )?;
        Ok(())
    }

    async fn branch_head(&self, _branch: &str) -> RemoteResult<String> {
        self.record(Call::BranchHead, None)?;
        Ok(HEAD.to_string())
    }

    async fn commit_tree(&self, commit_sha: &str) -> RemoteResult<String> {
        self.record(
            Call::CommitTree {
                commit: commit_sha.to_string(),
            },
            None,
        )?;
        Ok(format!("tree-of-{commit_sha}"))
    }

    async fn create_blob(&self, content_base64: &str) -> RemoteResult<String> {
        let id = self.record(
            Call::CreateBlob {
                content: content_base64.to_string(),
            },
            None,
        )?;
        Ok(format!("blob-{id}"))
    }

    async fn create_tree(&self, base_tree: &str, entries: &[TreeEntry]) -> RemoteResult<String> {
        let id = self.record(
            Call::CreateTree {
                base_tree: base_tree.to_string(),
                entries: entries.to_vec(),
            },
            None,
        )?;
        Ok(format!("tree-{id}"))
    }

    async fn create_commit(
        &self,
        message: &str,
        tree: &str,
        parents: &[String],
    ) -> RemoteResult<String> {
        let id = self.record(
            Call::CreateCommit {
                message: message.to_string(),
                tree: tree.to_string(),
                parents: parents.to_vec(),
            },
            None,
        )?;
        Ok(format!("commit-{id}"))
    }

    async fn update_ref(&self, _branch: &str, commit_sha: &str) -> RemoteResult<()> {
        self.record(
            Call::UpdateRef {
                sha: commit_sha.to_string(),
            },
            None,
        )?;
        Ok(())
    }
}

/// Repository settings matching the default layout.
pub(crate) fn test_repo() -> RepoConfig {
    RepoConfig {
        owner: "acme".to_string(),
        name: "packs".to_string(),
        ..RepoConfig::default()
    }
}
