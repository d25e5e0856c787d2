// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitHub REST implementation of [`RemoteStore`].
//!
//! | Operation               | Endpoint                                   |
//! |-------------------------|--------------------------------------------|
//! | `authenticated_user`    | `GET /user`                                |
//! | `get_content`           | `GET /repos/{o}/{r}/contents/{path}?ref=`  |
//! | `create_or_update_file` | `PUT /repos/{o}/{r}/contents/{path}`       |
//! | `delete_file`           | `DELETE /repos/{o}/{r}/contents/{path}`    |
//! | `branch_head`           | `GET /repos/{o}/{r}/git/ref/heads/{b}`     |
//! | `commit_tree`           | `GET /repos/{o}/{r}/git/commits/{sha}`     |
//! | `create_blob`           | `POST /repos/{o}/{r}/git/blobs`            |
//! | `create_tree`           | `POST /repos/{o}/{r}/git/trees`            |
//! | `create_commit`         | `POST /repos/{o}/{r}/git/commits`          |
//! | `update_ref`            | `PATCH /repos/{o}/{r}/git/refs/heads/{b}`  |

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, trace};

use super::{Content, RemoteStore, TreeEntry};
use crate::config::types::RepoConfig;
use crate::error::{RemoteError, RemoteResult};

const API_VERSION: &str = "2022-11-28";

/// Response carrying only a sha (blobs, trees, commits).
#[derive(Debug, Deserialize)]
struct ShaResponse {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct RefResponse {
    object: ShaResponse,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    tree: ShaResponse,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
}

/// Client for one GitHub repository, authenticated with a bearer token.
#[derive(Clone)]
pub struct GitHubStore {
    client: Client,
    api_url: String,
    owner: String,
    repo: String,
    token: String,
}

impl std::fmt::Debug for GitHubStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubStore")
            .field("api_url", &self.api_url)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &"[hidden]")
            .finish_non_exhaustive()
    }
}

impl GitHubStore {
    /// Create a store for `owner/repo` at `api_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_url: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
    ) -> RemoteResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            HeaderName::from_static("x-github-api-version"),
            HeaderValue::from_static(API_VERSION),
        );

        let client = Client::builder()
            .user_agent(format!("packdesk/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            owner: owner.into(),
            repo: repo.into(),
            token: token.into(),
        })
    }

    /// Create a store for the configured repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(repo: &RepoConfig, token: impl Into<String>) -> RemoteResult<Self> {
        Self::new(&repo.api_url, &repo.owner, &repo.name, token)
    }

    /// Build an API URL from raw path segments; each is percent-encoded.
    fn endpoint<'a, I>(&self, segments: I) -> RemoteResult<Url>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = Url::parse(&self.api_url).map_err(|e| RemoteError::Decode {
            what: "api url".to_string(),
            message: format!("{}: {e}", self.api_url),
        })?;
        url.path_segments_mut()
            .map_err(|()| RemoteError::Decode {
                what: "api url".to_string(),
                message: format!("{} cannot carry a path", self.api_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn repo_endpoint<'a, I>(&'a self, tail: I) -> RemoteResult<Url>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.endpoint(
            ["repos", self.owner.as_str(), self.repo.as_str()]
                .into_iter()
                .chain(tail),
        )
    }

    fn contents_endpoint(&self, path: &str) -> RemoteResult<Url> {
        self.repo_endpoint(
            std::iter::once("contents").chain(path.split('/').filter(|s| !s.is_empty())),
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }

    /// Send a request; non-success statuses become [`RemoteError::Api`]
    /// carrying the response body verbatim.
    async fn send(&self, request: RequestBuilder, url: &Url) -> RemoteResult<reqwest::Response> {
        let response = self.authorized(request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), url = %url, body, "GitHub API error");
            return Err(RemoteError::Api {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
        what: &str,
    ) -> RemoteResult<T> {
        let response = self.send(request, url).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| RemoteError::Decode {
            what: what.to_string(),
            message: e.to_string(),
        })
    }
}

impl RemoteStore for GitHubStore {
    async fn authenticated_user(&self) -> RemoteResult<String> {
        let url = self.endpoint(["user"])?;
        let user: UserResponse = self
            .send_json(self.client.get(url.clone()), &url, "user")
            .await?;
        debug!(login = %user.login, "token verified");
        Ok(user.login)
    }

    async fn get_content(&self, path: &str, git_ref: &str) -> RemoteResult<Content> {
        let mut url = self.contents_endpoint(path)?;
        url.query_pairs_mut().append_pair("ref", git_ref);
        debug!(path, git_ref, "get content");

        match self
            .send_json(self.client.get(url.clone()), &url, "contents")
            .await
        {
            Err(RemoteError::Api { status: 404, .. }) => Err(RemoteError::NotFound {
                path: path.to_string(),
            }),
            other => other,
        }
    }

    async fn create_or_update_file(
        &self,
        path: &str,
        content_base64: &str,
        message: &str,
        branch: &str,
        sha: Option<&str>,
    ) -> RemoteResult<()> {
        let url = self.contents_endpoint(path)?;
        let mut body = json!({
            "message": message,
            "content": content_base64,
            "branch": branch,
        });
        if let Some(sha) = sha {
            body["sha"] = json!(sha);
        }
        debug!(path, branch, replaces = ?sha, "put file");

        self.send(self.client.put(url.clone()).json(&body), &url)
            .await?;
        Ok(())
    }

    async fn delete_file(
        &self,
        path: &str,
        message: &str,
        sha: &str,
        branch: &str,
    ) -> RemoteResult<()> {
        let url = self.contents_endpoint(path)?;
        let body = json!({
            "message": message,
            "sha": sha,
            "branch": branch,
        });
        debug!(path, sha, branch, "delete file");

        self.send(self.client.delete(url.clone()).json(&body), &url)
            .await?;
        Ok(())
    }

    async fn branch_head(&self, branch: &str) -> RemoteResult<String> {
        let url = self.repo_endpoint(
            ["git", "ref", "heads"]
                .into_iter()
                .chain(branch.split('/')),
        )?;
        let reference: RefResponse = self
            .send_json(self.client.get(url.clone()), &url, "ref")
            .await?;
        debug!(branch, sha = %reference.object.sha, "resolved branch head");
        Ok(reference.object.sha)
    }

    async fn commit_tree(&self, commit_sha: &str) -> RemoteResult<String> {
        let url = self.repo_endpoint(["git", "commits", commit_sha])?;
        let commit: CommitResponse = self
            .send_json(self.client.get(url.clone()), &url, "commit")
            .await?;
        debug!(commit = commit_sha, tree = %commit.tree.sha, "resolved commit tree");
        Ok(commit.tree.sha)
    }

    async fn create_blob(&self, content_base64: &str) -> RemoteResult<String> {
        let url = self.repo_endpoint(["git", "blobs"])?;
        let body = json!({
            "content": content_base64,
            "encoding": "base64",
        });
        trace!(encoded_len = content_base64.len(), "create blob");

        let blob: ShaResponse = self
            .send_json(self.client.post(url.clone()).json(&body), &url, "blob")
            .await?;
        debug!(sha = %blob.sha, "created blob");
        Ok(blob.sha)
    }

    async fn create_tree(&self, base_tree: &str, entries: &[TreeEntry]) -> RemoteResult<String> {
        let url = self.repo_endpoint(["git", "trees"])?;
        let body = json!({
            "base_tree": base_tree,
            "tree": entries,
        });
        trace!(base_tree, ?entries, "create tree");

        let tree: ShaResponse = self
            .send_json(self.client.post(url.clone()).json(&body), &url, "tree")
            .await?;
        debug!(sha = %tree.sha, entries = entries.len(), "created tree");
        Ok(tree.sha)
    }

    async fn create_commit(
        &self,
        message: &str,
        tree: &str,
        parents: &[String],
    ) -> RemoteResult<String> {
        let url = self.repo_endpoint(["git", "commits"])?;
        let body = json!({
            "message": message,
            "tree": tree,
            "parents": parents,
        });

        let commit: ShaResponse = self
            .send_json(self.client.post(url.clone()).json(&body), &url, "commit")
            .await?;
        debug!(sha = %commit.sha, tree, "created commit");
        Ok(commit.sha)
    }

    async fn update_ref(&self, branch: &str, commit_sha: &str) -> RemoteResult<()> {
        let url = self.repo_endpoint(
            ["git", "refs", "heads"]
                .into_iter()
                .chain(branch.split('/')),
        )?;
        let body = json!({ "sha": commit_sha });
        debug!(branch, sha = commit_sha, "update ref");

        self.send(self.client.patch(url.clone()).json(&body), &url)
            .await?;
        Ok(())
    }
}
