// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Servers and their `servermeta.json`.
//!
//! ```text
//! {servers_root}/
//!   survival/servermeta.json   { "meta": { name, address, ... }, ... }
//!   creative/servermeta.json
//! ```
//!
//! Metadata is edited through the typed [`ServerMeta`] block; every other
//! field of the file is carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{PanelResult, RemoteError, StoreError};
use crate::layout::metadata_path;
use crate::remote::{Content, EntryKind, RemoteStore, Session, decode_content, encode_content};
use crate::secrets::{LAST_SERVER_KEY, SecretStore};

/// Server directories plus the one to preselect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerList {
    pub servers: Vec<String>,
    pub selected: Option<String>,
}

/// Pick the last used server if it still exists, else the first one.
#[must_use]
pub fn select_server(servers: &[String], last: Option<&str>) -> Option<String> {
    last.filter(|l| servers.iter().any(|s| s == l))
        .map(str::to_string)
        .or_else(|| servers.first().cloned())
}

/// List server directories on the branch.
///
/// # Errors
///
/// Returns the remote error if the servers root cannot be listed, or a store
/// error if the last server cannot be read.
pub async fn list_servers<S: RemoteStore>(
    session: &Session<S>,
    secrets: &impl SecretStore,
) -> PanelResult<ServerList> {
    let content = session
        .store()
        .get_content(session.servers_root(), session.branch())
        .await?;

    let servers: Vec<String> = content
        .into_entries()
        .into_iter()
        .filter(|e| e.kind == EntryKind::Dir)
        .map(|e| e.name)
        .collect();

    let last = secrets.get(LAST_SERVER_KEY)?;
    let selected = select_server(&servers, last.as_deref());
    debug!(count = servers.len(), ?selected, "listed servers");

    Ok(ServerList { servers, selected })
}

/// Remember `server` as the current selection.
///
/// # Errors
///
/// Returns an error if the secret store cannot be written.
pub fn save_last_server(secrets: &impl SecretStore, server: &str) -> Result<(), StoreError> {
    secrets.set(LAST_SERVER_KEY, server)
}

/// The `meta` block shown to launcher users.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerMeta {
    pub name: String,
    pub address: String,
    pub description: String,
    #[serde(rename = "mainServer")]
    pub main_server: bool,
    pub autoconnect: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Contents of `servermeta.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerMetadata {
    #[serde(default)]
    pub meta: ServerMeta,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Metadata together with the blob sha it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataFile {
    pub metadata: ServerMetadata,
    pub sha: String,
}

/// Commit message for a metadata update.
#[must_use]
pub fn metadata_commit_message(server: &str) -> String {
    format!("⚙️ Update server settings for {server}")
}

/// Read and decode `servermeta.json` of `server`.
///
/// # Errors
///
/// Returns `RemoteError::NotFound` if the file is missing and
/// `RemoteError::Decode` if it is not a JSON file.
pub async fn get_server_metadata<S: RemoteStore>(
    session: &Session<S>,
    server: &str,
) -> PanelResult<MetadataFile> {
    let path = metadata_path(session.servers_root(), server);
    let content = session
        .store()
        .get_content(&path, session.branch())
        .await?;

    let Content::File(entry) = content else {
        return Err(decode_error(&path, "expected a file, found a directory").into());
    };
    let bytes = decode_content(&path, entry.content.as_deref().unwrap_or_default())?;
    let metadata: ServerMetadata =
        serde_json::from_slice(&bytes).map_err(|e| decode_error(&path, &e.to_string()))?;

    Ok(MetadataFile {
        metadata,
        sha: entry.sha,
    })
}

/// Write `metadata` back as pretty JSON on top of the current file.
///
/// # Errors
///
/// Returns the remote error if the current file cannot be read or the
/// update is rejected.
pub async fn update_server_metadata<S: RemoteStore>(
    session: &Session<S>,
    server: &str,
    metadata: &ServerMetadata,
) -> PanelResult<()> {
    let current = get_server_metadata(session, server).await?;
    let path = metadata_path(session.servers_root(), server);
    let json =
        serde_json::to_string_pretty(metadata).map_err(|e| decode_error(&path, &e.to_string()))?;

    session
        .store()
        .create_or_update_file(
            &path,
            &encode_content(json.as_bytes()),
            &metadata_commit_message(server),
            session.branch(),
            Some(&current.sha),
        )
        .await?;

    info!(server, "server settings updated");
    Ok(())
}

fn decode_error(path: &str, message: &str) -> RemoteError {
    RemoteError::Decode {
        what: path.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests;
