// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `servers`, `use`, `files` and `meta`.

use anyhow::{Context, bail};
use tracing::info;

use super::{open_session, resolve_server, secret_store};
use crate::cli::server::{FilesArgs, MetaAction, MetaArgs, MetaSetArgs, UseArgs};
use crate::config::Config;
use crate::error::Result;
use crate::files::{self, SlotListing};
use crate::ledger::{Ledger, store};
use crate::servers::{self, ServerMeta};
use crate::submit::format_size;

/// List server directories, marking the selected one.
///
/// # Errors
///
/// Returns an error if the session cannot be opened or the listing fails.
pub async fn run_servers_command(config: &Config) -> Result<()> {
    let secrets = secret_store(config);
    let session = open_session(config, &secrets).await?;
    let list = servers::list_servers(&session, &secrets).await?;

    if list.servers.is_empty() {
        println!("No servers under {}", session.servers_root());
        return Ok(());
    }
    for server in &list.servers {
        let marker = if list.selected.as_ref() == Some(server) {
            "*"
        } else {
            " "
        };
        println!("{marker} {server}");
    }
    Ok(())
}

/// Select `args.server`; staged changes for another server are discarded.
///
/// # Errors
///
/// Returns an error if the server does not exist or local state cannot be
/// written.
pub async fn run_use_command(args: &UseArgs, config: &Config) -> Result<()> {
    let secrets = secret_store(config);
    let session = open_session(config, &secrets).await?;
    let list = servers::list_servers(&session, &secrets).await?;

    if !list.servers.contains(&args.server) {
        bail!(
            "unknown server '{}' (available: {})",
            args.server,
            list.servers.join(", ")
        );
    }

    let stage_file = config.paths.stage_file();
    if let Some(ledger) = store::load_any(&stage_file)?
        && ledger.server() != args.server
    {
        if !ledger.is_empty() {
            println!(
                "Discarding {} staged for {}",
                ledger.counts(),
                ledger.server()
            );
        }
        store::discard(&stage_file)?;
    }

    servers::save_last_server(&secrets, &args.server)?;
    info!(server = %args.server, "server selected");
    println!("Now working on {}", args.server);
    Ok(())
}

/// List remote files of the selected server.
///
/// # Errors
///
/// Returns an error if no server is selected or a listing fails.
pub async fn run_files_command(
    args: &FilesArgs,
    server: Option<&str>,
    config: &Config,
) -> Result<()> {
    let secrets = secret_store(config);
    let server = resolve_server(server, &secrets)?;
    let session = open_session(config, &secrets).await?;

    let listings = match &args.slot {
        Some(slot) => vec![SlotListing {
            slot: slot.clone(),
            files: files::list_files(&session, &server, slot).await?,
        }],
        None => files::list_all(&session, &server).await?,
    };
    let ledger = store::load(&config.paths.stage_file(), &server)?;

    for listing in &listings {
        for line in format_listing(listing, &ledger) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Lines for one slot; files with a staged change are tagged.
pub(crate) fn format_listing(listing: &SlotListing, ledger: &Ledger) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({} files, {})",
        listing.slot,
        listing.files.len(),
        format_size(listing.total_size())
    )];

    let width = listing
        .files
        .iter()
        .map(|f| f.name.len())
        .max()
        .unwrap_or(0);
    for file in &listing.files {
        let mut line = format!("  {:<width$}  {}", file.name, format_size(file.size));
        if ledger.deleted_files().iter().any(|d| d.file_path == file.path) {
            line.push_str("  [delete]");
        }
        if let Some(moved) = ledger
            .moved_files()
            .iter()
            .find(|m| m.file_name == file.name && m.from_slot() == listing.slot)
        {
            line.push_str(&format!("  [move to {}]", moved.to_category));
        }
        lines.push(line);
    }

    for staged in ledger.new_files().iter().filter(|n| n.slot == listing.slot) {
        lines.push(format!(
            "+ {:<width$}  {}  [new]",
            staged.file_name,
            format_size(staged.size)
        ));
    }
    lines
}

/// Show or edit `servermeta.json`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, decoded or written.
pub async fn run_meta_command(
    args: &MetaArgs,
    server: Option<&str>,
    config: &Config,
) -> Result<()> {
    let secrets = secret_store(config);
    let server = resolve_server(server, &secrets)?;
    let session = open_session(config, &secrets).await?;
    let current = servers::get_server_metadata(&session, &server)
        .await
        .with_context(|| format!("cannot read settings of {server}"))?;

    match &args.action {
        MetaAction::Show => {
            println!("{}", serde_json::to_string_pretty(&current.metadata)?);
        }
        MetaAction::Set(set) => {
            if set.is_empty() {
                bail!("nothing to change (see `packdesk meta set --help`)");
            }
            let mut metadata = current.metadata;
            apply_meta(&mut metadata.meta, set);

            if config.global.dry {
                println!("{}", serde_json::to_string_pretty(&metadata)?);
                println!("Dry run: settings of {server} not written");
                return Ok(());
            }
            servers::update_server_metadata(&session, &server, &metadata).await?;
            println!("Updated settings of {server}");
        }
    }
    Ok(())
}

pub(crate) fn apply_meta(meta: &mut ServerMeta, set: &MetaSetArgs) {
    if let Some(name) = &set.name {
        meta.name.clone_from(name);
    }
    if let Some(address) = &set.address {
        meta.address.clone_from(address);
    }
    if let Some(description) = &set.description {
        meta.description.clone_from(description);
    }
    if let Some(main_server) = set.main_server {
        meta.main_server = main_server;
    }
    if let Some(autoconnect) = set.autoconnect {
        meta.autoconnect = autoconnect;
    }
}
