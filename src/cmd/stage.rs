// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `stage`, `status` and `discard`.
//!
//! ```text
//! stage.json --load--> Ledger --stage_*--> Ledger --save--> stage.json
//!                        ^
//!          remote listing of the slot (add, move, delete)
//! ```
//!
//! Every file of a multi-file `stage add`/`stage delete` is attempted; the
//! ledger is saved with whatever succeeded before errors are reported.

use std::path::Path;

use anyhow::bail;
use tracing::warn;

use super::{open_session, resolve_server, secret_store};
use crate::cli::stage::{AddArgs, DeleteArgs, MoveArgs, StageAction, StageArgs, UnstageArgs};
use crate::config::Config;
use crate::error::Result;
use crate::files;
use crate::ledger::{ChangeKind, Ledger, store};
use crate::secrets::SecretStore;
use crate::stage::{self, StageOutcome};
use crate::submit::format_size;

/// Edit the staged changes of the selected server.
///
/// # Errors
///
/// Returns an error if no server is selected, a remote listing fails, local
/// state cannot be written, or any file could not be staged.
pub async fn run_stage_command(
    args: &StageArgs,
    server: Option<&str>,
    config: &Config,
) -> Result<()> {
    let secrets = secret_store(config);
    let server = resolve_server(server, &secrets)?;
    let stage_file = config.paths.stage_file();
    let mut ledger = load_for_staging(&stage_file, &server)?;

    let result = match &args.action {
        StageAction::Add(add) => stage_files(add, &mut ledger, config, &secrets).await,
        StageAction::Move(mv) => stage_move(mv, &mut ledger, config, &secrets).await,
        StageAction::Delete(delete) => stage_deletes(delete, &mut ledger, config, &secrets).await,
        StageAction::Unstage(unstage) => unstage_change(unstage, &mut ledger),
    };

    store::save(&stage_file, &ledger)?;
    result?;
    println!("{}: {}", ledger.server(), ledger.counts());
    Ok(())
}

/// The ledger of `server`, refusing to start one while another server's
/// changes are still staged.
pub(crate) fn load_for_staging(stage_file: &Path, server: &str) -> Result<Ledger> {
    if let Some(staged) = store::load_any(stage_file)?
        && staged.server() != server
        && !staged.is_empty()
    {
        bail!(
            "{} staged for {}; submit or discard them before staging for {server}",
            staged.counts(),
            staged.server()
        );
    }
    Ok(store::load(stage_file, server)?)
}

async fn stage_files(
    args: &AddArgs,
    ledger: &mut Ledger,
    config: &Config,
    secrets: &impl SecretStore,
) -> Result<()> {
    let session = open_session(config, secrets).await?;
    let remote = files::list_files(&session, ledger.server(), &args.slot).await?;

    let mut failed = 0;
    for path in &args.files {
        let result = match stage::read_local_file(path).await {
            Ok(file) => {
                let name = file.file_name.clone();
                stage::stage_add(ledger, &remote, &args.slot, file, args.force)
                    .map(|outcome| (name, outcome))
                    .map_err(anyhow::Error::from)
            }
            Err(e) => Err(e.into()),
        };
        match result {
            Ok((name, outcome)) => println!("{}", describe_outcome(&name, &outcome)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "not staged");
                eprintln!("Skipped {}: {e:#}", path.display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} file(s) not staged", args.files.len());
    }
    Ok(())
}

async fn stage_move(
    args: &MoveArgs,
    ledger: &mut Ledger,
    config: &Config,
    secrets: &impl SecretStore,
) -> Result<()> {
    let data = match &args.file {
        Some(path) => Some(stage::read_local_file(path).await?.data),
        None => None,
    };
    let session = open_session(config, secrets).await?;
    let remote = files::list_files(&session, ledger.server(), &args.from).await?;

    let outcome = stage::stage_move(ledger, &remote, &args.from, &args.file_name, &args.to, data)?;
    println!("{}", describe_outcome(&args.file_name, &outcome));
    Ok(())
}

async fn stage_deletes(
    args: &DeleteArgs,
    ledger: &mut Ledger,
    config: &Config,
    secrets: &impl SecretStore,
) -> Result<()> {
    let session = open_session(config, secrets).await?;
    let remote = files::list_files(&session, ledger.server(), &args.slot).await?;

    let mut failed = 0;
    for name in &args.names {
        match stage::stage_delete(ledger, &remote, &args.slot, name) {
            Ok(outcome) => println!("{}", describe_outcome(name, &outcome)),
            Err(e) => {
                eprintln!("Skipped {name}: {e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} file(s) not staged", args.names.len());
    }
    Ok(())
}

fn unstage_change(args: &UnstageArgs, ledger: &mut Ledger) -> Result<()> {
    let kind = ChangeKind::from(args.kind);
    if ledger.remove_pending_change(kind, &args.file_name)? == 0 {
        bail!("no {kind} change staged for {}", args.file_name);
    }
    println!("Unstaged {kind} {}", args.file_name);
    Ok(())
}

pub(crate) fn describe_outcome(file_name: &str, outcome: &StageOutcome) -> String {
    match outcome {
        StageOutcome::Staged => format!("Staged {file_name}"),
        StageOutcome::Replacing { sha } => {
            format!("Staged {file_name}, replacing remote blob {sha}")
        }
        StageOutcome::Restaged => format!("Restaged {file_name}"),
        StageOutcome::AlreadyStaged => format!("{file_name} is already staged"),
        StageOutcome::Unstaged => format!("Unstaged new file {file_name}"),
    }
}

/// Show the staged changes.
///
/// Without a selected server, whatever ledger is stored is shown.
///
/// # Errors
///
/// Returns an error if local state cannot be read.
pub fn run_status_command(server: Option<&str>, config: &Config) -> Result<()> {
    let secrets = secret_store(config);
    let stage_file = config.paths.stage_file();
    let ledger = match resolve_server(server, &secrets) {
        Ok(server) => Some(store::load(&stage_file, &server)?),
        Err(_) => store::load_any(&stage_file)?,
    };

    match ledger {
        Some(ledger) if !ledger.is_empty() => {
            for line in format_status(&ledger) {
                println!("{line}");
            }
        }
        Some(ledger) => println!("{}: nothing staged", ledger.server()),
        None => println!("Nothing staged"),
    }
    Ok(())
}

pub(crate) fn format_status(ledger: &Ledger) -> Vec<String> {
    let mut lines = vec![format!("{}: {}", ledger.server(), ledger.counts())];

    for file in ledger.new_files() {
        let replacing = if file.replaces_sha.is_some() {
            ", replaces existing"
        } else {
            ""
        };
        lines.push(format!(
            "  new      {}/{} ({}{replacing})",
            file.slot,
            file.file_name,
            format_size(file.size)
        ));
    }
    for file in ledger.moved_files() {
        lines.push(format!(
            "  moved    {} -> {}/{}",
            file.from_slot(),
            file.to_slot(),
            file.file_name
        ));
    }
    for file in ledger.deleted_files() {
        lines.push(format!("  deleted  {}", file.file_path));
    }
    lines
}

/// Drop all staged changes.
///
/// # Errors
///
/// Returns an error if the ledger file cannot be removed.
pub fn run_discard_command(config: &Config) -> Result<()> {
    let stage_file = config.paths.stage_file();
    match store::load_any(&stage_file)? {
        Some(ledger) if !ledger.is_empty() => {
            store::discard(&stage_file)?;
            println!("Discarded {} for {}", ledger.counts(), ledger.server());
        }
        _ => {
            store::discard(&stage_file)?;
            println!("Nothing staged");
        }
    }
    Ok(())
}
