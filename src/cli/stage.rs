// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the `stage` command.
//!
//! ```text
//! packdesk stage add <SLOT> <FILE>... [--force]
//! packdesk stage move <NAME> --from <SLOT> --to <CATEGORY> [--file PATH]
//! packdesk stage delete <SLOT> <NAME>...
//! packdesk stage unstage <new|moved|deleted> <NAME>
//!
//! SLOT: forgemods/{required,optionalon,optionaloff}
//!       files/{shaderpacks,resourcepacks} | files
//! ```

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::layout::Slot;
use crate::ledger::ChangeKind;

/// Arguments for the `stage` command.
#[derive(Debug, Clone, Args)]
pub struct StageArgs {
    #[command(subcommand)]
    pub action: StageAction,
}

/// Ledger edits.
#[derive(Debug, Clone, Subcommand)]
pub enum StageAction {
    /// Stage local files for upload.
    Add(AddArgs),

    /// Stage a mod move between categories.
    Move(MoveArgs),

    /// Stage remote files for deletion.
    Delete(DeleteArgs),

    /// Drop a staged change.
    Unstage(UnstageArgs),
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Destination slot.
    #[arg(value_name = "SLOT")]
    pub slot: Slot,

    /// Local files to upload.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Stage files whose name already exists in the slot, overwriting them.
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Clone, Args)]
pub struct MoveArgs {
    /// Remote file name.
    #[arg(value_name = "NAME")]
    pub file_name: String,

    /// Slot the file is in now.
    #[arg(long, value_name = "SLOT")]
    pub from: Slot,

    /// Destination category.
    #[arg(long, value_name = "CATEGORY")]
    pub to: String,

    /// Local copy to upload at the destination instead of reusing the
    /// remote blob.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct DeleteArgs {
    /// Slot holding the files.
    #[arg(value_name = "SLOT")]
    pub slot: Slot,

    /// Remote file names.
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct UnstageArgs {
    /// List the change is in.
    #[arg(value_name = "KIND")]
    pub kind: KindArg,

    #[arg(value_name = "NAME")]
    pub file_name: String,
}

/// Ledger list selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    New,
    Moved,
    Deleted,
}

impl From<KindArg> for ChangeKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::New => Self::New,
            KindArg::Moved => Self::Moved,
            KindArg::Deleted => Self::Deleted,
        }
    }
}
