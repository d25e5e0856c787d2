// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for server selection, listings and metadata.
//!
//! ```text
//! packdesk use <SERVER>
//! packdesk files [SLOT]
//! packdesk meta show
//! packdesk meta set [--name] [--address] [--description]
//!                   [--main-server BOOL] [--autoconnect BOOL]
//! ```

use clap::{Args, Subcommand};

use crate::layout::Slot;

/// Arguments for the `use` command.
#[derive(Debug, Clone, Args)]
pub struct UseArgs {
    /// Server directory name.
    #[arg(value_name = "SERVER")]
    pub server: String,
}

/// Arguments for the `files` command.
#[derive(Debug, Clone, Default, Args)]
pub struct FilesArgs {
    /// Only list this slot, e.g. `forgemods/required` or `files/shaderpacks`.
    #[arg(value_name = "SLOT")]
    pub slot: Option<Slot>,
}

/// Arguments for the `meta` command.
#[derive(Debug, Clone, Args)]
pub struct MetaArgs {
    #[command(subcommand)]
    pub action: MetaAction,
}

/// Metadata operations.
#[derive(Debug, Clone, Subcommand)]
pub enum MetaAction {
    /// Print `servermeta.json`.
    Show,

    /// Change fields of the `meta` block and commit the file.
    Set(MetaSetArgs),
}

/// Fields of the `meta` block; unset flags keep the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct MetaSetArgs {
    /// Display name.
    #[arg(long)]
    pub name: Option<String>,

    /// Server address, `host[:port]`.
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Whether this is the launcher's main server.
    #[arg(long = "main-server", value_name = "BOOL")]
    pub main_server: Option<bool>,

    /// Whether the launcher connects on start.
    #[arg(long, value_name = "BOOL")]
    pub autoconnect: Option<bool>,
}

impl MetaSetArgs {
    /// Whether any field was given.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.description.is_none()
            && self.main_server.is_none()
            && self.autoconnect.is_none()
    }
}
