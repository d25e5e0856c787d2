// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for packdesk using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! packdesk [global options] <command>
//! login | logout | token | whoami
//! servers | use <server> | files [slot]
//! stage {add|move|delete|unstage}
//! status | discard | submit
//! meta {show|set}
//! options | inis | version
//! ```

pub mod account;
pub mod global;
pub mod server;
pub mod stage;
pub mod submit;


use crate::cli::account::TokenArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::server::{FilesArgs, MetaArgs, UseArgs};
use crate::cli::stage::StageArgs;
use crate::cli::submit::SubmitArgs;
use clap::{Parser, Subcommand};

/// Launcher content admin.
///
/// Stages mods, resource packs and shader packs for a server directory in a
/// GitHub repository and commits them in one go.
#[derive(Debug, Parser)]
#[command(
    name = "packdesk",
    author,
    version,
    about = "Launcher content admin",
    long_about = "packdesk Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Manages the files a game launcher downloads from a GitHub\n\
                  repository. Changes are staged locally with `packdesk stage`\n\
                  and written to the branch with `packdesk submit`.",
    after_help = "CONFIG FILES:\n\n\
                  packdesk reads `packdesk.toml` from the current directory if it\n\
                  exists. Additional files can be given with --ini; later files\n\
                  override earlier ones. PACKDESK_SECTION__KEY environment\n\
                  variables and --set override both. The GitHub token is kept in\n\
                  the state directory, never in config files."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the config files used by packdesk.
    Inis,

    /// Verifies a GitHub token and stores it.
    Login(TokenArgs),

    /// Forgets the stored token and server selection.
    Logout,

    /// Replaces the stored token after verifying the new one.
    Token(TokenArgs),

    /// Shows who the stored token belongs to.
    Whoami,

    /// Lists server directories.
    Servers,

    /// Selects the server to work on.
    Use(UseArgs),

    /// Lists remote files of the selected server.
    Files(FilesArgs),

    /// Edits the staged changes.
    Stage(StageArgs),

    /// Shows the staged changes.
    Status,

    /// Drops all staged changes.
    Discard,

    /// Writes the staged changes to the repository.
    Submit(SubmitArgs),

    /// Reads or edits the server's `servermeta.json`.
    Meta(MetaArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
