// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for `login` and `token`.
//!
//! ```text
//! packdesk login [--token TOKEN]   verify, then store
//! packdesk token [--token TOKEN]   verify, then replace the stored token
//! ```
//!
//! Without `--token` (or `PACKDESK_TOKEN`) the token is read from stdin.

use clap::Args;

/// Token input shared by `login` and `token`.
#[derive(Debug, Clone, Default, Args)]
pub struct TokenArgs {
    /// GitHub personal access token with `repo` scope.
    #[arg(
        long = "token",
        value_name = "TOKEN",
        env = "PACKDESK_TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,
}
