// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `login`, `logout`, `token` and `whoami`.

use std::io::{BufRead, IsTerminal, Write};

use anyhow::Context;

use super::{open_session, secret_store};
use crate::auth;
use crate::cli::account::TokenArgs;
use crate::config::Config;
use crate::error::Result;

/// Verify a token and store it.
///
/// # Errors
///
/// Returns an error if no token is given or GitHub rejects it.
pub async fn run_login_command(args: &TokenArgs, config: &Config) -> Result<()> {
    let token = read_token(args)?;
    let secrets = secret_store(config);
    let session = auth::authenticate(&secrets, &config.repo, &token).await?;
    println!(
        "Logged in as {} ({})",
        session.login(),
        session.repo().full_name()
    );
    Ok(())
}

/// Forget the stored token and server selection.
///
/// # Errors
///
/// Returns an error if the secret store cannot be written.
pub fn run_logout_command(config: &Config) -> Result<()> {
    auth::logout(&secret_store(config))?;
    println!("Logged out");
    Ok(())
}

/// Replace the stored token once the new one is verified.
///
/// # Errors
///
/// Returns an error if no token is given or GitHub rejects it; the old
/// token is kept in that case.
pub async fn run_token_command(args: &TokenArgs, config: &Config) -> Result<()> {
    let token = read_token(args)?;
    let secrets = secret_store(config);
    let session = auth::update_token(&secrets, &config.repo, &token).await?;
    println!("Token updated for {}", session.login());
    Ok(())
}

/// Show the token owner and the target repository.
///
/// # Errors
///
/// Returns an error if no token is stored or GitHub rejects it.
pub async fn run_whoami_command(config: &Config) -> Result<()> {
    let secrets = secret_store(config);
    let session = open_session(config, &secrets).await?;
    println!("{}", session.login());
    println!(
        "{} ({})",
        session.repo().html_url(),
        session.branch()
    );
    Ok(())
}

/// Token from `--token`/`PACKDESK_TOKEN`, else one line of stdin.
fn read_token(args: &TokenArgs) -> Result<String> {
    if let Some(token) = &args.token {
        return Ok(token.clone());
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprint!("GitHub token: ");
        std::io::stderr().flush().ok();
    }

    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("failed to read token from stdin")?;
    Ok(line.trim().to_string())
}
