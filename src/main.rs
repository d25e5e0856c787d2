// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Config --> Command Dispatch
//!   Login | Logout | Token | Whoami | Servers | Use | Files
//!   Stage | Status | Discard | Submit | Meta | Options | Inis | Version
//! ```

use std::process::ExitCode;

use packdesk::cli::global::GlobalOptions;
use packdesk::cli::{self, Command};
use packdesk::cmd::account::{
    run_login_command, run_logout_command, run_token_command, run_whoami_command,
};
use packdesk::cmd::config::{run_inis_command, run_options_command};
use packdesk::cmd::server::{
    run_files_command, run_meta_command, run_servers_command, run_use_command,
};
use packdesk::cmd::stage::{run_discard_command, run_stage_command, run_status_command};
use packdesk::cmd::submit::run_submit_command;
use packdesk::config::Config;
use packdesk::config::loader::ConfigLoader;
use packdesk::logging::init_logging;
use packdesk::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let server = cli.global.server.as_deref();

    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Inis) => {
            let loader = build_config_loader(&cli.global);
            run_inis_command(&loader.format_loaded_files());
            Ok(())
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
        Some(command) => match load_config(&cli.global) {
            Ok(config) => run_command(command, server, &config).await,
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run_command(
    command: &Command,
    server: Option<&str>,
    config: &Config,
) -> packdesk::error::Result<()> {
    match command {
        // Handled before config is loaded.
        Command::Version | Command::Inis => Ok(()),
        Command::Options => {
            run_options_command(config);
            Ok(())
        }
        Command::Login(args) => run_login_command(args, config).await,
        Command::Logout => run_logout_command(config),
        Command::Token(args) => run_token_command(args, config).await,
        Command::Whoami => run_whoami_command(config).await,
        Command::Servers => run_servers_command(config).await,
        Command::Use(args) => run_use_command(args, config).await,
        Command::Files(args) => run_files_command(args, server, config).await,
        Command::Stage(args) => run_stage_command(args, server, config).await,
        Command::Status => run_status_command(server, config),
        Command::Discard => run_discard_command(config),
        Command::Submit(args) => run_submit_command(args, server, config).await,
        Command::Meta(args) => run_meta_command(args, server, config).await,
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new().add_toml_file_optional("packdesk.toml");
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader.with_env_prefix("PACKDESK")
}

fn load_config(global: &GlobalOptions) -> packdesk::error::Result<Config> {
    build_config_loader(global)
        .set_all(global.to_config_overrides())
        .and_then(ConfigLoader::build)
        .map_err(|e| {
            eprintln!("Failed to load config: {e}");
            e
        })
}
