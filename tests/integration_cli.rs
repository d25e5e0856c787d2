// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use packdesk::cli::Cli;
use packdesk::cli::Command;
use packdesk::cli::server::MetaAction;
use packdesk::cli::stage::StageAction;
use packdesk::layout::Slot;

// =============================================================================
// Simple Commands
// =============================================================================

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["packdesk", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["packdesk"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn cli_unknown_command_fails() {
    assert!(Cli::try_parse_from(["packdesk", "deploy"]).is_err());
}

#[test]
fn cli_plain_commands() {
    for (arg, expected) in [
        ("logout", "Logout"),
        ("whoami", "Whoami"),
        ("servers", "Servers"),
        ("status", "Status"),
        ("discard", "Discard"),
        ("options", "Options"),
        ("inis", "Inis"),
    ] {
        let cli = Cli::try_parse_from(["packdesk", arg]).unwrap();
        assert_eq!(format!("{:?}", cli.command.unwrap()), expected);
    }
}

// =============================================================================
// Server Selection
// =============================================================================

#[test]
fn cli_use_requires_server() {
    assert!(Cli::try_parse_from(["packdesk", "use"]).is_err());

    let cli = Cli::try_parse_from(["packdesk", "use", "survival"]).unwrap();
    let Some(Command::Use(args)) = cli.command else {
        panic!("expected use");
    };
    assert_eq!(args.server, "survival");
}

#[test]
fn cli_files_with_loose_files_slot() {
    let cli = Cli::try_parse_from(["packdesk", "-S", "creative", "files", "files"]).unwrap();
    let Some(Command::Files(args)) = cli.command else {
        panic!("expected files");
    };
    assert_eq!(cli.global.server.as_deref(), Some("creative"));
    assert_eq!(args.slot, Some(Slot::files("")));
}

#[test]
fn cli_meta_show() {
    let cli = Cli::try_parse_from(["packdesk", "meta", "show"]).unwrap();
    let Some(Command::Meta(args)) = cli.command else {
        panic!("expected meta");
    };
    assert!(matches!(args.action, MetaAction::Show));
}

// =============================================================================
// Staging
// =============================================================================

#[test]
fn cli_stage_add_requires_files() {
    assert!(Cli::try_parse_from(["packdesk", "stage", "add", "files/shaderpacks"]).is_err());
}

#[test]
fn cli_stage_delete_many() {
    let cli = Cli::try_parse_from([
        "packdesk",
        "stage",
        "delete",
        "files/resourcepacks",
        "a.zip",
        "b.zip",
    ])
    .unwrap();
    let Some(Command::Stage(args)) = cli.command else {
        panic!("expected stage");
    };
    let StageAction::Delete(delete) = args.action else {
        panic!("expected delete");
    };
    assert_eq!(delete.slot, Slot::files(Slot::RESOURCEPACKS));
    assert_eq!(delete.names, vec!["a.zip", "b.zip"]);
}

#[test]
fn cli_stage_move_with_local_copy() {
    let cli = Cli::try_parse_from([
        "packdesk",
        "stage",
        "move",
        "jei.jar",
        "--from",
        "forgemods/optionalon",
        "--to",
        "required",
        "--file",
        "build/jei.jar",
    ])
    .unwrap();
    let Some(Command::Stage(args)) = cli.command else {
        panic!("expected stage");
    };
    let StageAction::Move(mv) = args.action else {
        panic!("expected move");
    };
    assert_eq!(mv.from, Slot::mods(Slot::OPTIONAL_ON));
    assert_eq!(
        mv.file.as_deref(),
        Some(std::path::Path::new("build/jei.jar"))
    );
}

// =============================================================================
// Submission
// =============================================================================

#[test]
fn cli_submit_defaults_to_config() {
    let cli = Cli::try_parse_from(["packdesk", "--dry", "submit"]).unwrap();
    let Some(Command::Submit(args)) = cli.command else {
        panic!("expected submit");
    };
    assert!(cli.global.dry);
    assert!(args.mode.is_none());
    assert!(args.large_items.is_none());
}

#[test]
fn cli_submit_rejects_unknown_mode() {
    assert!(Cli::try_parse_from(["packdesk", "submit", "--mode", "atomic"]).is_err());
}
