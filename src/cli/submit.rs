// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the `submit` command.
//!
//! ```text
//! packdesk submit [--mode individual|batch] [--large-items split|inline]
//!                 [--threshold BYTES]
//! ```
//!
//! Unset flags fall back to the `[submit]` config section.

use clap::{Args, ValueEnum};

use crate::config::types::{LargeItemPolicy, SubmitMode};

#[derive(Debug, Clone, Default, Args)]
pub struct SubmitArgs {
    /// How changes reach the repository.
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Batch mode: give files above the threshold their own commit (split)
    /// or keep everything in one commit (inline).
    #[arg(long = "large-items", value_name = "POLICY")]
    pub large_items: Option<LargeItemsArg>,

    /// Batch mode: size in bytes above which a file is large.
    #[arg(long, value_name = "BYTES", value_parser = clap::value_parser!(u64).range(1..))]
    pub threshold: Option<u64>,
}

/// Submission mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// One commit per file through the Contents API; moves stay staged.
    Individual,
    /// Blobs, trees and commits through the Git Data API.
    Batch,
}

impl From<ModeArg> for SubmitMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Individual => Self::Individual,
            ModeArg::Batch => Self::Batch,
        }
    }
}

/// Large-item handling in batch mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LargeItemsArg {
    Split,
    Inline,
}

impl From<LargeItemsArg> for LargeItemPolicy {
    fn from(policy: LargeItemsArg) -> Self {
        match policy {
            LargeItemsArg::Split => Self::Split,
            LargeItemsArg::Inline => Self::Inline,
        }
    }
}
