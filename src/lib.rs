// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |      account / server / stage / submit
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!               auth       servers   stage ---> ledger
//!                 |        files       |          |
//!                 |           |        |          v
//!                 |           |        |        submit
//!                 v           v        v          |
//!              ,------------------------------------,
//!              |  remote   Session + RemoteStore    |
//!              |           GitHubStore (reqwest)    |
//!              '------------------------------------'
//!
//!   +-----------------------------------------------+
//!   |  local state   secrets, ledger::store, layout |
//!   +-----------------------------------------------+
//!   |  foundation    error, logging, utility        |
//!   +-----------------------------------------------+
//! ```

pub mod auth;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod files;
pub mod layout;
pub mod ledger;
pub mod logging;
pub mod remote;
pub mod secrets;
pub mod servers;
pub mod stage;
pub mod submit;
pub mod utility;
