// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   read_json()          missing file --> None
//!   write_json_atomic()  temp file in the same dir, then rename
//!   remove_file()        missing file is not an error
//! ```

pub mod fs;
