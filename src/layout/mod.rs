// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository layout for launcher content.
//!
//! ```text
//! {servers_root}/{server}/
//!   servermeta.json
//!   forgemods/required/      *.jar
//!   forgemods/optionalon/    *.jar
//!   forgemods/optionaloff/   *.jar
//!   files/shaderpacks/       *.zip
//!   files/resourcepacks/     *.zip
//!   files/                   anything
//! ```
//!
//! A [`Slot`] is one of those directories: a file type plus a category,
//! where the empty category means "directly under the type directory".

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Server metadata file name.
pub const METADATA_FILE: &str = "servermeta.json";

/// Top-level content type under a server directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Forge mods, sorted into required/optional categories.
    #[serde(rename = "forgemods")]
    ForgeMods,
    /// Resource packs, shader packs and loose files.
    Files,
}

impl FileType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ForgeMods => "forgemods",
            Self::Files => "files",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FileType {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forgemods" | "mods" => Ok(Self::ForgeMods),
            "files" => Ok(Self::Files),
            _ => Err(invalid_slot(s, "expected 'forgemods' or 'files'")),
        }
    }
}

/// A directory that holds one kind of content for a server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub file_type: FileType,
    /// Subdirectory under the type directory; empty for loose files.
    #[serde(default)]
    pub category: String,
}

impl Slot {
    pub const REQUIRED: &'static str = "required";
    pub const OPTIONAL_ON: &'static str = "optionalon";
    pub const OPTIONAL_OFF: &'static str = "optionaloff";
    pub const SHADERPACKS: &'static str = "shaderpacks";
    pub const RESOURCEPACKS: &'static str = "resourcepacks";

    #[must_use]
    pub fn new(file_type: FileType, category: impl Into<String>) -> Self {
        Self {
            file_type,
            category: category.into(),
        }
    }

    #[must_use]
    pub fn mods(category: impl Into<String>) -> Self {
        Self::new(FileType::ForgeMods, category)
    }

    #[must_use]
    pub fn files(category: impl Into<String>) -> Self {
        Self::new(FileType::Files, category)
    }

    /// The six slots a server is expected to have, in display order.
    #[must_use]
    pub fn standard() -> Vec<Self> {
        vec![
            Self::mods(Self::REQUIRED),
            Self::mods(Self::OPTIONAL_ON),
            Self::mods(Self::OPTIONAL_OFF),
            Self::files(Self::SHADERPACKS),
            Self::files(Self::RESOURCEPACKS),
            Self::files(""),
        ]
    }

    /// Directory of this slot for `server`.
    #[must_use]
    pub fn dir_path(&self, servers_root: &str, server: &str) -> String {
        let base = server_dir(servers_root, server);
        if self.file_type == FileType::ForgeMods || !self.category.is_empty() {
            format!("{base}/{}/{}", self.file_type, self.category)
        } else {
            format!("{base}/{}", self.file_type)
        }
    }

    /// Full repository path of `file_name` in this slot.
    #[must_use]
    pub fn file_path(&self, servers_root: &str, server: &str, file_name: &str) -> String {
        format!("{}/{file_name}", self.dir_path(servers_root, server))
    }

    /// Required extension for uploads into this slot, if any.
    #[must_use]
    pub fn required_extension(&self) -> Option<&'static str> {
        match (self.file_type, self.category.as_str()) {
            (FileType::ForgeMods, _) => Some(".jar"),
            (FileType::Files, Self::SHADERPACKS | Self::RESOURCEPACKS) => Some(".zip"),
            (FileType::Files, _) => None,
        }
    }

    /// Whether uploads must carry a ZIP header.
    #[must_use]
    pub fn requires_archive(&self) -> bool {
        self.file_type == FileType::ForgeMods
    }

    /// Upper-case label used in duplicate warnings.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match (self.file_type, self.category.as_str()) {
            (FileType::ForgeMods, _) => "MODS",
            (FileType::Files, Self::SHADERPACKS) => "SHADERPACKS",
            (FileType::Files, Self::RESOURCEPACKS) => "RESOURCE PACKS",
            (FileType::Files, _) => "FILES",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.category.is_empty() {
            write!(f, "{}", self.file_type)
        } else {
            write!(f, "{}/{}", self.file_type, self.category)
        }
    }
}

impl std::str::FromStr for Slot {
    type Err = ConfigError;

    /// Parses `forgemods/required`, `files/shaderpacks` or `files`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (file_type, category) = s.split_once('/').unwrap_or((s, ""));
        let file_type: FileType = file_type.parse()?;
        let category = category.trim_matches('/');

        if category.contains('/') {
            return Err(invalid_slot(s, "categories cannot be nested"));
        }
        if file_type == FileType::ForgeMods && category.is_empty() {
            return Err(invalid_slot(
                s,
                "forgemods needs a category (required, optionalon, optionaloff)",
            ));
        }

        Ok(Self::new(file_type, category))
    }
}

/// Directory of one server.
#[must_use]
pub fn server_dir(servers_root: &str, server: &str) -> String {
    if servers_root.is_empty() {
        server.to_string()
    } else {
        format!("{servers_root}/{server}")
    }
}

/// Path of a server's metadata file.
#[must_use]
pub fn metadata_path(servers_root: &str, server: &str) -> String {
    format!("{}/{METADATA_FILE}", server_dir(servers_root, server))
}

/// Final path component.
#[must_use]
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn invalid_slot(value: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: "slot".to_string(),
        key: value.to_string(),
        message: message.to_string(),
    }
}
