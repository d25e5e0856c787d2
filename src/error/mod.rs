// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                PanelError (~24 bytes)
//!                       |
//!   +------+------+-----+-----+------+------+------+
//!   |      |      |     |     |      |      |      |
//!   v      v      v     v     v      v      v      v
//! Auth  Remote Ledger Submit Stage  Store  Cfg   Io/Other
//!  Box    Box    Box    Box   Box    Box    Box   Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Auth    MissingToken, InvalidToken
//!   Remote  NotFound, Api (raw body), Reqwest, Decode
//!   Ledger  SubmitInProgress, NothingStaged, NotSubmitting
//!   Submit  ConsistencyGap, Aborted
//!   Stage   InvalidExtension, NotAnArchive, Duplicate, ...
//!   Store   Io, Parse
//!   Config  ParseError, MissingKey, InvalidValue
//!
//! All variants boxed => PanelError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`PanelError`].
pub type PanelResult<T> = std::result::Result<T, PanelError>;

/// Result type for calls against the remote content store.
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum PanelError {
    /// Authentication failed or no credential is available.
    #[error("auth error: {0}")]
    Auth(#[from] Box<AuthError>),

    /// Remote content store call failed.
    #[error("remote error: {0}")]
    Remote(#[from] Box<RemoteError>),

    /// Ledger state transition rejected.
    #[error("ledger error: {0}")]
    Ledger(#[from] Box<LedgerError>),

    /// Batch submission failed.
    #[error("submit error: {0}")]
    Submit(#[from] Box<SubmitError>),

    /// A file could not be staged.
    #[error("stage error: {0}")]
    Stage(#[from] Box<StageError>),

    /// Local state (secrets, staged ledger) could not be read or written.
    #[error("store error: {0}")]
    Store(#[from] Box<StoreError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl PanelError {
    /// Raw API error body, if this error carries one.
    #[must_use]
    pub fn api_body(&self) -> Option<&str> {
        match self {
            Self::Remote(remote) => remote.api_body(),
            Self::Submit(submit) => submit.remote().api_body(),
            _ => None,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for PanelError {
                fn from(err: $error) -> Self {
                    PanelError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    AuthError => Auth,
    RemoteError => Remote,
    LedgerError => Ledger,
    SubmitError => Submit,
    StageError => Stage,
    StoreError => Store,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Auth Errors ---

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No token stored and none supplied.
    #[error("no GitHub token stored (run `packdesk login`)")]
    MissingToken,

    /// GitHub rejected the token. Any stored copy has already been cleared.
    #[error("GitHub rejected the token: {message}")]
    InvalidToken { message: String },
}

// --- Remote Errors ---

/// Remote content store errors.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The requested path does not exist on the branch.
    #[error("not found: {path}")]
    NotFound { path: String },

    /// The API answered with a non-success status.
    #[error("http error {status}: {url}")]
    Api {
        status: u16,
        url: String,
        /// Response body exactly as returned, for diagnostics.
        body: String,
    },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// A response could not be interpreted.
    #[error("failed to decode {what}: {message}")]
    Decode { what: String, message: String },
}

impl RemoteError {
    /// Raw API error body, if the server sent one.
    #[must_use]
    pub fn api_body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }

    /// HTTP status of an API error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// Whether the status means the credential is unusable.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

// --- Ledger Errors ---

/// Ledger state machine errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A submission is already running against this ledger.
    #[error("a submission is already in progress")]
    SubmitInProgress,

    /// `begin_submit` was called with nothing staged.
    #[error("no changes to submit")]
    NothingStaged,

    /// `finish_submit` was called without a matching `begin_submit`.
    #[error("no submission in progress")]
    NotSubmitting,
}

// --- Submit Errors ---

/// Batch (tree commit) submission errors.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// A step failed after large-item commits were already pushed.
    ///
    /// The branch holds the listed commits; the remaining changes were not
    /// applied.
    #[error(
        "batch aborted at {stage} after {} large-file commit(s) were applied: {source}",
        applied_commits.len()
    )]
    ConsistencyGap {
        stage: String,
        applied_commits: Vec<String>,
        #[source]
        source: RemoteError,
    },

    /// A step failed before anything reached the branch.
    #[error("batch aborted at {stage}: {source}")]
    Aborted {
        stage: String,
        #[source]
        source: RemoteError,
    },
}

impl SubmitError {
    /// The remote failure that stopped the batch.
    #[must_use]
    pub const fn remote(&self) -> &RemoteError {
        match self {
            Self::ConsistencyGap { source, .. } | Self::Aborted { source, .. } => source,
        }
    }

    /// Commits that reached the branch before the failure.
    #[must_use]
    pub fn applied_commits(&self) -> &[String] {
        match self {
            Self::ConsistencyGap {
                applied_commits, ..
            } => applied_commits,
            Self::Aborted { .. } => &[],
        }
    }
}

// --- Stage Errors ---

/// Errors raised while staging a change.
#[derive(Debug, Error)]
pub enum StageError {
    /// The file extension is not accepted for the slot.
    #[error("invalid file type for {slot}: {file_name} (only {expected} files allowed)")]
    InvalidExtension {
        slot: String,
        file_name: String,
        expected: &'static str,
    },

    /// The file does not start with a ZIP header.
    #[error("{file_name} is corrupted or not a valid archive")]
    NotAnArchive { file_name: String },

    /// The file already exists remotely or is already staged.
    #[error("{file_name} already exists in {slot} (use --force to overwrite)")]
    Duplicate { file_name: String, slot: String },

    /// The named file is not in the remote listing.
    #[error("{file_name} not found in {slot}")]
    UnknownRemoteFile { file_name: String, slot: String },

    /// Source and destination category are the same.
    #[error("{file_name} is already in {category}")]
    SameCategory { file_name: String, category: String },

    /// Only mods can move between categories.
    #[error("only forgemods can be moved between categories, not {file_type}")]
    MoveNotAllowed { file_type: String },

    /// The local file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Store Errors ---

/// Local state persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the state file failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The state file is not valid JSON for its type.
    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
