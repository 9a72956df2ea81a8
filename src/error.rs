use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("A guest definition already exists at {path}.")]
    AlreadyExists { path: PathBuf },
    #[error("Invalid guest name `{name}`: {reason}.")]
    InvalidGuestName { name: String, reason: &'static str },
    #[error("Failed to read guest definition at {path}: {source}")]
    ReadGuest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write guest definition at {path}: {source}")]
    WriteGuest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Guest definition at {path} could not be decoded: {source}")]
    DecodeGuest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Guest `{name}` could not be encoded: {source}")]
    EncodeGuest {
        name: String,
        #[source]
        source: toml::ser::Error,
    },
    #[error("Failed to list guest definitions in {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Guest `{guest}` exited with status {status}:\n{stderr}")]
    LaunchFailed {
        guest: String,
        status: i32,
        stderr: String,
    },
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("A listener is already registered for {path}.")]
    ListenerExists { path: PathBuf },
    #[error("Listener operation on {path} failed: {source}")]
    Listener {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read settings file at {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Settings at {path} could not be parsed: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Settings at {path} are invalid: {message}")]
    InvalidConfig { path: PathBuf, message: String },
    #[error("Failed to determine the current working directory: {source}")]
    WorkingDirectoryUnavailable {
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Whether the failure was caused by an existing file or listener.
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self,
            Self::AlreadyExists { .. } | Self::ListenerExists { .. }
        )
    }
}

/// Returned when a string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`; expected one of: {expected}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}
