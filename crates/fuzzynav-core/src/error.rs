//! Error types for navigation and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Why a directory could not be shown.
#[derive(Debug, Error)]
pub enum NavError {
    /// A start or navigation target is missing or not a folder; the root is
    /// used instead.
    #[error("{path} is not a folder")]
    PathInvalid { path: PathBuf },

    /// Reading a folder failed (permissions, removed mid-session).
    #[error("{path} is not accessible!")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl NavError {
    /// Wrap a failed folder read.
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryUnreadable {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::PathInvalid { path } | Self::DirectoryUnreadable { path, .. } => Some(path),
            Self::InvalidPattern { .. } => None,
        }
    }
}

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform has no configuration directory.
    #[error("No config directory")]
    NoConfigDir,

    /// The settings file could not be read.
    #[error("Failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for this schema.
    #[error("Invalid settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The settings file could not be written.
    #[error("Failed to write settings {path}: {message}")]
    Write { path: PathBuf, message: String },
}
