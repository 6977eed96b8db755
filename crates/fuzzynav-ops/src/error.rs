//! Error type for file operations.

use std::path::PathBuf;

use fuzzynav_core::Action;
use thiserror::Error;

/// An error that occurred during a file operation.
///
/// Every variant names the path it concerns so the host can show it.
#[derive(Debug, Error)]
pub enum OperationError {
    /// The target of a create, rename or paste already exists.
    #[error("{path} already exists!")]
    AlreadyExists { path: PathBuf },

    /// The source or parent directory of an operation is missing.
    #[error("{path} does not exist!")]
    TargetMissing { path: PathBuf },

    /// The requested name is not usable as a file name.
    #[error("Invalid name for {path}: {reason}")]
    InvalidName { path: PathBuf, reason: String },

    /// A directory cannot be copied or moved into itself.
    #[error("Cannot {action} {path} into itself")]
    SourceIsAncestor { path: PathBuf, action: Action },

    /// The underlying filesystem call failed.
    #[error("Could not {action} {path}: {source}")]
    Failed {
        path: PathBuf,
        action: Action,
        #[source]
        source: std::io::Error,
    },
}

impl OperationError {
    /// Wrap a failed filesystem call.
    pub fn failed(path: impl Into<PathBuf>, action: Action, source: std::io::Error) -> Self {
        Self::Failed {
            path: path.into(),
            action,
            source,
        }
    }

    /// The path the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::AlreadyExists { path }
            | Self::TargetMissing { path }
            | Self::InvalidName { path, .. }
            | Self::SourceIsAncestor { path, .. }
            | Self::Failed { path, .. } => path,
        }
    }
}
