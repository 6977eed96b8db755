//! File operations engine for fuzzynav.
//!
//! This crate provides the synchronous filesystem actions behind the
//! navigator's commands (create, delete, rename, duplicate, copy/move/paste).
//! Each action checks its preconditions first (`AlreadyExists`,
//! `TargetMissing`) and reports any remaining failure as
//! [`OperationError::Failed`] naming the offending path.

mod conflict;
mod create;
mod delete;
mod error;
mod rename;
mod transfer;

pub use conflict::{Conflict, ConflictKind, ConflictResolution, auto_rename_path};
pub use create::{create_directory, create_file};
pub use delete::delete;
pub use error::OperationError;
pub use rename::{rename, validate_filename, validate_relative};
pub use transfer::{PasteReport, TransferMode, copy_item, duplicate, move_item, paste};
