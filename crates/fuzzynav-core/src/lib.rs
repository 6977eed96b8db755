//! Core types for fuzzynav.
//!
//! This crate provides the platform policies and path utilities, the
//! directory lister that feeds the quick-pick list, and the configuration
//! snapshot shared by the other fuzzynav crates.

mod config;
mod error;
mod listing;
mod platform;

pub use config::{
    Action, Bookmark, CompletionStyle, NavConfig, NavConfigBuilder, StartAction,
    current_host_name,
};
pub use error::{ConfigError, NavError};
pub use listing::{DirectoryLister, ExcludeSet, UP_ENTRY, bare_name, is_folder_entry};
pub use platform::{
    PlatformKind, PlatformPolicy, Posix, Windows, drive_letter, expand_home, native_policy,
    relative_path,
};
