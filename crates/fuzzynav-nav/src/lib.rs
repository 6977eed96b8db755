//! Navigation session for fuzzynav.
//!
//! [`Navigator`] turns host events (list selections, input-line edits,
//! focus changes, completion keystrokes) into directory listings and file
//! actions. The host is reached only through the [`Host`] trait, so the
//! whole state machine runs against any editor surface, or a test double.

mod actions;
mod command;
mod complete;
mod host;
mod navigator;
mod state;

pub use command::{CommandKind, classify};
pub use complete::{Completer, TabCompleteState};
pub use host::{Host, ProjectFolder};
pub use navigator::Navigator;
pub use state::{Clipboard, ClipboardMode, NavigationState, Panel, ViewId, WindowId};
