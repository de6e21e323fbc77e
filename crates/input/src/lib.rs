//! Terminal input module.
//!
//! Maps `crossterm` key events onto the fixed set of game actions and the
//! session commands (start/stop, restart, quit). Unmapped keys are ignored.

pub mod map;

pub use tui_blockfall_types as types;

pub use map::{handle_command_key, handle_key_event, Command};
