//! Terminal renderer for the game.
//!
//! A small, game-oriented rendering layer: the controller writes into a
//! [`Screen`], [`GameView`] turns the screen into a framebuffer, and
//! [`TerminalRenderer`] flushes framebuffers to the terminal.
//!
//! Goals:
//! - Keep `core` free of any terminal concerns
//! - Keep the view pure so layouts can be unit-tested
//! - Render each field cell 2 chars wide to compensate for glyph aspect ratio

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod screen;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use screen::{RecordsPanel, Screen};
