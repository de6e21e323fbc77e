//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the game and the session state machine.
//! It has **no I/O**: drawing goes through the [`Renderer`] trait and score
//! persistence through the [`RecordStore`] trait, so everything here runs the
//! same in the terminal, headless, or under test.
//!
//! # Module Structure
//!
//! - [`shape`]: polyomino geometry, quarter-turn rotation, the 7-piece catalog
//! - [`field`]: 10x20 grid with collision checks, movement, fixing and line clearing
//! - [`game`]: the controller running a session (falling, scoring, leveling, win/lose)
//! - [`timer`]: cancellable repeating fall timer on a cooperative clock
//! - [`records`]: record store seam plus best-score and leaderboard helpers
//! - [`config`]: session tunables, optionally read from the environment
//! - [`rng`]: seeded uniform shape selection
//!
//! # Game Rules
//!
//! - Shapes spawn at (4, 3) and fall one row per fall period
//! - A shape comes to rest as soon as **any** of its cells sits on the bottom
//!   row or on a settled cell
//! - Every cleared line is worth 250 points
//! - The level advances when the score reaches `level * 500`; each level cuts
//!   the fall delay by a fixed step
//! - Reaching the maximum level wins; a blocked spawn loses
//!
//! # Example
//!
//! ```
//! use tui_blockfall_core::{GameConfig, GameController, MemoryRecordStore, NullRenderer};
//! use tui_blockfall_types::Action;
//!
//! let mut game = GameController::new(GameConfig::default(), MemoryRecordStore::new(), NullRenderer);
//! game.start();
//!
//! game.tick(Action::Left);
//! game.tick(Action::Rotate);
//! game.tick(Action::Set);
//!
//! // Advance the fall timer by one second of game time.
//! game.update(1000);
//! assert!(game.is_running());
//! ```

pub mod config;
pub mod field;
pub mod game;
pub mod records;
pub mod render;
pub mod rng;
pub mod shape;
pub mod timer;

pub use tui_blockfall_types as types;

// Re-export commonly used types for convenience
pub use config::{env_u32, GameConfig, SEED_VAR};
pub use field::{Field, Grid};
pub use game::GameController;
pub use records::{
    sanitize_username, store_best, top_records, MemoryRecordStore, Record, RecordStore,
};
pub use render::{NullRenderer, Renderer};
pub use rng::SimpleRng;
pub use shape::{Shape, ShapeCells, ShapeKind};
pub use timer::FallTimer;
