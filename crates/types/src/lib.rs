//! Core types module - shared data structures and constants
//!
//! This crate defines the value types every other crate speaks in. They are
//! plain data with no dependencies, usable from the game core, the terminal
//! view and the record store alike.
//!
//! # Field Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn position**: (4, 3), the horizontal center three rows below the top
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `POINTS_PER_LINE` | 250 | Points awarded per cleared line |
//! | `LEVEL_SCORE_STEP` | 500 | Score needed per level (`level * 500`) |
//! | `DEFAULT_MAX_LEVEL` | 10 | Reaching this level wins the game |
//! | `DEFAULT_FALL_DELAY_MS` | 1000 | Fall delay on level 1 |
//! | `DEFAULT_FALL_DELAY_DECREMENT_MS` | 100 | Fall delay reduction per level |
//!
//! # Examples
//!
//! ```
//! use tui_blockfall_types::{Action, Outcome, Point, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! let p = Point::new(1, 2) + Point::new(3, -1);
//! assert_eq!(p, Point::new(4, 1));
//!
//! assert_eq!(Action::default(), Action::Down);
//! assert_eq!(Outcome::Victory.label(), "Victory");
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 20);
//! ```

use std::ops::Add;

/// Field width in cells (10 columns)
pub const FIELD_WIDTH: i32 = 10;

/// Field height in cells (20 rows)
pub const FIELD_HEIGHT: i32 = 20;

/// Center of a freshly spawned shape.
pub const SPAWN_POSITION: Point = Point::new(FIELD_WIDTH / 2 - 1, 3);

/// Points awarded for every cleared line.
pub const POINTS_PER_LINE: u32 = 250;

/// A level advances once the score reaches `level * LEVEL_SCORE_STEP`.
pub const LEVEL_SCORE_STEP: u32 = 500;

/// Level that ends the session with a victory.
pub const DEFAULT_MAX_LEVEL: u32 = 10;

/// Fall delay on level 1 (milliseconds per row).
pub const DEFAULT_FALL_DELAY_MS: u32 = 1000;

/// Amount the fall delay shrinks on every level advance.
pub const DEFAULT_FALL_DELAY_DECREMENT_MS: u32 = 100;

/// Number of entries shown in the records panel.
pub const RECORDS_PANEL_LIMIT: usize = 5;

/// Longest accepted player name.
pub const USERNAME_MAX_LEN: usize = 30;

/// Fixed step of the terminal game loop (16ms ≈ 60 FPS).
pub const FRAME_MS: u32 = 16;

/// Integer coordinate on the field, or an offset from a shape center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// State of a single field cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Free,
    /// Permanently occupied by a piece that came to rest.
    Settled,
    /// Occupied by the falling shape.
    Active,
}

impl CellState {
    pub fn is_settled(self) -> bool {
        self == CellState::Settled
    }
}

/// Actions that can be applied to the falling shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    Left,
    Right,
    /// One row down; the action fired by the fall timer.
    #[default]
    Down,
    Rotate,
    /// Hard drop.
    Set,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Right => "right",
            Action::Down => "down",
            Action::Rotate => "rotate",
            Action::Set => "set",
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Victory,
    Defeat,
}

impl Outcome {
    /// Title shown on the records panel.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Victory => "Victory",
            Outcome::Defeat => "Defeat",
        }
    }

    pub fn is_victory(&self) -> bool {
        *self == Outcome::Victory
    }
}
