//! Screen: the terminal side of the core `Renderer` seam.
//!
//! The controller pushes field state and HUD values into a `Screen`; the game
//! loop renders whatever the screen currently holds once per frame.

use crate::core::{Field, Grid, Record, Renderer, Shape};
use crate::types::{CellState, Outcome, FIELD_HEIGHT, FIELD_WIDTH};

/// End-of-session leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordsPanel {
    pub outcome: Outcome,
    pub entries: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub grid: Grid,
    pub next: Option<Shape>,
    pub score: u32,
    pub level: u32,
    pub username: String,
    pub running: bool,
    pub records: Option<RecordsPanel>,
}

impl Screen {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            grid: [[CellState::Free; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize],
            next: None,
            score: 0,
            level: 1,
            username: username.into(),
            running: false,
            records: None,
        }
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }
}

impl Renderer for Screen {
    fn draw(&mut self, field: &Field) {
        field.write_grid(&mut self.grid);
    }

    fn show_next(&mut self, shape: &Shape) {
        self.next = Some(shape.clone());
    }

    fn show_score(&mut self, score: u32) {
        self.score = score;
    }

    fn show_level(&mut self, level: u32) {
        self.level = level;
    }

    fn show_records(&mut self, outcome: Outcome, records: &[Record]) {
        self.records = Some(RecordsPanel {
            outcome,
            entries: records.to_vec(),
        });
    }

    fn hide_records(&mut self) {
        self.records = None;
    }
}
