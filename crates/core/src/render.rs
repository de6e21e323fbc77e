//! Presentation seam.
//!
//! The controller never draws anything itself. It hands read-only state to a
//! [`Renderer`], which may be a terminal view, a test recorder, or nothing at all.

use crate::field::Field;
use crate::records::Record;
use crate::shape::Shape;
use crate::types::Outcome;

pub trait Renderer {
    /// Redraw the field. Must be idempotent.
    fn draw(&mut self, field: &Field);

    fn show_next(&mut self, _shape: &Shape) {}

    fn show_score(&mut self, _score: u32) {}

    fn show_level(&mut self, _level: u32) {}

    /// Session ended; present the best records under the outcome's title.
    fn show_records(&mut self, _outcome: Outcome, _records: &[Record]) {}

    fn hide_records(&mut self) {}
}

/// Renderer that discards everything (headless runs, benchmarks).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _field: &Field) {}
}
