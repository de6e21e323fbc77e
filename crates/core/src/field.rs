//! Field module - the playing grid
//!
//! The field is a 10x20 grid where each cell is free, settled, or covered by
//! the falling shape. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! Exactly the cells of the current shape at its position are `Active`. Every
//! placement is all-or-nothing: a shape is only ever put where all of its cells
//! are inside the grid and none is settled, otherwise the field is left as it was.

use crate::shape::Shape;
use crate::types::{Action, CellState, Point, FIELD_HEIGHT, FIELD_WIDTH, SPAWN_POSITION};

const WIDTH: usize = FIELD_WIDTH as usize;
const HEIGHT: usize = FIELD_HEIGHT as usize;

/// Total number of cells on the field
const FIELD_SIZE: usize = WIDTH * HEIGHT;

/// Row-major grid copy handed to renderers.
pub type Grid = [[CellState; WIDTH]; HEIGHT];

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [CellState; FIELD_SIZE],
    current: Option<Shape>,
    position: Point,
}

impl Field {
    pub fn new() -> Self {
        Self {
            cells: [CellState::Free; FIELD_SIZE],
            current: None,
            position: SPAWN_POSITION,
        }
    }

    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn in_bounds(x: i32, y: i32) -> bool {
        (0..FIELD_WIDTH).contains(&x) && (0..FIELD_HEIGHT).contains(&y)
    }

    pub fn width(&self) -> i32 {
        FIELD_WIDTH
    }

    pub fn height(&self) -> i32 {
        FIELD_HEIGHT
    }

    /// State of the cell at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the field; callers own the bounds.
    pub fn cell(&self, x: i32, y: i32) -> CellState {
        match Self::index(x, y) {
            Some(idx) => self.cells[idx],
            None => panic!(
                "cell ({}, {}) is outside the {}x{} field",
                x, y, FIELD_WIDTH, FIELD_HEIGHT
            ),
        }
    }

    /// Non-panicking variant of [`Field::cell`].
    pub fn try_cell(&self, x: i32, y: i32) -> Option<CellState> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    pub fn current_shape(&self) -> Option<&Shape> {
        self.current.as_ref()
    }

    /// Center of the current shape (meaningless while no shape is in play).
    pub fn shape_position(&self) -> Point {
        self.position
    }

    fn fits(&self, cells: &[Point]) -> bool {
        cells.iter().all(|p| {
            Self::index(p.x, p.y).is_some_and(|idx| self.cells[idx] != CellState::Settled)
        })
    }

    fn mark_current(&mut self, state: CellState) {
        let Some(shape) = &self.current else {
            return;
        };
        for p in shape.calc_cells(self.position) {
            if let Some(idx) = Self::index(p.x, p.y) {
                self.cells[idx] = state;
            }
        }
    }

    /// Put `shape` in play with its center at (x, y), replacing the current one.
    ///
    /// Returns false and leaves the field untouched if any cell would be out of
    /// bounds or settled.
    pub fn set_shape(&mut self, shape: Shape, x: i32, y: i32) -> bool {
        let position = Point::new(x, y);
        if !self.fits(&shape.calc_cells(position)) {
            return false;
        }

        self.mark_current(CellState::Free);
        self.current = Some(shape);
        self.position = position;
        self.mark_current(CellState::Active);
        true
    }

    /// Move the current shape's center to (x, y), keeping its geometry.
    pub fn set_shape_position(&mut self, x: i32, y: i32) -> bool {
        let Some(shape) = &self.current else {
            return false;
        };
        let position = Point::new(x, y);
        let cells = shape.calc_cells(position);
        if !self.fits(&cells) {
            return false;
        }

        self.mark_current(CellState::Free);
        self.position = position;
        self.mark_current(CellState::Active);
        true
    }

    /// Apply a player or timer action to the current shape.
    ///
    /// `Set` drops the shape as far as it goes and always reports success.
    /// Rotation has no wall kicks: a blocked rotation leaves the shape as it was.
    pub fn move_shape(&mut self, action: Action) -> bool {
        let Point { x, y } = self.position;
        match action {
            Action::Down => self.set_shape_position(x, y + 1),
            Action::Left => self.set_shape_position(x - 1, y),
            Action::Right => self.set_shape_position(x + 1, y),
            Action::Rotate => match self.current.as_ref().map(Shape::rotated) {
                Some(rotated) => self.set_shape(rotated, x, y),
                None => false,
            },
            Action::Set => {
                while self.move_shape(Action::Down) {}
                true
            }
        }
    }

    /// Whether the current shape has come to rest.
    ///
    /// A single cell on the bottom row or above a settled cell is enough, even
    /// if other cells of the shape still have room below them.
    pub fn can_fix_shape(&self) -> bool {
        let Some(shape) = &self.current else {
            return false;
        };
        shape.calc_cells(self.position).iter().any(|p| {
            p.y == FIELD_HEIGHT - 1 || self.try_cell(p.x, p.y + 1) == Some(CellState::Settled)
        })
    }

    /// Settle the current shape if it has come to rest. Afterwards no shape is in play.
    pub fn fix_shape(&mut self) -> bool {
        if !self.can_fix_shape() {
            return false;
        }
        self.mark_current(CellState::Settled);
        self.current = None;
        true
    }

    /// A row is complete when every cell in it is settled.
    pub fn is_row_complete(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH]
            .iter()
            .all(|cell| cell.is_settled())
    }

    /// Remove every complete row, shifting the rows above down and filling the
    /// top with free rows. Returns the number of rows removed.
    ///
    /// Meant to run right after [`Field::fix_shape`], while no shape is active.
    pub fn clear_completed_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut write_y = HEIGHT;

        // Scan from bottom to top, compacting incomplete rows downwards.
        for read_y in (0..HEIGHT).rev() {
            if self.is_row_complete(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
            }
        }

        self.cells[..write_y * WIDTH].fill(CellState::Free);
        cleared
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Copy the grid into a renderer-owned buffer without allocating.
    pub fn write_grid(&self, out: &mut Grid) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Mark a cell settled directly (test setup only).
    #[cfg(test)]
    pub(crate) fn settle(&mut self, x: i32, y: i32) {
        let idx = Self::index(x, y).expect("settle in bounds");
        self.cells[idx] = CellState::Settled;
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}
