//! Shape module - rotation-aware polyominoes and the tetromino catalog
//!
//! A shape is a list of offsets from an implicit center cell at the origin.
//! Placing it at a center point yields the absolute cells it occupies.
//! Rotation maps every offset through (x, y) -> (-y, x), a quarter turn
//! about the center.

use arrayvec::ArrayVec;

use crate::types::Point;

/// Maximum number of offsets a shape can carry (center excluded).
pub const MAX_OFFSETS: usize = 4;

/// Maximum number of cells a shape occupies (center included).
pub const MAX_CELLS: usize = MAX_OFFSETS + 1;

/// Absolute cells of a placed shape.
pub type ShapeCells = ArrayVec<Point, MAX_CELLS>;

/// Immutable piece geometry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    offsets: ArrayVec<Point, MAX_OFFSETS>,
}

impl Shape {
    /// Build a shape from offsets relative to its center.
    ///
    /// Returns None if more than [`MAX_OFFSETS`] offsets are given.
    pub fn new(offsets: &[Point]) -> Option<Self> {
        let offsets = ArrayVec::try_from(offsets).ok()?;
        Some(Self { offsets })
    }

    pub fn offsets(&self) -> &[Point] {
        &self.offsets
    }

    /// Absolute cells when the center sits at `center`; the center comes first.
    pub fn calc_cells(&self, center: Point) -> ShapeCells {
        let mut cells = ShapeCells::new();
        cells.push(center);
        cells.extend(self.offsets.iter().map(|&offset| center + offset));
        cells
    }

    /// A new shape turned a quarter about its center.
    pub fn rotated(&self) -> Shape {
        Shape {
            offsets: self
                .offsets
                .iter()
                .map(|p| Point::new(-p.y, p.x))
                .collect(),
        }
    }

    /// Sorted cells at `center`, for comparing geometry regardless of offset order.
    pub fn cell_set(&self, center: Point) -> ShapeCells {
        let mut cells = self.calc_cells(center);
        cells.sort_unstable();
        cells
    }
}

/// The seven catalog geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    J,
    T,
    L,
    S,
    Z,
    O,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::O,
    ];

    /// Offsets in spawn orientation (y grows downwards).
    pub fn offsets(&self) -> [Point; 3] {
        let p = Point::new;
        match self {
            ShapeKind::I => [p(0, 1), p(0, -1), p(0, -2)],
            ShapeKind::J => [p(-1, 0), p(0, -1), p(0, -2)],
            ShapeKind::T => [p(0, -1), p(1, 0), p(0, 1)],
            ShapeKind::L => [p(1, 0), p(0, -1), p(0, -2)],
            ShapeKind::S => [p(0, -1), p(1, 0), p(1, 1)],
            ShapeKind::Z => [p(-1, 1), p(-1, 0), p(0, -1)],
            ShapeKind::O => [p(1, 0), p(0, -1), p(1, -1)],
        }
    }

    pub fn shape(&self) -> Shape {
        Shape {
            offsets: self.offsets().into_iter().collect(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::J => "J",
            ShapeKind::T => "T",
            ShapeKind::L => "L",
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
            ShapeKind::O => "O",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calc_cells_puts_center_first() {
        let shape = ShapeKind::T.shape();
        let cells = shape.calc_cells(Point::new(4, 3));
        assert_eq!(
            cells.as_slice(),
            &[
                Point::new(4, 3),
                Point::new(4, 2),
                Point::new(5, 3),
                Point::new(4, 4)
            ]
        );
    }

    #[test]
    fn rotation_maps_x_y_to_minus_y_x() {
        let shape = Shape::new(&[Point::new(1, 0), Point::new(0, 2)]).unwrap();
        let rotated = shape.rotated();
        assert_eq!(rotated.offsets(), &[Point::new(0, 1), Point::new(-2, 0)]);
        // input shape unchanged
        assert_eq!(shape.offsets(), &[Point::new(1, 0), Point::new(0, 2)]);
    }

    #[test]
    fn too_many_offsets_rejected() {
        let offsets = [Point::new(1, 0); MAX_OFFSETS + 1];
        assert!(Shape::new(&offsets).is_none());
        assert!(Shape::new(&offsets[..MAX_OFFSETS]).is_some());
    }

    #[test]
    fn catalog_pieces_have_four_cells() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.shape().calc_cells(Point::new(5, 5)).len(), 4, "{:?}", kind);
        }
    }
}
