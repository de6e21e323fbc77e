//! Shape catalog tests

use tui_blockfall::core::{Shape, ShapeKind};
use tui_blockfall::types::Point;

#[test]
fn test_four_rotations_restore_every_catalog_shape() {
    let center = Point::new(4, 10);
    for kind in ShapeKind::ALL {
        let shape = kind.shape();
        let turned = shape.rotated().rotated().rotated().rotated();
        assert_eq!(turned.cell_set(center), shape.cell_set(center), "{}", kind.as_str());
        assert_eq!(turned, shape, "{}", kind.as_str());
    }
}

#[test]
fn test_catalog_shapes_have_four_distinct_cells() {
    let center = Point::new(4, 10);
    for kind in ShapeKind::ALL {
        let cells = kind.shape().cell_set(center);
        assert_eq!(cells.len(), 4, "{}", kind.as_str());
        assert!(cells.windows(2).all(|w| w[0] != w[1]), "{}", kind.as_str());
        assert!(cells.contains(&center), "{}", kind.as_str());
    }
}

#[test]
fn test_calc_cells_starts_with_center() {
    let shape = Shape::new(&[Point::new(1, 0), Point::new(0, 1)]).unwrap();
    let cells = shape.calc_cells(Point::new(3, 3));
    assert_eq!(
        cells.as_slice(),
        &[Point::new(3, 3), Point::new(4, 3), Point::new(3, 4)]
    );
}

#[test]
fn test_rotation_is_quarter_turn() {
    let shape = Shape::new(&[Point::new(0, -1)]).unwrap();
    assert_eq!(shape.rotated().offsets(), &[Point::new(1, 0)]);
    assert_eq!(shape.rotated().rotated().offsets(), &[Point::new(0, 1)]);
}

#[test]
fn test_shape_rejects_too_many_offsets() {
    let offsets = [Point::new(1, 0); 5];
    assert!(Shape::new(&offsets).is_none());
}
