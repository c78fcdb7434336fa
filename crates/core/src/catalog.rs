//! Catalog of the seven classic pieces in spawn orientation.
//!
//! Each piece is stamped with its kind's color code. Bounding boxes are the
//! classic 2x2 / 3x3 / 4x4 squares, so every rotation stays square.

use crate::shape::Shape;
use crate::types::PieceKind;

#[rustfmt::skip]
const T: [u8; 9] = [
    0, 0, 0,
    1, 1, 1,
    0, 1, 0,
];

#[rustfmt::skip]
const O: [u8; 4] = [
    2, 2,
    2, 2,
];

#[rustfmt::skip]
const L: [u8; 9] = [
    0, 3, 0,
    0, 3, 0,
    0, 3, 3,
];

#[rustfmt::skip]
const J: [u8; 9] = [
    0, 4, 0,
    0, 4, 0,
    4, 4, 0,
];

#[rustfmt::skip]
const I: [u8; 16] = [
    0, 5, 0, 0,
    0, 5, 0, 0,
    0, 5, 0, 0,
    0, 5, 0, 0,
];

#[rustfmt::skip]
const S: [u8; 9] = [
    0, 6, 6,
    6, 6, 0,
    0, 0, 0,
];

#[rustfmt::skip]
const Z: [u8; 9] = [
    7, 7, 0,
    0, 7, 7,
    0, 0, 0,
];

/// Spawn-orientation shape for a piece kind
pub fn standard_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::T => Shape::from_flat(kind, 3, &T),
        PieceKind::O => Shape::from_flat(kind, 2, &O),
        PieceKind::L => Shape::from_flat(kind, 3, &L),
        PieceKind::J => Shape::from_flat(kind, 3, &J),
        PieceKind::I => Shape::from_flat(kind, 4, &I),
        PieceKind::S => Shape::from_flat(kind, 3, &S),
        PieceKind::Z => Shape::from_flat(kind, 3, &Z),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shapes_are_valid() {
        for kind in PieceKind::ALL {
            let shape = standard_shape(kind);
            // Re-validate through the public constructor.
            let rebuilt = Shape::from_rows(kind, &shape.to_rows()).unwrap();
            assert_eq!(rebuilt, shape);

            assert_eq!(shape.width(), shape.height(), "{:?} is not square", kind);
            assert_eq!(shape.filled_cells().count(), 4, "{:?}", kind);
            assert!(shape.filled_cells().all(|(_, _, code)| code == kind.color()));
        }
    }

    #[test]
    fn test_i_piece_is_vertical_bar() {
        let shape = standard_shape(PieceKind::I);
        assert_eq!(shape.width(), 4);
        assert_eq!(shape.filled_columns(), (1, 1));
    }
}
