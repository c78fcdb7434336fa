//! Shape module - one orientation of a piece
//!
//! A shape is a small bounding-box matrix of color codes (0 = empty) stored as
//! a flat row-major buffer. Shapes are plain values: rotating produces a new
//! shape, so nothing ever aliases the rows of another matrix.

use crate::error::ShapeError;
use crate::types::{PieceKind, RotationDirection, GHOST_CODE};

/// A validated piece matrix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: PieceKind,
    width: usize,
    height: usize,
    /// Flat array of codes, row-major order (y * width + x)
    cells: Vec<u8>,
}

impl Shape {
    /// Build a shape from rows of codes.
    ///
    /// Fails fast on malformed data: no rows, ragged rows, no filled cell, or
    /// a cell using the reserved ghost code.
    pub fn from_rows<R: AsRef<[u8]>>(kind: PieceKind, rows: &[R]) -> Result<Self, ShapeError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(ShapeError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ShapeError::Ragged {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &code) in row.iter().enumerate() {
                if code == GHOST_CODE {
                    return Err(ShapeError::ReservedCode { x, y, code });
                }
            }
            cells.extend_from_slice(row);
        }

        if cells.iter().all(|&c| c == 0) {
            return Err(ShapeError::NoFilledCells);
        }

        Ok(Self {
            kind,
            width,
            height,
            cells,
        })
    }

    /// Build from a flat row-major buffer known to be well formed.
    pub(crate) fn from_flat(kind: PieceKind, width: usize, cells: &[u8]) -> Self {
        debug_assert!(width > 0 && cells.len() % width == 0);
        Self {
            kind,
            width,
            height: cells.len() / width,
            cells: cells.to_vec(),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Code at (x, y), 0 outside the bounding box
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.cells[y * self.width + x]
    }

    /// Iterate over filled cells as `(x, y, code)` relative to the shape origin
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &code)| code != 0)
            .map(move |(i, &code)| ((i % width) as i32, (i / width) as i32, code))
    }

    /// Iterate over rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width)
    }

    /// Copy out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    /// Leftmost and rightmost columns holding a filled cell
    pub fn filled_columns(&self) -> (usize, usize) {
        let mut min = self.width;
        let mut max = 0;
        for (x, _, _) in self.filled_cells() {
            min = min.min(x as usize);
            max = max.max(x as usize);
        }
        (min, max)
    }

    /// Return this shape turned a quarter turn.
    ///
    /// The matrix is transposed, then each row is reversed (clockwise) or the
    /// row order is reversed (counter-clockwise). Width and height swap.
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        let (w, h) = (self.width, self.height);
        let mut cells = vec![0u8; w * h];

        // Result is h columns wide and w rows tall.
        for r in 0..w {
            for c in 0..h {
                let src = match direction {
                    RotationDirection::Clockwise => (h - 1 - c) * w + r,
                    RotationDirection::CounterClockwise => c * w + (w - 1 - r),
                };
                cells[r * h + c] = self.cells[src];
            }
        }

        Self {
            kind: self.kind,
            width: h,
            height: w,
            cells,
        }
    }

    /// Rotate in place
    pub fn rotate(&mut self, direction: RotationDirection) {
        *self = self.rotated(direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t_shape() -> Shape {
        Shape::from_rows(PieceKind::T, &[[0u8, 0, 0], [1, 1, 1], [0, 1, 0]]).unwrap()
    }

    #[test]
    fn test_from_rows_rejects_malformed() {
        let empty: [[u8; 0]; 0] = [];
        assert_eq!(
            Shape::from_rows(PieceKind::T, &empty),
            Err(ShapeError::Empty)
        );

        let ragged: Vec<Vec<u8>> = vec![vec![1, 1], vec![1]];
        assert_eq!(
            Shape::from_rows(PieceKind::T, &ragged),
            Err(ShapeError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );

        assert_eq!(
            Shape::from_rows(PieceKind::O, &[[0u8, 0], [0, 0]]),
            Err(ShapeError::NoFilledCells)
        );

        assert_eq!(
            Shape::from_rows(PieceKind::O, &[[2u8, 8], [2, 2]]),
            Err(ShapeError::ReservedCode { x: 1, y: 0, code: 8 })
        );
    }

    #[test]
    fn test_clockwise_rotation() {
        let rotated = t_shape().rotated(RotationDirection::Clockwise);
        assert_eq!(
            rotated.to_rows(),
            vec![vec![0, 1, 0], vec![1, 1, 0], vec![0, 1, 0]]
        );
    }

    #[test]
    fn test_counter_clockwise_rotation() {
        let rotated = t_shape().rotated(RotationDirection::CounterClockwise);
        assert_eq!(
            rotated.to_rows(),
            vec![vec![0, 1, 0], vec![0, 1, 1], vec![0, 1, 0]]
        );
    }

    #[test]
    fn test_rectangular_rotation_swaps_dimensions() {
        let bar = Shape::from_rows(PieceKind::I, &[[5u8, 5, 5, 5]]).unwrap();
        let upright = bar.rotated(RotationDirection::Clockwise);
        assert_eq!(upright.width(), 1);
        assert_eq!(upright.height(), 4);
        assert_eq!(upright.filled_cells().count(), 4);

        let back = upright.rotated(RotationDirection::CounterClockwise);
        assert_eq!(back, bar);
    }

    #[test]
    fn test_four_turns_restore_matrix() {
        let original = Shape::from_rows(PieceKind::L, &[[0u8, 3, 0], [0, 3, 0], [0, 3, 3]]).unwrap();
        for direction in [
            RotationDirection::Clockwise,
            RotationDirection::CounterClockwise,
        ] {
            let mut shape = original.clone();
            for _ in 0..4 {
                shape.rotate(direction);
            }
            assert_eq!(shape, original);
        }
    }

    #[test]
    fn test_filled_cells_and_columns() {
        let shape = t_shape();
        let cells: Vec<_> = shape.filled_cells().collect();
        assert_eq!(cells, vec![(0, 1, 1), (1, 1, 1), (2, 1, 1), (1, 2, 1)]);
        assert_eq!(shape.filled_columns(), (0, 2));
        assert_eq!(shape.get(1, 2), 1);
        assert_eq!(shape.get(5, 5), 0);
    }
}
