//! Grid module - manages the playfield
//!
//! The grid is a `width x height` matrix of tagged cells stored as one flat,
//! row-major buffer (`y * width + x`). Row 0 is the spawn row at the top and
//! is never cleared. The grid also owns the line, level and score counters,
//! since they only ever change as a consequence of clearing rows.

use crate::error::GridError;
use crate::scoring::{level_for_lines, line_clear_points, ScoreUpdate};
use crate::shape::Shape;
use crate::types::{Cell, Position, LINES_PER_LEVEL};

/// The playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
    lines_per_level: u32,
    line_total: u32,
    level: u32,
    score: u32,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            lines_per_level: LINES_PER_LEVEL,
            line_total: 0,
            level: 0,
            score: 0,
        }
    }

    /// Use a different number of lines per level
    pub fn with_lines_per_level(mut self, lines_per_level: u32) -> Self {
        self.lines_per_level = lines_per_level;
        self.level = level_for_lines(self.line_total, lines_per_level);
        self
    }

    /// Reset counters and empty every cell
    pub fn initialize(&mut self) {
        self.line_total = 0;
        self.level = 0;
        self.score = 0;
        self.cells.clear();
        self.cells.resize(self.width * self.height, Cell::Empty);
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Out of bounds or holding a settled block
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map_or(true, |cell| cell.is_blocking())
    }

    /// Check if a row is completely filled with settled blocks
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        let start = y * self.width;
        self.cells[start..start + self.width]
            .iter()
            .all(|cell| cell.is_blocking())
    }

    /// Whether `shape` placed at `position` would overlap a wall, the floor,
    /// the ceiling or a settled block. Ghost cells never collide.
    pub fn check_collision(&self, shape: &Shape, position: Position) -> bool {
        shape
            .filled_cells()
            .any(|(dx, dy, _)| self.is_blocked(position.x + dx, position.y + dy))
    }

    fn check_bounds(&self, shape: &Shape, position: Position) -> Result<(), GridError> {
        for (dx, dy, _) in shape.filled_cells() {
            let (x, y) = (position.x + dx, position.y + dy);
            if self.index(x, y).is_none() {
                return Err(GridError::OutOfBounds {
                    x,
                    y,
                    width: self.width,
                    height: self.height,
                });
            }
        }
        Ok(())
    }

    /// Write every filled shape cell into the grid, overwriting whatever is
    /// there. Nothing is written if any cell falls outside the grid.
    pub fn merge_position(&mut self, shape: &Shape, position: Position) -> Result<(), GridError> {
        self.check_bounds(shape, position)?;
        for (dx, dy, code) in shape.filled_cells() {
            self.set(position.x + dx, position.y + dy, Cell::Filled(code));
        }
        Ok(())
    }

    /// Remove every ghost cell
    pub fn clear_ghosts(&mut self) {
        for cell in &mut self.cells {
            if *cell == Cell::Ghost {
                *cell = Cell::Empty;
            }
        }
    }

    /// Replace the current ghost stamp with `shape` at `position`.
    ///
    /// Settled blocks are never overwritten by ghost cells.
    pub fn merge_ghost_position(
        &mut self,
        shape: &Shape,
        position: Position,
    ) -> Result<(), GridError> {
        self.check_bounds(shape, position)?;
        self.clear_ghosts();
        for (dx, dy, _) in shape.filled_cells() {
            if let Some(idx) = self.index(position.x + dx, position.y + dy) {
                if self.cells[idx] == Cell::Empty {
                    self.cells[idx] = Cell::Ghost;
                }
            }
        }
        Ok(())
    }

    /// Remove full rows and return how many were removed.
    ///
    /// Rows are scanned bottom to top, the spawn row excluded. Each removed
    /// row lets everything above it fall by one and an empty row appears at
    /// the top; the same index is then examined again.
    pub fn clear_lines(&mut self) -> u32 {
        let width = self.width;
        // Every row of a zero-width grid counts as full.
        if width == 0 {
            return 0;
        }

        let mut cleared = 0;
        let mut y = self.height.saturating_sub(1);

        while y > 0 {
            if self.is_row_full(y) {
                // copy_within handles the overlapping ranges
                self.cells.copy_within(0..y * width, width);
                self.cells[..width].fill(Cell::Empty);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Feed a clear into the counters
    pub fn update_score(&mut self, lines: u32) -> ScoreUpdate {
        self.line_total = self.line_total.saturating_add(lines);
        self.level = level_for_lines(self.line_total, self.lines_per_level);
        let gained = line_clear_points(lines, self.level);
        self.score = self.score.saturating_add(gained);

        ScoreUpdate {
            score: self.score,
            line_total: self.line_total,
            level: self.level,
            gained,
        }
    }

    /// Current counters without changing them
    pub fn score_update(&self) -> ScoreUpdate {
        ScoreUpdate {
            score: self.score,
            line_total: self.line_total,
            level: self.level,
            gained: 0,
        }
    }

    pub fn line_total(&self) -> u32 {
        self.line_total
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Renderer-facing codes, row-major
    pub fn codes(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().map(Cell::code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn o_shape() -> Shape {
        Shape::from_rows(PieceKind::O, &[[2u8, 2], [2, 2]]).unwrap()
    }

    fn fill_row(grid: &mut Grid, y: i32) {
        for x in 0..grid.width() as i32 {
            grid.set(x, y, Cell::Filled(1));
        }
    }

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(12, 20);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(11, 0), Some(11));
        assert_eq!(grid.index(0, 1), Some(12));
        assert_eq!(grid.index(11, 19), Some(239));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(12, 0), None);
        assert_eq!(grid.index(0, 20), None);
    }

    #[test]
    fn test_initialize_resets_everything() {
        let mut grid = Grid::new(12, 20);
        fill_row(&mut grid, 19);
        grid.clear_lines();
        grid.update_score(1);
        grid.set(3, 3, Cell::Filled(4));

        grid.initialize();
        assert!(grid.cells().iter().all(|c| *c == Cell::Empty));
        assert_eq!(grid.cells().len(), 12 * 20);
        assert_eq!((grid.score(), grid.level(), grid.line_total()), (0, 0, 0));
    }

    #[test]
    fn test_collision_with_walls_floor_and_blocks() {
        let mut grid = Grid::new(12, 20);
        let shape = o_shape();

        assert!(!grid.check_collision(&shape, Position::new(0, 0)));
        assert!(!grid.check_collision(&shape, Position::new(10, 18)));
        assert!(grid.check_collision(&shape, Position::new(-1, 0)));
        assert!(grid.check_collision(&shape, Position::new(11, 0)));
        assert!(grid.check_collision(&shape, Position::new(0, 19)));
        assert!(grid.check_collision(&shape, Position::new(0, -1)));

        grid.set(5, 10, Cell::Filled(3));
        assert!(grid.check_collision(&shape, Position::new(4, 9)));
        assert!(!grid.check_collision(&shape, Position::new(6, 9)));
    }

    #[test]
    fn test_ghost_cells_do_not_collide() {
        let mut grid = Grid::new(12, 20);
        grid.set(5, 10, Cell::Ghost);
        assert!(!grid.check_collision(&o_shape(), Position::new(4, 9)));
    }

    #[test]
    fn test_empty_shape_cells_ignore_walls() {
        let grid = Grid::new(12, 20);
        // Column 0 of this shape is empty, so it may hang over the left wall.
        let bar = Shape::from_rows(PieceKind::I, &[[0u8, 5], [0, 5]]).unwrap();
        assert!(!grid.check_collision(&bar, Position::new(-1, 0)));
        assert!(grid.check_collision(&bar, Position::new(-2, 0)));
    }

    #[test]
    fn test_merge_position_writes_colors() {
        let mut grid = Grid::new(12, 20);
        grid.set(4, 6, Cell::Ghost);
        grid.merge_position(&o_shape(), Position::new(3, 5)).unwrap();

        for (x, y) in [(3, 5), (4, 5), (3, 6), (4, 6)] {
            assert_eq!(grid.get(x, y), Some(Cell::Filled(2)));
        }
        assert_eq!(grid.cells().iter().filter(|c| c.is_blocking()).count(), 4);
    }

    #[test]
    fn test_merge_position_out_of_bounds_is_rejected() {
        let mut grid = Grid::new(12, 20);
        let result = grid.merge_position(&o_shape(), Position::new(11, 0));
        assert_eq!(
            result,
            Err(GridError::OutOfBounds {
                x: 12,
                y: 0,
                width: 12,
                height: 20
            })
        );
        assert!(grid.cells().iter().all(|c| *c == Cell::Empty));
    }

    #[test]
    fn test_merge_ghost_replaces_previous_stamp() {
        let mut grid = Grid::new(12, 20);
        grid.merge_ghost_position(&o_shape(), Position::new(0, 18)).unwrap();
        assert_eq!(grid.get(0, 18), Some(Cell::Ghost));

        grid.set(6, 19, Cell::Filled(1));
        grid.merge_ghost_position(&o_shape(), Position::new(5, 18)).unwrap();

        assert_eq!(grid.get(0, 18), Some(Cell::Empty));
        assert_eq!(grid.get(5, 18), Some(Cell::Ghost));
        assert_eq!(grid.get(6, 19), Some(Cell::Filled(1)));
        assert_eq!(grid.cells().iter().filter(|c| **c == Cell::Ghost).count(), 3);
    }

    #[test]
    fn test_ghost_row_is_not_full() {
        let mut grid = Grid::new(4, 4);
        for x in 0..3 {
            grid.set(x, 3, Cell::Filled(1));
        }
        grid.set(3, 3, Cell::Ghost);
        assert!(!grid.is_row_full(3));
        assert_eq!(grid.clear_lines(), 0);
    }

    #[test]
    fn test_clear_two_full_rows_below_partial() {
        let mut grid = Grid::new(12, 20);
        fill_row(&mut grid, 19);
        fill_row(&mut grid, 18);
        grid.set(0, 17, Cell::Filled(6));
        grid.set(5, 17, Cell::Filled(7));

        assert_eq!(grid.clear_lines(), 2);

        // Partial row fell two rows, contents intact.
        assert_eq!(grid.get(0, 19), Some(Cell::Filled(6)));
        assert_eq!(grid.get(5, 19), Some(Cell::Filled(7)));
        let settled = (0..12)
            .filter(|&x| grid.get(x, 19).is_some_and(|c| c.is_blocking()))
            .count();
        assert_eq!(settled, 2);
        for y in 0..19 {
            assert!((0..12).all(|x| grid.get(x, y) == Some(Cell::Empty)));
        }
        assert_eq!(grid.cells().len(), 12 * 20);
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut grid = Grid::new(4, 6);
        fill_row(&mut grid, 5);
        grid.set(1, 4, Cell::Filled(3));
        fill_row(&mut grid, 3);
        grid.set(2, 2, Cell::Filled(4));

        assert_eq!(grid.clear_lines(), 2);
        assert_eq!(grid.get(1, 5), Some(Cell::Filled(3)));
        assert_eq!(grid.get(2, 4), Some(Cell::Filled(4)));
        assert_eq!(grid.cells().iter().filter(|c| c.is_blocking()).count(), 2);
    }

    #[test]
    fn test_spawn_row_is_never_cleared() {
        let mut grid = Grid::new(4, 4);
        fill_row(&mut grid, 0);
        assert_eq!(grid.clear_lines(), 0);
        assert!(grid.is_row_full(0));

        // A clear below shifts the spawn row into the scanned range, where it
        // is cleared as well.
        fill_row(&mut grid, 3);
        assert_eq!(grid.clear_lines(), 2);
        assert!(grid.cells().iter().all(|c| *c == Cell::Empty));
    }

    #[test]
    fn test_update_score_table() {
        let expected = [(1, 40), (2, 100), (3, 300), (4, 1200)];
        for (lines, points) in expected {
            let mut grid = Grid::new(12, 20);
            let update = grid.update_score(lines);
            assert_eq!(update.gained, points);
            assert_eq!(update.score, points);
            assert_eq!(update.line_total, lines);
            assert_eq!(update.level, 0);
        }
    }

    #[test]
    fn test_level_uses_updated_line_total() {
        let mut grid = Grid::new(12, 20);
        grid.update_score(4);
        grid.update_score(4);
        assert_eq!(grid.level(), 0);

        // 8 -> 9 lines stays at level 0
        let update = grid.update_score(1);
        assert_eq!(update.level, 0);

        // 9 -> 10 lines reaches level 1, and the single is scored at level 1
        let update = grid.update_score(1);
        assert_eq!(update.level, 1);
        assert_eq!(update.gained, 2 * 40);

        grid.update_score(4);
        grid.update_score(4);
        grid.update_score(4);
        grid.update_score(3);
        assert_eq!(grid.line_total(), 25);
        assert_eq!(grid.level(), 2);
    }

    #[test]
    fn test_update_score_zero_lines_is_noop() {
        let mut grid = Grid::new(12, 20);
        let update = grid.update_score(0);
        assert_eq!(update, ScoreUpdate::default());
    }

    #[test]
    fn test_custom_lines_per_level() {
        let mut grid = Grid::new(12, 20).with_lines_per_level(2);
        grid.update_score(2);
        assert_eq!(grid.level(), 1);
    }

    #[test]
    fn test_codes_view() {
        let mut grid = Grid::new(3, 2);
        grid.set(0, 1, Cell::Filled(5));
        grid.set(2, 1, Cell::Ghost);
        assert_eq!(grid.codes().collect::<Vec<_>>(), vec![0, 0, 0, 5, 0, 8]);
    }

    #[test]
    fn test_zero_width_clears_nothing() {
        let mut grid = Grid::new(0, 4);
        assert_eq!(grid.clear_lines(), 0);
        assert_eq!(grid.line_total(), 0);
    }
}
