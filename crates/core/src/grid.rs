//! Grid module - the locked cells of the playfield
//!
//! The grid is `rows x cols` cells stored in a flat row-major vector for cache locality.
//! Coordinates are `(row, col)` with row 0 at the top. Rows above the grid (negative
//! indices) are never stored: a mino there never collides and is dropped on placement.
//!
//! All simulation helpers (`with_placed`, `cleared`) return new grids so callers can
//! explore hypothetical placements without touching the original.

use crate::error::CoreError;
use crate::piece::Piece;
use crate::types::{Cell, Direction, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get cell at `(row, col)`; `None` if outside the stored grid
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at `(row, col)`; returns false if outside the stored grid
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a mino may occupy `(row, col)`.
    ///
    /// Side walls and the floor block; the area above row 0 is always free.
    pub fn is_free(&self, row: i32, col: i32) -> bool {
        if col < 0 || col as usize >= self.cols || row >= self.rows as i32 {
            return false;
        }
        if row < 0 {
            return true;
        }
        matches!(self.get(row, col), Some(Cell::Empty))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Cell::Filled(_)))
    }

    /// Every mino of the piece is on a free cell
    pub fn is_valid(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&(r, c)| self.is_free(r, c))
    }

    /// The piece could not move one row further down
    pub fn is_grounded(&self, piece: &Piece) -> bool {
        !self.is_valid(&piece.translated(1, 0))
    }

    /// Lowest valid pose straight below `piece` (the hard-drop projection)
    pub fn ghost(&self, piece: &Piece) -> Piece {
        let mut ghost = *piece;
        while ghost.row < self.rows as i32 && self.is_valid(&ghost.translated(1, 0)) {
            ghost = ghost.translated(1, 0);
        }
        ghost
    }

    /// Rotate with wall kicks; `None` if every kick test collides
    pub fn try_rotate(&self, piece: &Piece, direction: Direction) -> Option<Piece> {
        crate::pieces::try_rotate(
            piece.kind,
            piece.rotation,
            piece.row,
            piece.col,
            direction,
            |r, c| self.is_free(r, c),
        )
        .map(|(rotation, (dr, dc))| Piece {
            rotation,
            row: piece.row + dr,
            col: piece.col + dc,
            ..*piece
        })
    }

    /// Cells of one row
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        row < self.rows && self.row(row).iter().all(|cell| cell.is_filled())
    }

    pub fn count_full_rows(&self) -> usize {
        (0..self.rows).filter(|&r| self.is_row_full(r)).count()
    }

    /// Clear all full rows, shifting the rest down and refilling the top with empty rows.
    ///
    /// Two-pointer compaction from the bottom, no allocation. Returns the number cleared.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.cols;
        let mut write_row = self.rows;
        let mut cleared = 0;

        for read_row in (0..self.rows).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * width;
                    self.cells.copy_within(src..src + width, write_row * width);
                }
            }
        }

        for cell in &mut self.cells[..write_row * width] {
            *cell = Cell::Empty;
        }

        cleared
    }

    /// Copy of this grid with full rows cleared, plus the number cleared
    pub fn cleared(&self) -> (Grid, usize) {
        let mut grid = self.clone();
        let n = grid.clear_full_rows();
        (grid, n)
    }

    /// Write the piece's minos into the grid.
    ///
    /// Minos above row 0 are dropped. Writing over an occupied cell (or past a wall) is an
    /// invariant violation; the grid is left untouched in that case.
    pub fn place(&mut self, piece: &Piece) -> Result<(), CoreError> {
        let cells = piece.cells();
        for &(row, col) in &cells {
            if row < 0 {
                continue;
            }
            match self.get(row, col) {
                None => {
                    return Err(CoreError::OutOfBounds {
                        kind: piece.kind,
                        row,
                        col,
                    })
                }
                Some(Cell::Filled(_)) => {
                    return Err(CoreError::Overlap {
                        kind: piece.kind,
                        row,
                        col,
                    })
                }
                Some(Cell::Empty) => {}
            }
        }

        for &(row, col) in &cells {
            self.set(row, col, Cell::Filled(piece.kind));
        }
        Ok(())
    }

    /// Copy of this grid with the piece placed
    pub fn with_placed(&self, piece: &Piece) -> Result<Grid, CoreError> {
        let mut grid = self.clone();
        grid.place(piece)?;
        Ok(grid)
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_filled()).count()
    }

    /// Topmost filled row of a column, if any
    pub fn column_top(&self, col: usize) -> Option<usize> {
        (0..self.rows).find(|&r| self.cells[r * self.cols + col].is_filled())
    }

    /// Column height measured from the floor (0 for an empty column)
    pub fn column_height(&self, col: usize) -> usize {
        self.column_top(col).map_or(0, |top| self.rows - top)
    }

    /// Topmost row holding any filled cell
    pub fn stack_top(&self) -> Option<usize> {
        (0..self.rows).find(|&r| self.row(r).iter().any(|c| c.is_filled()))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a grid from text rows: `.` is empty, a kind letter is filled, any other
    /// character is filled with `I`.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let cols = rows.first().map_or(0, |r| r.chars().count());
        let mut grid = Grid::new(rows.len(), cols);
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate().take(cols) {
                if ch != '.' {
                    let kind = PieceKind::from_str(&ch.to_string()).unwrap_or(PieceKind::I);
                    grid.set(r as i32, c as i32, Cell::Filled(kind));
                }
            }
        }
        grid
    }

    /// Text rows in the `from_ascii` format
    pub fn to_ascii(&self) -> Vec<String> {
        (0..self.rows)
            .map(|r| {
                self.row(r)
                    .iter()
                    .map(|cell| match cell {
                        Cell::Empty => '.',
                        Cell::Filled(kind) => kind.as_str().chars().next().unwrap_or('#'),
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    #[test]
    fn index_calculation() {
        let grid = Grid::new(20, 10);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(0, 9), Some(9));
        assert_eq!(grid.index(1, 0), Some(10));
        assert_eq!(grid.index(19, 9), Some(199));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(0, 10), None);
        assert_eq!(grid.index(20, 0), None);
    }

    #[test]
    fn above_top_is_free_but_walls_are_not() {
        let grid = Grid::new(20, 10);
        assert!(grid.is_free(-3, 0));
        assert!(!grid.is_free(-3, -1));
        assert!(!grid.is_free(-3, 10));
        assert!(!grid.is_free(20, 4));
    }

    #[test]
    fn place_rejects_overlap_without_partial_write() {
        let mut grid = Grid::new(20, 10);
        grid.set(19, 5, Cell::Filled(PieceKind::O));
        let piece = Piece::new(PieceKind::I, 18, 3, Rotation::Spawn);

        let err = grid.place(&piece).unwrap_err();
        assert_eq!(
            err,
            CoreError::Overlap {
                kind: PieceKind::I,
                row: 19,
                col: 5
            }
        );
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn place_drops_minos_above_the_top() {
        let mut grid = Grid::new(20, 10);
        let piece = Piece::new(PieceKind::I, -2, 0, Rotation::Clockwise);
        grid.place(&piece).unwrap();
        // Column 2, rows -2..=1: only rows 0 and 1 are stored.
        assert_eq!(grid.filled_count(), 2);
        assert!(grid.is_occupied(0, 2));
        assert!(grid.is_occupied(1, 2));
    }

    #[test]
    fn ghost_lands_on_floor() {
        let grid = Grid::new(20, 10);
        let ghost = grid.ghost(&Piece::spawn(PieceKind::I));
        assert_eq!(ghost.row, 18);
        assert_eq!(ghost.bottom_row(), 19);
        assert!(grid.is_grounded(&ghost));
    }

    #[test]
    fn clear_full_rows_compacts() {
        let mut grid = Grid::from_ascii(&[
            "....", //
            "I...", //
            "IIII", //
            ".I..", //
            "IIII",
        ]);
        assert_eq!(grid.clear_full_rows(), 2);
        assert_eq!(
            grid.to_ascii(),
            vec!["....", "....", "....", "I...", ".I.."]
        );
    }

    #[test]
    fn with_placed_leaves_original_alone() {
        let grid = Grid::new(6, 4);
        let placed = grid
            .with_placed(&Piece::new(PieceKind::O, 4, 0, Rotation::Spawn))
            .unwrap();
        assert_eq!(grid.filled_count(), 0);
        assert_eq!(placed.filled_count(), 4);
    }

    #[test]
    fn column_heights() {
        let grid = Grid::from_ascii(&[
            "....", //
            ".T..", //
            ".T.I", //
            "TT.I",
        ]);
        assert_eq!(grid.column_height(0), 1);
        assert_eq!(grid.column_height(1), 3);
        assert_eq!(grid.column_height(2), 0);
        assert_eq!(grid.column_height(3), 2);
        assert_eq!(grid.stack_top(), Some(1));
    }
}
