//! Board module - manages the game grid.
//!
//! The board is a 20x10 grid where each cell is empty or filled with a piece
//! kind, stored as a flat array for cache locality. Coordinates are
//! (row, col): row 0 is the top, row 19 the bottom. Rows above row 0 carry no
//! state; a piece may extend above the visible board and those cells never
//! count as occupied.

use arrayvec::ArrayVec;

use crate::core::piece::Shape;
use crate::types::{Cell, PieceKind, BOARD_COLS, BOARD_ROWS};

/// Total number of cells on the board.
const BOARD_SIZE: usize = (BOARD_ROWS as usize) * (BOARD_COLS as usize);

/// The game board - 20 rows x 10 columns using flat array storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * COLS + col).
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (row, col).
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_ROWS as i8 || col < 0 || col >= BOARD_COLS as i8 {
            return None;
        }
        Some((row as usize) * (BOARD_COLS as usize) + (col as usize))
    }

    pub fn rows(&self) -> u8 {
        BOARD_ROWS
    }

    pub fn cols(&self) -> u8 {
        BOARD_COLS
    }

    /// Get cell at (row, col). Returns None if out of bounds.
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if (row, col) holds a locked block.
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Collision test for a shape with its origin at (row, col).
    ///
    /// An occupied shape cell collides when it maps outside the horizontal
    /// bounds, at or below the bottom boundary, or onto an occupied grid
    /// cell. Cells mapped above row 0 never collide: the board stores nothing
    /// up there, which is what lets pieces spawn partially off-screen.
    pub fn collides(&self, shape: &Shape, row: i8, col: i8) -> bool {
        for (dr, dc) in shape.offsets() {
            let r = row + dr;
            let c = col + dc;
            if c < 0 || c >= BOARD_COLS as i8 || r >= BOARD_ROWS as i8 {
                return true;
            }
            if r >= 0 && self.is_occupied(r, c) {
                return true;
            }
        }
        false
    }

    /// Stamp a shape's occupied cells into the grid, clipped to the board.
    ///
    /// Cells above row 0 (or otherwise out of bounds) are silently skipped.
    pub fn stamp(&mut self, shape: &Shape, row: i8, col: i8, kind: PieceKind) {
        for (dr, dc) in shape.offsets() {
            self.set(row + dr, col + dc, Some(kind));
        }
    }

    /// Check if a row is completely filled.
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_ROWS as usize {
            return false;
        }
        let start = row * BOARD_COLS as usize;
        let end = start + BOARD_COLS as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Clear all full rows and return their indices (bottom to top).
    ///
    /// Scans from the bottom; when a full row is found, every row above it
    /// shifts down by one, row 0 is emptied, and the same index is examined
    /// again since the shifted-down row may itself be full.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, { BOARD_ROWS as usize }> {
        let mut cleared = ArrayVec::new();
        let width = BOARD_COLS as usize;

        let mut r = BOARD_ROWS as usize;
        while r > 0 {
            let row = r - 1;
            if self.is_row_full(row) {
                cleared.push(row);
                // Shift rows [0, row) down by one.
                for dst in (1..=row).rev() {
                    let src_start = (dst - 1) * width;
                    let dst_start = dst * width;
                    self.cells.copy_within(src_start..src_start + width, dst_start);
                }
                for cell in &mut self.cells[..width] {
                    *cell = None;
                }
                // Re-examine the same index.
            } else {
                r -= 1;
            }
        }

        cleared
    }

    /// Clear the entire board.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Export as row vectors (snapshot form).
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        let width = BOARD_COLS as usize;
        (0..BOARD_ROWS as usize)
            .map(|row| {
                let start = row * width;
                self.cells[start..start + width].to_vec()
            })
            .collect()
    }

    /// Rebuild from row vectors; None if dimensions are wrong.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Option<Self> {
        if rows.len() != BOARD_ROWS as usize {
            return None;
        }
        let mut cells = [None; BOARD_SIZE];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != BOARD_COLS as usize {
                return None;
            }
            for (c, cell) in row.iter().enumerate() {
                cells[r * BOARD_COLS as usize + c] = *cell;
            }
        }
        Some(Self { cells })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::Piece;

    fn o_shape() -> Shape {
        *Piece::of_kind(PieceKind::O).shape()
    }

    #[test]
    fn test_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(0, 9), Some(9));
        assert_eq!(Board::index(1, 0), Some(10));
        assert_eq!(Board::index(19, 9), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(0, 10), None);
        assert_eq!(Board::index(20, 0), None);
    }

    #[test]
    fn test_collides_boundary_asymmetry() {
        let board = Board::new();
        let shape = o_shape();

        // Fully above the top: never a collision.
        assert!(!board.collides(&shape, -2, 4));
        // Straddling the top edge on an empty board: fine.
        assert!(!board.collides(&shape, -1, 4));
        // Horizontal out-of-bounds always collides, even above the top.
        assert!(board.collides(&shape, -2, -1));
        assert!(board.collides(&shape, -2, 9));
        // At or below the bottom boundary collides.
        assert!(board.collides(&shape, 19, 4));
        assert!(!board.collides(&shape, 18, 4));
    }

    #[test]
    fn test_collides_with_occupied_cells() {
        let mut board = Board::new();
        board.set(10, 5, Some(PieceKind::T));

        let shape = o_shape();
        assert!(board.collides(&shape, 10, 5));
        assert!(board.collides(&shape, 9, 4)); // bottom-right cell hits (10,5)
        assert!(!board.collides(&shape, 8, 4));
    }

    #[test]
    fn test_stamp_clips_above_top() {
        let mut board = Board::new();
        let shape = o_shape();

        // Origin at row -1: only the lower shape row lands on the board.
        board.stamp(&shape, -1, 4, PieceKind::O);
        assert!(board.is_occupied(0, 4));
        assert!(board.is_occupied(0, 5));
        assert!(!board.is_occupied(1, 4));
    }

    #[test]
    fn test_clear_single_full_row() {
        let mut board = Board::new();
        for c in 0..BOARD_COLS as i8 {
            board.set(19, c, Some(PieceKind::I));
        }
        board.set(18, 3, Some(PieceKind::T));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19]);
        // Row 18 contents shifted down into row 19.
        assert!(board.is_occupied(19, 3));
        assert!(!board.is_occupied(18, 3));
        for c in 0..BOARD_COLS as i8 {
            assert!(!board.is_occupied(0, c));
        }
    }

    #[test]
    fn test_clear_rechecks_shifted_row() {
        let mut board = Board::new();
        // Two adjacent full rows: clearing 19 drops 18's copy into 19, which
        // must be detected again at the same index.
        for row in [18i8, 19] {
            for c in 0..BOARD_COLS as i8 {
                board.set(row, c, Some(PieceKind::S));
            }
        }
        board.set(17, 0, Some(PieceKind::Z));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.len(), 2);
        // The lone block two rows up fell by two.
        assert!(board.is_occupied(19, 0));
        assert!(!board.is_occupied(17, 0));
        assert!(!board.is_occupied(18, 0));
    }

    #[test]
    fn test_clear_preserves_columns_above() {
        let mut board = Board::new();
        for c in 0..BOARD_COLS as i8 {
            board.set(15, c, Some(PieceKind::L));
        }
        board.set(10, 2, Some(PieceKind::J));
        board.set(12, 7, Some(PieceKind::O));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[15]);
        assert_eq!(board.get(11, 2), Some(Some(PieceKind::J)));
        assert_eq!(board.get(13, 7), Some(Some(PieceKind::O)));
        assert!(!board.is_occupied(10, 2));
        assert!(!board.is_occupied(12, 7));
    }

    #[test]
    fn test_rows_roundtrip() {
        let mut board = Board::new();
        board.set(5, 3, Some(PieceKind::O));
        board.set(10, 7, Some(PieceKind::L));

        let rows = board.to_rows();
        assert_eq!(Board::from_rows(&rows), Some(board));
        assert!(Board::from_rows(&rows[1..]).is_none());
    }
}
