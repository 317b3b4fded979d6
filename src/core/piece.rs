//! Piece module - tetromino shapes and the 90-degree rotation transform.
//!
//! Shapes are rectangular binary matrices (1 = occupied cell) fixed at
//! creation from one of seven canonical definitions. Rotation produces a new
//! matrix; a piece is never mutated in place.

use crate::core::rng::SimpleRng;
use crate::types::PieceKind;

/// Maximum extent of a shape matrix in either dimension.
pub const SHAPE_MAX: usize = 4;

/// Rectangular binary shape matrix, at most 4x4.
///
/// Stored in a fixed buffer with explicit dimensions so rotating (which swaps
/// rows and cols) needs no allocation, and `Copy` makes every duplicate an
/// independent matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    cells: [[u8; SHAPE_MAX]; SHAPE_MAX],
    rows: u8,
    cols: u8,
}

impl Shape {
    fn from_rows<const R: usize, const C: usize>(m: [[u8; C]; R]) -> Self {
        let mut cells = [[0u8; SHAPE_MAX]; SHAPE_MAX];
        for (i, row) in m.iter().enumerate() {
            cells[i][..C].copy_from_slice(row);
        }
        Self {
            cells,
            rows: R as u8,
            cols: C as u8,
        }
    }

    /// Rebuild a shape from a dynamic matrix (snapshot restore path).
    ///
    /// Returns None unless the matrix is rectangular, within 4x4, contains
    /// only 0/1 entries, and has at least one occupied cell.
    pub fn from_matrix(m: &[Vec<u8>]) -> Option<Self> {
        if m.is_empty() || m.len() > SHAPE_MAX {
            return None;
        }
        let cols = m[0].len();
        if cols == 0 || cols > SHAPE_MAX {
            return None;
        }
        let mut cells = [[0u8; SHAPE_MAX]; SHAPE_MAX];
        let mut any_filled = false;
        for (i, row) in m.iter().enumerate() {
            if row.len() != cols {
                return None;
            }
            for (j, &v) in row.iter().enumerate() {
                if v > 1 {
                    return None;
                }
                cells[i][j] = v;
                any_filled |= v == 1;
            }
        }
        if !any_filled {
            return None;
        }
        Some(Self {
            cells,
            rows: m.len() as u8,
            cols: cols as u8,
        })
    }

    /// Export the matrix at its logical dimensions.
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        (0..self.rows as usize)
            .map(|i| self.cells[i][..self.cols as usize].to_vec())
            .collect()
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn filled(&self, i: usize, j: usize) -> bool {
        i < self.rows as usize && j < self.cols as usize && self.cells[i][j] == 1
    }

    /// Iterate (row, col) offsets of occupied cells.
    pub fn offsets(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows as usize).flat_map(move |i| {
            (0..self.cols as usize)
                .filter(move |&j| self.cells[i][j] == 1)
                .map(move |j| (i as i8, j as i8))
        })
    }

    /// 90-degree clockwise rotation: new[j][rows-1-i] = old[i][j].
    /// An n x m shape becomes m x n.
    pub fn rotated(&self) -> Self {
        let n = self.rows as usize;
        let m = self.cols as usize;
        let mut cells = [[0u8; SHAPE_MAX]; SHAPE_MAX];
        for i in 0..n {
            for j in 0..m {
                cells[j][n - 1 - i] = self.cells[i][j];
            }
        }
        Self {
            cells,
            rows: m as u8,
            cols: n as u8,
        }
    }

    /// Number of fully-empty leading rows (used to spawn above the board).
    pub fn top_empty_rows(&self) -> u8 {
        let mut empty = 0;
        for i in 0..self.rows as usize {
            if self.cells[i][..self.cols as usize].iter().all(|&v| v == 0) {
                empty += 1;
            } else {
                break;
            }
        }
        empty
    }
}

/// A tetromino: a shape matrix plus its identity tag.
///
/// Identity ("what piece") is separate from rendering; the view decides how
/// a kind is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
}

impl Piece {
    /// Canonical spawn shape for a kind.
    pub fn of_kind(kind: PieceKind) -> Self {
        let shape = match kind {
            PieceKind::I => Shape::from_rows([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::J => Shape::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
            PieceKind::L => Shape::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
            PieceKind::O => Shape::from_rows([[1, 1], [1, 1]]),
            PieceKind::S => Shape::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
            PieceKind::Z => Shape::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
            PieceKind::T => Shape::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
        };
        Self { kind, shape }
    }

    /// Draw one of the seven kinds uniformly at random.
    pub fn random(rng: &mut SimpleRng) -> Self {
        Self::of_kind(rng.next_kind())
    }

    /// Same piece with a custom shape matrix (snapshot restore path).
    pub fn with_shape(kind: PieceKind, shape: Shape) -> Self {
        Self { kind, shape }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// This piece rotated 90 degrees clockwise.
    pub fn rotated(&self) -> Self {
        Self {
            kind: self.kind,
            shape: self.shape.rotated(),
        }
    }
}
