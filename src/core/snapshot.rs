//! Snapshot module - serializable game state for save and restore.
//!
//! A snapshot is a deep copy of everything needed to resume play: grid,
//! pieces with their exact rotation matrices, counters, and flags. Timer
//! phase is deliberately not captured; restore re-arms fresh clocks.

use serde::{Deserialize, Serialize};

use crate::core::piece::{Piece, Shape};
use crate::types::{Cell, Difficulty, PieceKind, BOARD_COLS, BOARD_ROWS, HARD_MAX_ERRORS};

/// A piece frozen at its current rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Vec<Vec<u8>>,
}

impl From<Piece> for PieceSnapshot {
    fn from(piece: Piece) -> Self {
        Self {
            kind: piece.kind(),
            shape: piece.shape().to_matrix(),
        }
    }
}

impl TryFrom<&PieceSnapshot> for Piece {
    type Error = SnapshotError;

    fn try_from(snap: &PieceSnapshot) -> Result<Piece, SnapshotError> {
        let shape = Shape::from_matrix(&snap.shape).ok_or(SnapshotError::PieceShape)?;
        Ok(Piece::with_shape(snap.kind, shape))
    }
}

/// Complete session state at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub player: String,
    pub difficulty: Difficulty,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub hard_errors: u8,
    /// 20 rows of 10 cells, top row first.
    pub grid: Vec<Vec<Cell>>,
    pub current: Option<PieceSnapshot>,
    pub next: Option<PieceSnapshot>,
    pub cur_row: i8,
    pub cur_col: i8,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Structural validation; a snapshot that passes can always be restored.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.grid.len() != BOARD_ROWS as usize
            || self.grid.iter().any(|row| row.len() != BOARD_COLS as usize)
        {
            return Err(SnapshotError::GridDimensions);
        }
        for piece in [&self.current, &self.next].into_iter().flatten() {
            Shape::from_matrix(&piece.shape).ok_or(SnapshotError::PieceShape)?;
        }
        if self.hard_errors > HARD_MAX_ERRORS {
            return Err(SnapshotError::HardErrors);
        }
        if self.level == 0 {
            return Err(SnapshotError::Level);
        }
        // Positions may hang off the top or sides by a shape's extent but
        // never beyond it.
        if self.cur_row < -4
            || self.cur_row >= BOARD_ROWS as i8
            || self.cur_col < -4
            || self.cur_col >= BOARD_COLS as i8
        {
            return Err(SnapshotError::PositionOutOfRange);
        }
        Ok(())
    }
}

/// Reasons a snapshot cannot be restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    GridDimensions,
    PieceShape,
    HardErrors,
    Level,
    PositionOutOfRange,
}

impl SnapshotError {
    pub fn message(&self) -> &'static str {
        match self {
            SnapshotError::GridDimensions => "grid is not 20 rows of 10 cells",
            SnapshotError::PieceShape => "piece shape matrix is malformed",
            SnapshotError::HardErrors => "hard error count exceeds the limit",
            SnapshotError::Level => "level must be at least 1",
            SnapshotError::PositionOutOfRange => "piece position is outside the playable range",
        }
    }
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for SnapshotError {}

/// Finished-game result for the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player: String,
    pub score: u32,
    pub difficulty: Difficulty,
    pub timestamp_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_grid() -> Vec<Vec<Cell>> {
        vec![vec![None; BOARD_COLS as usize]; BOARD_ROWS as usize]
    }

    fn valid_snapshot() -> GameSnapshot {
        GameSnapshot {
            player: "tester".to_string(),
            difficulty: Difficulty::Medium,
            score: 500,
            level: 2,
            lines: 12,
            hard_errors: 0,
            grid: empty_grid(),
            current: Some(Piece::of_kind(PieceKind::T).into()),
            next: Some(Piece::of_kind(PieceKind::I).into()),
            cur_row: 3,
            cur_col: 4,
            game_over: false,
        }
    }

    #[test]
    fn test_valid_snapshot_passes() {
        assert_eq!(valid_snapshot().validate(), Ok(()));
    }

    #[test]
    fn test_grid_dimension_checks() {
        let mut snap = valid_snapshot();
        snap.grid.pop();
        assert_eq!(snap.validate(), Err(SnapshotError::GridDimensions));

        let mut snap = valid_snapshot();
        snap.grid[5].push(None);
        assert_eq!(snap.validate(), Err(SnapshotError::GridDimensions));
    }

    #[test]
    fn test_malformed_piece_shape_rejected() {
        let mut snap = valid_snapshot();
        snap.current.as_mut().unwrap().shape = vec![vec![0, 0], vec![0, 0]];
        assert_eq!(snap.validate(), Err(SnapshotError::PieceShape));
    }

    #[test]
    fn test_counter_bounds() {
        let mut snap = valid_snapshot();
        snap.hard_errors = HARD_MAX_ERRORS + 1;
        assert_eq!(snap.validate(), Err(SnapshotError::HardErrors));

        let mut snap = valid_snapshot();
        snap.level = 0;
        assert_eq!(snap.validate(), Err(SnapshotError::Level));
    }

    #[test]
    fn test_position_bounds() {
        let mut snap = valid_snapshot();
        snap.cur_col = 10;
        assert_eq!(snap.validate(), Err(SnapshotError::PositionOutOfRange));

        let mut snap = valid_snapshot();
        snap.cur_row = -5;
        assert_eq!(snap.validate(), Err(SnapshotError::PositionOutOfRange));

        // Negative spawn rows within a shape's extent are legal.
        let mut snap = valid_snapshot();
        snap.cur_row = -1;
        assert_eq!(snap.validate(), Ok(()));
    }

    #[test]
    fn test_json_roundtrip() {
        let snap = valid_snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
    }

    #[test]
    fn test_piece_snapshot_roundtrip() {
        let piece = Piece::of_kind(PieceKind::S).rotated();
        let snap: PieceSnapshot = piece.into();
        let back = Piece::try_from(&snap).unwrap();
        assert_eq!(back, piece);
    }
}
