//! Core types shared across the application.
//! Pure data types; serde derives only where a type crosses the
//! persistence boundary.

use serde::{Deserialize, Serialize};

/// Board dimensions (rows x columns).
pub const BOARD_ROWS: u8 = 20;
pub const BOARD_COLS: u8 = 10;

/// Fixed-step tick for the runner loop (milliseconds).
pub const TICK_MS: u32 = 16;

/// Gravity interval never drops below this.
pub const GRAVITY_FLOOR_MS: u32 = 60;
/// Gravity speedup per level above 1.
pub const GRAVITY_LEVEL_STEP_MS: u32 = 30;

/// HARD mode: seconds a piece may sit before a forced lock.
pub const HARD_COUNTDOWN_SECS: u32 = 30;
/// HARD mode: forced locks allowed before the game ends.
pub const HARD_MAX_ERRORS: u8 = 3;

/// Spawn recovery: widest lateral shift tried when the spawn cell is blocked.
pub const SPAWN_SHIFT_LIMIT: i8 = 2;
/// Spawn column is clamped so it never goes further left than this.
pub const SPAWN_COL_FLOOR: i8 = -2;

/// Tetromino piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    Z,
    T,
}

impl PieceKind {
    /// All seven kinds, in factory order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
        }
    }
}

/// Difficulty setting, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Gravity interval at level 1 (milliseconds).
    pub fn base_delay_ms(&self) -> u32 {
        match self {
            Difficulty::Easy => 600,
            Difficulty::Medium => 350,
            Difficulty::Hard => 180,
        }
    }

    /// HARD sessions cannot be paused.
    pub fn can_pause(&self) -> bool {
        !matches!(self, Difficulty::Hard)
    }

    /// Per-piece countdown, if this difficulty runs one.
    pub fn countdown_secs(&self) -> Option<u32> {
        match self {
            Difficulty::Hard => Some(HARD_COUNTDOWN_SECS),
            _ => None,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Discrete commands accepted by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    TogglePause,
}

impl GameAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::TogglePause => "togglePause",
        }
    }
}

/// Cell on the board (None = empty, Some = filled with piece kind).
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_delays_per_difficulty() {
        assert_eq!(Difficulty::Easy.base_delay_ms(), 600);
        assert_eq!(Difficulty::Medium.base_delay_ms(), 350);
        assert_eq!(Difficulty::Hard.base_delay_ms(), 180);
    }

    #[test]
    fn test_only_hard_runs_a_countdown() {
        assert_eq!(Difficulty::Easy.countdown_secs(), None);
        assert_eq!(Difficulty::Medium.countdown_secs(), None);
        assert_eq!(Difficulty::Hard.countdown_secs(), Some(HARD_COUNTDOWN_SECS));
    }

    #[test]
    fn test_hard_cannot_pause() {
        assert!(Difficulty::Easy.can_pause());
        assert!(Difficulty::Medium.can_pause());
        assert!(!Difficulty::Hard.can_pause());
    }

    #[test]
    fn test_difficulty_from_str_roundtrip() {
        for diff in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(diff.as_str()), Some(diff));
        }
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }
}
