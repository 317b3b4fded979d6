//! Session module - one game from start to game over.
//!
//! The session is the single writer for all game state. Input arrives as
//! discrete actions, time arrives through `tick`, and both clocks live
//! inside the session, so every mutation is serialized through `&mut self`.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::board::Board;
use crate::core::piece::Piece;
use crate::core::rng::SimpleRng;
use crate::core::scoring::{drop_score, gravity_interval_ms, level_for_lines, score_for_lines};
use crate::core::snapshot::{GameSnapshot, ScoreRecord, SnapshotError};
use crate::core::timer::{GravityClock, PieceCountdown};
use crate::types::{
    Difficulty, GameAction, BOARD_COLS, HARD_COUNTDOWN_SECS, HARD_MAX_ERRORS, SPAWN_COL_FLOOR,
    SPAWN_SHIFT_LIMIT,
};

/// Rotation kick offsets (row, col), tried in order. The first placement
/// that does not collide wins; if none fit the rotation is refused.
const ROTATION_KICKS: [(i8, i8); 7] = [(0, 0), (0, -1), (0, 1), (0, -2), (0, 2), (-1, 0), (1, 0)];

/// A running (or finished) game.
pub struct Session {
    player: String,
    difficulty: Difficulty,
    board: Board,
    current: Option<Piece>,
    next: Piece,
    cur_row: i8,
    cur_col: i8,
    score: u32,
    level: u32,
    lines: u32,
    hard_errors: u8,
    paused: bool,
    game_over: bool,
    rng: SimpleRng,
    gravity: GravityClock,
    countdown: PieceCountdown,
}

impl Session {
    /// Start a fresh game. An empty player name falls back to "Player".
    pub fn new(player: &str, difficulty: Difficulty, seed: u32) -> Self {
        let player = if player.trim().is_empty() {
            "Player".to_string()
        } else {
            player.trim().to_string()
        };
        let mut rng = SimpleRng::new(seed);
        let next = Piece::random(&mut rng);
        let mut session = Self {
            player,
            difficulty,
            board: Board::new(),
            current: None,
            next,
            cur_row: 0,
            cur_col: 0,
            score: 0,
            level: 1,
            lines: 0,
            hard_errors: 0,
            paused: false,
            game_over: false,
            rng,
            gravity: GravityClock::new(gravity_interval_ms(difficulty, 1)),
            countdown: PieceCountdown::idle(),
        };
        session.spawn_piece();
        session
    }

    // --- commands ---

    /// Apply a player action. Returns true if it changed the game state.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::TogglePause => self.toggle_pause(),
            _ if !self.accepts_input() => false,
            GameAction::MoveLeft => self.try_move(0, -1),
            GameAction::MoveRight => self.try_move(0, 1),
            GameAction::SoftDrop => {
                if self.try_move(1, 0) {
                    self.score += drop_score(1, false);
                    true
                } else {
                    false
                }
            }
            GameAction::HardDrop => {
                let mut fell: u32 = 0;
                while self.try_move(1, 0) {
                    fell += 1;
                }
                self.score += drop_score(fell, true);
                if self.lock_piece() {
                    self.clear_lines();
                    self.spawn_piece();
                }
                true
            }
            GameAction::Rotate => self.rotate_current(),
        }
    }

    /// Advance time. Gravity fires first, then the hard-mode countdown.
    /// Paused or finished sessions ignore elapsed time entirely.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.game_over || self.paused {
            return;
        }
        let fires = self.gravity.advance(elapsed_ms);
        for _ in 0..fires {
            self.step_down();
            if self.game_over {
                return;
            }
        }
        if self.countdown.advance(elapsed_ms) {
            self.on_countdown_expired();
        }
    }

    /// Stop both clocks. Safe to call repeatedly.
    pub fn stop_timers(&mut self) {
        self.gravity.stop();
        self.countdown.stop();
    }

    fn toggle_pause(&mut self) -> bool {
        if !self.difficulty.can_pause() || self.game_over {
            return false;
        }
        self.paused = !self.paused;
        log::debug!("session {}", if self.paused { "paused" } else { "resumed" });
        true
    }

    fn accepts_input(&self) -> bool {
        !self.game_over && !self.paused && self.current.is_some()
    }

    fn try_move(&mut self, dr: i8, dc: i8) -> bool {
        let Some(piece) = self.current else {
            return false;
        };
        let row = self.cur_row + dr;
        let col = self.cur_col + dc;
        if self.board.collides(piece.shape(), row, col) {
            return false;
        }
        self.cur_row = row;
        self.cur_col = col;
        true
    }

    fn rotate_current(&mut self) -> bool {
        let Some(piece) = self.current else {
            return false;
        };
        let rotated = piece.rotated();
        for (dr, dc) in ROTATION_KICKS {
            let row = self.cur_row + dr;
            let col = self.cur_col + dc;
            if !self.board.collides(rotated.shape(), row, col) {
                self.current = Some(rotated);
                self.cur_row = row;
                self.cur_col = col;
                return true;
            }
        }
        false
    }

    /// One gravity step: descend, or lock and respawn at the floor.
    fn step_down(&mut self) {
        if self.try_move(1, 0) {
            return;
        }
        if self.lock_piece() {
            self.clear_lines();
            self.spawn_piece();
        }
    }

    /// Lock the current piece into the grid.
    ///
    /// If the resting position overlaps locked blocks (forced locks can do
    /// this), the piece is shifted upward until it fits, within a bound of
    /// shape height + 2 + |row|. An unresolvable overlap ends the game.
    fn lock_piece(&mut self) -> bool {
        let Some(piece) = self.current.take() else {
            return false;
        };
        let mut row = self.cur_row;
        if self.board.collides(piece.shape(), row, self.cur_col) {
            let limit = piece.shape().rows() as i16 + 2 + (self.cur_row as i16).abs();
            let mut shifted: i16 = 0;
            loop {
                row -= 1;
                shifted += 1;
                if !self.board.collides(piece.shape(), row, self.cur_col) {
                    break;
                }
                if shifted > limit {
                    log::warn!("piece could not settle; game over for {}", self.player);
                    self.game_over = true;
                    self.stop_timers();
                    return false;
                }
            }
        }
        self.board.stamp(piece.shape(), row, self.cur_col, piece.kind());
        true
    }

    /// Clear full rows and apply scoring, level, and gravity updates.
    /// The line score uses the level in effect before this clear.
    fn clear_lines(&mut self) {
        let cleared = self.board.clear_full_rows().len();
        if cleared == 0 {
            return;
        }
        self.lines += cleared as u32;
        self.score += score_for_lines(cleared, self.level);
        self.level = level_for_lines(self.lines);
        self.gravity
            .set_interval(gravity_interval_ms(self.difficulty, self.level));
        log::debug!(
            "cleared {} line(s); score={} level={}",
            cleared,
            self.score,
            self.level
        );
    }

    /// Promote the preview piece to play and draw a new preview.
    ///
    /// If the spawn cell is blocked, nearby columns are tried (one left, one
    /// right, then two either way). A spawn with nowhere to go ends the game
    /// with the overlapping piece left visible at its spawn position.
    fn spawn_piece(&mut self) -> bool {
        let piece = self.next;
        self.next = Piece::random(&mut self.rng);

        let width = piece.shape().cols() as i8;
        let mut col = ((BOARD_COLS as i8 - width) / 2).max(SPAWN_COL_FLOOR);
        let row = -(piece.shape().top_empty_rows() as i8);

        self.current = Some(piece);
        self.cur_row = row;
        self.cur_col = col;

        if self.board.collides(piece.shape(), row, col) {
            let mut placed = false;
            'search: for d in 1..=SPAWN_SHIFT_LIMIT {
                for candidate in [col - d, col + d] {
                    if !self.board.collides(piece.shape(), row, candidate) {
                        col = candidate;
                        placed = true;
                        break 'search;
                    }
                }
            }
            if !placed {
                log::info!("spawn blocked; game over for {}", self.player);
                self.game_over = true;
                self.stop_timers();
                return false;
            }
            self.cur_col = col;
        }

        if self.difficulty == Difficulty::Hard {
            self.countdown.restart(HARD_COUNTDOWN_SECS);
        }
        true
    }

    /// Hard-mode countdown hit zero: force-lock the piece where it sits,
    /// count the error, and end the game on the third one.
    fn on_countdown_expired(&mut self) {
        log::info!(
            "countdown expired for {} (error {} of {})",
            self.player,
            self.hard_errors + 1,
            HARD_MAX_ERRORS
        );
        if self.lock_piece() {
            self.clear_lines();
            self.spawn_piece();
        }
        self.hard_errors += 1;
        if self.hard_errors >= HARD_MAX_ERRORS {
            self.game_over = true;
            self.stop_timers();
        }
    }

    // --- snapshot ---

    /// Deep copy of the full game state. Always succeeds.
    pub fn export(&self) -> GameSnapshot {
        GameSnapshot {
            player: self.player.clone(),
            difficulty: self.difficulty,
            score: self.score,
            level: self.level,
            lines: self.lines,
            hard_errors: self.hard_errors,
            grid: self.board.to_rows(),
            current: self.current.map(Into::into),
            next: Some(self.next.into()),
            cur_row: self.cur_row,
            cur_col: self.cur_col,
            game_over: self.game_over,
        }
    }

    /// Rebuild a session from a snapshot with fresh clocks.
    ///
    /// The restored session is never paused; a finished game comes back with
    /// both clocks stopped, a live hard-mode game with its countdown re-armed
    /// at the full value.
    pub fn from_snapshot(snap: &GameSnapshot, seed: u32) -> Result<Self, SnapshotError> {
        snap.validate()?;
        let board = Board::from_rows(&snap.grid).ok_or(SnapshotError::GridDimensions)?;
        let current = snap
            .current
            .as_ref()
            .map(Piece::try_from)
            .transpose()?;
        let mut rng = SimpleRng::new(seed);
        let next = match &snap.next {
            Some(piece) => Piece::try_from(piece)?,
            None => Piece::random(&mut rng),
        };

        let mut gravity = GravityClock::new(gravity_interval_ms(snap.difficulty, snap.level));
        let mut countdown = PieceCountdown::idle();
        if snap.game_over {
            gravity.stop();
        } else if snap.difficulty == Difficulty::Hard && current.is_some() {
            countdown.restart(HARD_COUNTDOWN_SECS);
        }

        let mut session = Self {
            player: snap.player.clone(),
            difficulty: snap.difficulty,
            board,
            current,
            next,
            cur_row: snap.cur_row,
            cur_col: snap.cur_col,
            score: snap.score,
            level: snap.level,
            lines: snap.lines,
            hard_errors: snap.hard_errors,
            paused: false,
            game_over: snap.game_over,
            rng,
            gravity,
            countdown,
        };
        if session.current.is_none() && !session.game_over {
            session.spawn_piece();
        }
        Ok(session)
    }

    /// Restore from a snapshot, falling back to a fresh game for the same
    /// player and difficulty when the snapshot is unusable.
    pub fn restore(snap: &GameSnapshot, seed: u32) -> Self {
        match Self::from_snapshot(snap, seed) {
            Ok(session) => session,
            Err(err) => {
                log::warn!("snapshot rejected ({}); starting fresh", err);
                Self::new(&snap.player, snap.difficulty, seed)
            }
        }
    }

    /// Final result for the leaderboard.
    pub fn score_record(&self) -> ScoreRecord {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        ScoreRecord {
            player: self.player.clone(),
            score: self.score,
            difficulty: self.difficulty,
            timestamp_ms,
        }
    }

    // --- queries ---

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The falling piece and its origin, if one is in play.
    pub fn current_piece(&self) -> Option<(&Piece, i8, i8)> {
        self.current
            .as_ref()
            .map(|piece| (piece, self.cur_row, self.cur_col))
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn hard_errors(&self) -> u8 {
        self.hard_errors
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_pause(&self) -> bool {
        self.difficulty.can_pause()
    }

    pub fn gravity_interval_ms(&self) -> u32 {
        self.gravity.interval_ms()
    }

    /// Seconds left on the hard-mode countdown, if one is running.
    pub fn countdown_display(&self) -> Option<u32> {
        self.countdown.remaining_secs()
    }
}
