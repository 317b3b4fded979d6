//! Scoring module - line values, drop bonuses, level and gravity curves.
//!
//! All functions are pure; the session applies them in order (score with the
//! pre-clear level, then level, then gravity interval).

use crate::types::{Difficulty, GRAVITY_FLOOR_MS, GRAVITY_LEVEL_STEP_MS};

/// Points awarded for clearing `lines` rows at once at the given level.
///
/// The standard ladder covers 1 through 4; anything beyond earns a flat
/// 200 per line, level-scaled.
pub fn score_for_lines(lines: usize, level: u32) -> u32 {
    let base = match lines {
        0 => 0,
        1 => 100,
        2 => 300,
        3 => 500,
        4 => 800,
        n => (n as u32) * 200,
    };
    base * level
}

/// Points for dropping `cells` rows: 1 per cell soft, 2 per cell hard.
pub fn drop_score(cells: u32, hard: bool) -> u32 {
    if hard {
        cells * 2
    } else {
        cells
    }
}

/// Level as a function of total lines cleared: up one every 10 lines.
pub fn level_for_lines(lines: u32) -> u32 {
    1 + lines / 10
}

/// Gravity interval for a difficulty at a level, floored at 60ms.
pub fn gravity_interval_ms(difficulty: Difficulty, level: u32) -> u32 {
    let base = difficulty.base_delay_ms();
    let reduction = level.saturating_sub(1) * GRAVITY_LEVEL_STEP_MS;
    base.saturating_sub(reduction).max(GRAVITY_FLOOR_MS)
}
