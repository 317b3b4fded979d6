//! Game view - renders a session into a text frame.
//!
//! The frame is a plain string with \r\n line endings (raw mode does not
//! translate \n). Board on the left, HUD alongside. Hard mode hides the
//! next-piece preview and shows the countdown and error count instead.

use crate::core::Session;
use crate::types::{Difficulty, BOARD_COLS, BOARD_ROWS, HARD_MAX_ERRORS};

const FILLED_CELL: &str = "[]";
const EMPTY_CELL: &str = " .";

/// Build a complete frame for the current session state.
pub fn render(session: &Session) -> String {
    let rows = BOARD_ROWS as usize;
    let cols = BOARD_COLS as usize;

    let mut filled = vec![[false; BOARD_COLS as usize]; rows];
    for (r, row) in filled.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = session.board().is_occupied(r as i8, c as i8);
        }
    }
    // Overlay the falling piece; cells above row 0 stay off-screen.
    if let Some((piece, prow, pcol)) = session.current_piece() {
        for (dr, dc) in piece.shape().offsets() {
            let r = prow + dr;
            let c = pcol + dc;
            if r >= 0 && (r as usize) < rows && c >= 0 && (c as usize) < cols {
                filled[r as usize][c as usize] = true;
            }
        }
    }

    let hud = hud_lines(session);
    let border = format!("+{}+", "-".repeat(cols * 2));

    let mut out = String::new();
    out.push_str(&format!(
        "  {} ({})\r\n",
        session.player(),
        session.difficulty().as_str()
    ));
    out.push_str(&border);
    out.push_str("\r\n");
    for (r, row) in filled.iter().enumerate() {
        out.push('|');
        for &cell in row {
            out.push_str(if cell { FILLED_CELL } else { EMPTY_CELL });
        }
        out.push('|');
        if let Some(line) = hud.get(r) {
            if !line.is_empty() {
                out.push_str("  ");
                out.push_str(line);
            }
        }
        out.push_str("\r\n");
    }
    out.push_str(&border);
    out.push_str("\r\n");

    if session.is_game_over() {
        out.push_str("  GAME OVER - press q to exit\r\n");
    } else if session.is_paused() {
        out.push_str("  PAUSED - press p to resume\r\n");
    }
    out
}

fn hud_lines(session: &Session) -> Vec<String> {
    let mut lines = vec![
        format!("Score: {}", session.score()),
        format!("Level: {}", session.level()),
        format!("Lines: {}", session.lines()),
    ];
    match session.countdown_display() {
        Some(secs) => lines.push(format!("Timer: {}s", secs)),
        None => lines.push("Timer: -".to_string()),
    }
    if session.difficulty() == Difficulty::Hard {
        lines.push(format!(
            "Errors: {}/{}",
            session.hard_errors(),
            HARD_MAX_ERRORS
        ));
    } else {
        // Preview is an easy/medium privilege.
        lines.push(String::new());
        lines.push("Next:".to_string());
        for row in session.next_piece().shape().to_matrix() {
            let mut line = String::new();
            for v in row {
                line.push_str(if v == 1 { FILLED_CELL } else { "  " });
            }
            lines.push(line);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameAction;

    #[test]
    fn test_frame_has_board_and_hud() {
        let session = Session::new("eve", Difficulty::Easy, 3);
        let frame = render(&session);
        assert!(frame.contains("eve (easy)"));
        assert!(frame.contains("Score: 0"));
        assert!(frame.contains("Level: 1"));
        assert!(frame.contains("Timer: -"));
        assert!(frame.contains("Next:"));
        // The spawned piece is drawn somewhere.
        assert!(frame.contains(FILLED_CELL));
        // 20 board rows plus borders, header, and trailing newline.
        assert_eq!(frame.matches("\r\n").count(), 23);
    }

    #[test]
    fn test_hard_mode_hides_preview_and_shows_countdown() {
        let session = Session::new("eve", Difficulty::Hard, 3);
        let frame = render(&session);
        assert!(!frame.contains("Next:"));
        assert!(frame.contains("Timer: 30s"));
        assert!(frame.contains("Errors: 0/3"));
    }

    #[test]
    fn test_paused_banner() {
        let mut session = Session::new("eve", Difficulty::Easy, 3);
        session.apply_action(GameAction::TogglePause);
        assert!(render(&session).contains("PAUSED"));
    }

    #[test]
    fn test_game_over_banner() {
        let mut session = Session::new("eve", Difficulty::Easy, 3);
        // Pieces lock instantly against a nearly full board.
        for _ in 0..400 {
            session.apply_action(GameAction::HardDrop);
            if session.is_game_over() {
                break;
            }
        }
        assert!(session.is_game_over());
        assert!(render(&session).contains("GAME OVER"));
    }
}
