//! Raw-mode terminal wrapper.
//!
//! Owns the alternate screen for its lifetime and restores the terminal on
//! drop, including the unwind path.

use std::io::{self, Stdout, Write};

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

pub struct Terminal {
    out: Stdout,
}

impl Terminal {
    /// Enter raw mode on the alternate screen with the cursor hidden.
    pub fn enter() -> Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(Self { out })
    }

    /// Draw a full frame from the top-left corner.
    pub fn draw(&mut self, frame: &str) -> Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All), Print(frame))?;
        self.out.flush()?;
        Ok(())
    }

    fn restore(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        self.restore();
    }
}
