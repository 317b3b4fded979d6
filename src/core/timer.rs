//! Timer module - the two clocks that drive a session.
//!
//! Both clocks are pure accumulators advanced by elapsed milliseconds; they
//! never spawn threads or read wall time. The session owns them and feeds
//! them from its tick, so all timer effects are serialized through the
//! single `&mut Session` writer.

/// Gravity clock: fires once per interval, carrying the remainder so no
/// time is lost across ticks.
#[derive(Debug, Clone)]
pub struct GravityClock {
    interval_ms: u32,
    acc_ms: u32,
    stopped: bool,
}

impl GravityClock {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            acc_ms: 0,
            stopped: false,
        }
    }

    /// Change the firing interval. The accumulator carries over, so a
    /// speedup takes effect from the current instant.
    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Advance by `elapsed_ms` and return how many times the clock fired.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if self.stopped {
            return 0;
        }
        self.acc_ms += elapsed_ms;
        let fires = self.acc_ms / self.interval_ms;
        self.acc_ms %= self.interval_ms;
        fires
    }

    /// Stop permanently. Safe to call more than once.
    pub fn stop(&mut self) {
        self.stopped = true;
        self.acc_ms = 0;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

/// Per-piece countdown used in hard mode: counts whole seconds down from a
/// starting value and reports expiry exactly once per run.
#[derive(Debug, Clone)]
pub struct PieceCountdown {
    remaining_s: u32,
    acc_ms: u32,
    running: bool,
}

impl PieceCountdown {
    /// A countdown that is not running (easy/medium sessions).
    pub fn idle() -> Self {
        Self {
            remaining_s: 0,
            acc_ms: 0,
            running: false,
        }
    }

    /// Restart from `secs`. Discards any partial second in progress.
    pub fn restart(&mut self, secs: u32) {
        self.remaining_s = secs;
        self.acc_ms = 0;
        self.running = true;
    }

    /// Advance by `elapsed_ms`. Returns true on the tick where the
    /// countdown reaches zero; the clock then stops until restarted.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if !self.running {
            return false;
        }
        self.acc_ms += elapsed_ms;
        while self.acc_ms >= 1000 {
            self.acc_ms -= 1000;
            if self.remaining_s > 0 {
                self.remaining_s -= 1;
            }
            if self.remaining_s == 0 {
                self.running = false;
                self.acc_ms = 0;
                return true;
            }
        }
        false
    }

    /// Stop without expiring. Safe to call more than once.
    pub fn stop(&mut self) {
        self.running = false;
        self.acc_ms = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whole seconds left, or None when the countdown is not running.
    pub fn remaining_secs(&self) -> Option<u32> {
        if self.running {
            Some(self.remaining_s)
        } else {
            None
        }
    }
}
