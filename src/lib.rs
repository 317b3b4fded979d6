//! blockfall - a terminal falling-block puzzle.
//!
//! The crate splits into a pure core (board, pieces, session, timers,
//! snapshots), a keyboard mapping layer, and a thin terminal renderer. The
//! binary wires them together in a fixed-step loop.

pub mod core;
pub mod input;
pub mod persist;
pub mod term;
pub mod types;
