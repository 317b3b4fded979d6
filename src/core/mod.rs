//! Core game logic.
//!
//! Everything in here is pure state: no terminal, no files, no threads.
//! Time enters through `Session::tick`, input through `Session::apply_action`.

pub mod board;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod timer;

pub use board::Board;
pub use piece::{Piece, Shape};
pub use rng::SimpleRng;
pub use session::Session;
pub use snapshot::{GameSnapshot, PieceSnapshot, ScoreRecord, SnapshotError};
pub use timer::{GravityClock, PieceCountdown};
