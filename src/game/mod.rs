//! Core Connect Four game logic: gravity board with win detection, marks,
//! a turn-alternating game state, and random opening generation.

mod board;
mod mark;
pub mod scenario;
mod state;

pub use board::{Axis, Board, Cell, WinLine, COLS, CONNECT, ROWS};
pub use mark::Mark;
pub use state::{GameOutcome, GameState, Reward};
