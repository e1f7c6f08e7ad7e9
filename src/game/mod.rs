//! Core Connect Four game logic: the board with gravity, turn tracking and
//! win/draw detection, player and cell types, and move results.

mod board;
mod player;
mod state;

pub use board::{Board, Direction, Window, WindowCounts, COLS, CONNECT, ROWS};
pub use player::{Cell, Player};
pub use state::{GameOutcome, MoveError, MoveOutcome};
