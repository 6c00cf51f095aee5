//! Core game logic: board grid, win detection, heuristic evaluation, and the
//! game session state machine.

mod board;
mod player;
mod session;

pub use board::{Board, Cell, PlacementMode, WinLine, DEFAULT_COLS, DEFAULT_ROWS};
pub use player::Player;
pub use session::{GameSession, GameStatus, Move};
