//! Core Connect Four rules: board model, players, and the game engine that
//! owns turn and outcome state.

mod board;
mod engine;
mod player;

pub use board::{Board, Cell, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_SIZE, MIN_SIZE, WIN_LENGTH};
pub use engine::{DropResult, GameEngine, Outcome};
pub use player::Player;
