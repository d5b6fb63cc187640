//! # Connect Four
//!
//! A Connect Four rules engine with a terminal front end. The engine owns
//! all game state; presentation reads it through accessors and submits
//! moves with [`game::GameEngine::drop_piece`].
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, engine state machine
//! - [`ui`] — Terminal UI and headless replay host
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;

pub use error::{ConfigError, MoveError};
pub use game::{Board, Cell, DropResult, GameEngine, Outcome, Player};
