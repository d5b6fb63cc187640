use serde::Serialize;
use tracing::{debug, info, trace};

use super::{Board, Cell, Player};
use crate::error::{ConfigError, MoveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    InProgress,
    Win(Player),
    Draw,
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DropResult {
    /// The game continues and `next_player` is to move.
    Accepted {
        row: usize,
        col: usize,
        next_player: Player,
    },
    /// The piece at (row, col) completed a four-in-a-row.
    Win {
        row: usize,
        col: usize,
        player: Player,
    },
    /// The piece at (row, col) filled the board without a winner.
    Draw { row: usize, col: usize },
}

/// Rules engine for one game: board, turn and outcome.
///
/// `drop_piece` is the only mutator of game state. Once the outcome is
/// `Win` or `Draw` every move is rejected until `reset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    current_player: Player,
    outcome: Outcome,
}

impl GameEngine {
    /// Create an engine with an empty `height` x `width` board.
    pub fn new(height: usize, width: usize) -> Result<Self, ConfigError> {
        Ok(GameEngine {
            board: Board::new(height, width)?,
            current_player: Player::One, // Player 1 starts
            outcome: Outcome::InProgress,
        })
    }

    /// Resume from a seeded position. The outcome is derived from the board
    /// with a full scan, so a position that already holds a four for either
    /// player starts out terminal.
    pub fn from_board(board: Board, current_player: Player) -> Result<Self, ConfigError> {
        let one_wins = board.has_four_in_a_row(Cell::Player1);
        let two_wins = board.has_four_in_a_row(Cell::Player2);
        let outcome = match (one_wins, two_wins) {
            (true, true) => {
                return Err(ConfigError::InvalidBoard(
                    "both players have four in a row".into(),
                ))
            }
            (true, false) => Outcome::Win(Player::One),
            (false, true) => Outcome::Win(Player::Two),
            (false, false) if board.is_full() => Outcome::Draw,
            (false, false) => Outcome::InProgress,
        };

        Ok(GameEngine {
            board,
            current_player,
            outcome,
        })
    }

    /// Start a fresh game on a `height` x `width` board. On invalid
    /// dimensions the current game is left untouched.
    pub fn reset(&mut self, height: usize, width: usize) -> Result<(), ConfigError> {
        let board = Board::new(height, width)?;
        self.board = board;
        self.current_player = Player::One;
        self.outcome = Outcome::InProgress;
        debug!(height, width, "game reset");
        Ok(())
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    /// Cell at (row, col), `None` when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.board.get(row, col)
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    /// True iff `col` is on the board and its top cell is empty.
    pub fn is_column_playable(&self, col: usize) -> bool {
        !self.board.is_column_full(col)
    }

    /// Get list of legal columns (none once the game is over)
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..self.width())
            .filter(|&col| self.is_column_playable(col))
            .collect()
    }

    /// Drop the current player's piece into `col`.
    ///
    /// Rejected moves leave board, turn and outcome unchanged. A win is
    /// checked before a draw, and neither advances the turn.
    pub fn drop_piece(&mut self, col: usize) -> Result<DropResult, MoveError> {
        if self.is_terminal() {
            trace!(col, "move rejected, game over");
            return Err(MoveError::GameOver);
        }

        let player = self.current_player;
        let row = self
            .board
            .drop_piece(col, player.to_cell())
            .inspect_err(|err| trace!(col, %err, "move rejected"))?;

        if self.check_win(row, col, player) {
            self.outcome = Outcome::Win(player);
            info!(%player, row, col, "game won");
            return Ok(DropResult::Win { row, col, player });
        }

        if self.check_draw() {
            self.outcome = Outcome::Draw;
            info!(row, col, "game drawn");
            return Ok(DropResult::Draw { row, col });
        }

        self.current_player = player.other();
        debug!(%player, row, col, next = %self.current_player, "piece dropped");
        Ok(DropResult::Accepted {
            row,
            col,
            next_player: self.current_player,
        })
    }

    /// Whether `player`'s piece at (row, col) completes a four-in-a-row.
    pub fn check_win(&self, row: usize, col: usize, player: Player) -> bool {
        self.board.check_win(row, col, player.to_cell())
    }

    /// True iff no empty cell remains.
    pub fn check_draw(&self) -> bool {
        self.board.is_full()
    }
}

impl Default for GameEngine {
    /// Standard 6x7 game.
    fn default() -> Self {
        GameEngine {
            board: Board::default(),
            current_player: Player::One,
            outcome: Outcome::InProgress,
        }
    }
}
