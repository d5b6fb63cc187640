use serde::Serialize;

use crate::error::MoveError;
use crate::game::{DropResult, GameEngine};

/// One scripted move and what the engine made of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayStep {
    pub column: usize,
    #[serde(flatten)]
    pub result: Option<DropResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReplayStep {
    fn new(column: usize, outcome: Result<DropResult, MoveError>) -> Self {
        match outcome {
            Ok(result) => ReplayStep {
                column,
                result: Some(result),
                error: None,
            },
            Err(err) => ReplayStep {
                column,
                result: None,
                error: Some(err.to_string()),
            },
        }
    }

    /// Single-line text form.
    pub fn describe(&self) -> String {
        let col = self.column;
        match (&self.result, &self.error) {
            (Some(DropResult::Accepted { row, next_player, .. }), _) => {
                format!("column {col}: landed on row {row}, {next_player} to move")
            }
            (Some(DropResult::Win { row, player, .. }), _) => {
                format!("column {col}: landed on row {row}, {player} wins")
            }
            (Some(DropResult::Draw { row, .. }), _) => {
                format!("column {col}: landed on row {row}, draw")
            }
            (None, Some(err)) => format!("column {col}: rejected ({err})"),
            (None, None) => format!("column {col}: no result"),
        }
    }
}

/// Feed `moves` to the engine in order. Rejected moves are recorded and the
/// replay carries on, so moves after the game ends show up as rejections.
pub fn replay(engine: &mut GameEngine, moves: &[usize]) -> Vec<ReplayStep> {
    moves
        .iter()
        .map(|&col| ReplayStep::new(col, engine.drop_piece(col)))
        .collect()
}
